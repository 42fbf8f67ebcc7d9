use log::{Level, Log, Metadata, Record};
use rusqlite::Connection;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use custom_userstore::config::RealmConfig;
use custom_userstore::storage::{ConnectionSource, SqliteConnectionSource};
use custom_userstore::CustomUserStoreManager;

pub const SELECT_USER_SQL: &str = "SELECT password FROM customer_data WHERE customer_name = ?";

/// Counts every connection handed out
pub struct CountingSource {
    inner: SqliteConnectionSource,
    connects: AtomicUsize,
}

impl CountingSource {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl ConnectionSource for CountingSource {
    fn connect(&self) -> rusqlite::Result<Connection> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.inner.connect()
    }
}

/// Records every log line
#[derive(Default)]
pub struct CaptureLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl CaptureLog {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl Log for CaptureLog {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub struct TestStore {
    pub db: NamedTempFile,
    pub source: Arc<CountingSource>,
    pub log: Arc<CaptureLog>,
    pub manager: CustomUserStoreManager,
}

impl TestStore {
    /// Snapshot of the backing table, read outside the manager
    pub fn rows(&self) -> Vec<(String, Option<String>)> {
        let conn = Connection::open(self.db.path()).unwrap();
        let mut stmt = conn
            .prepare("SELECT customer_name, password FROM customer_data ORDER BY customer_name")
            .unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }
}

pub fn setup_store() -> TestStore {
    let db = NamedTempFile::new().unwrap();
    let conn = Connection::open(db.path()).unwrap();
    conn.execute_batch(
        "CREATE TABLE customer_data (customer_name TEXT PRIMARY KEY, password TEXT);
         INSERT INTO customer_data VALUES ('alice', 'secret1');
         INSERT INTO customer_data VALUES ('bob', 'hunter2 ');
         INSERT INTO customer_data VALUES ('anonymous', 'open');",
    )
    .unwrap();
    drop(conn);

    let realm = RealmConfig::from_toml_str(&format!(
        "[connection]\nurl = {:?}\n\n[user_store_properties]\nSelectUserSQL = {:?}\n",
        db.path().to_string_lossy(),
        SELECT_USER_SQL
    ))
    .unwrap();

    let source = Arc::new(CountingSource {
        inner: SqliteConnectionSource::from_config(&realm.connection),
        connects: AtomicUsize::new(0),
    });
    let log = Arc::new(CaptureLog::default());
    let manager = CustomUserStoreManager::new(&realm, source.clone(), log.clone()).unwrap();

    TestStore {
        db,
        source,
        log,
        manager,
    }
}
