//! Connection sources
//!
//! Every call hands out a fresh connection; dropping it releases it.

use rusqlite::{Connection, OpenFlags};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConnectionConfig;

/// Supplies connections to the backing store
pub trait ConnectionSource: Send + Sync {
    fn connect(&self) -> rusqlite::Result<Connection>;
}

impl<T: ConnectionSource + ?Sized> ConnectionSource for Arc<T> {
    fn connect(&self) -> rusqlite::Result<Connection> {
        (**self).connect()
    }
}

/// Opens the configured SQLite database read-only
#[derive(Debug, Clone)]
pub struct SqliteConnectionSource {
    url: String,
    busy_timeout: Duration,
}

impl SqliteConnectionSource {
    pub fn new(url: impl Into<String>, busy_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            busy_timeout,
        }
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(config.url.clone(), config.busy_timeout())
    }
}

impl ConnectionSource for SqliteConnectionSource {
    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.url,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }
}
