//! Logging utilities
//!
//! Process-wide logger setup plus the per-component logger handed to the
//! user store at construction.

use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::sync::Arc;

/// Setup logging for the process
pub fn setup_logging() {
    env_logger::init();
}

/// Logger owned by a single component.
///
/// Wraps whatever `log::Log` the host injects and stamps every record with
/// the component's target.
#[derive(Clone)]
pub struct ComponentLogger {
    inner: Arc<dyn Log>,
    target: String,
}

impl ComponentLogger {
    pub fn new(inner: Arc<dyn Log>, component: &str) -> Self {
        Self {
            inner,
            target: format!("custom_userstore::{}", component),
        }
    }

    /// Logger forwarding to the process-wide `log` backend
    pub fn global(component: &str) -> Self {
        Self::new(Arc::new(ProcessLogger), component)
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.inner
            .enabled(&Metadata::builder().level(level).target(&self.target).build())
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(&self.target)
                .build(),
        );
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

impl fmt::Debug for ComponentLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentLogger")
            .field("target", &self.target)
            .finish()
    }
}

/// Forwards to `log::logger()`, honouring the global max level
struct ProcessLogger;

impl Log for ProcessLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
