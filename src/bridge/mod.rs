//! Bridge from the `log` facade.
//!
//! [`LogBridge`] is a `log::Log` implementation that turns `log` records
//! into [`LogRecord`]s and hands them to a [`LogEventForwarder`]. It can
//! also pass every record on to a destination logger, so the usual console
//! output keeps working.

use std::cell::Cell;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::client::ErrorTracker;
use crate::forwarder::LogEventForwarder;
use crate::log_error;
use crate::log_info;
use crate::logging::structured::LogContext;
use crate::record::{Level, LogRecord};

thread_local! {
    static FORWARDING: Cell<bool> = Cell::new(false);
}

fn is_forwarding() -> bool {
    FORWARDING.with(Cell::get)
}

/// Marks the current thread as forwarding until dropped.
struct ForwardingGuard;

impl ForwardingGuard {
    fn enter() -> Self {
        FORWARDING.with(|flag| flag.set(true));
        ForwardingGuard
    }
}

impl Drop for ForwardingGuard {
    fn drop(&mut self) {
        FORWARDING.with(|flag| flag.set(false));
    }
}

/// Records from this crate's own diagnostics are never forwarded.
fn is_own_target(target: &str) -> bool {
    let own = module_path!().split("::").next();
    target.split("::").next() == own
}

/// Convert a `log` record. The target becomes the channel; source
/// location goes into the top-level extra bag.
pub fn to_log_record(record: &log::Record<'_>) -> LogRecord {
    let mut entry = LogRecord::new(
        Level::from(record.level()),
        record.target(),
        &record.args().to_string(),
    );
    if let Some(module_path) = record.module_path() {
        entry
            .extra
            .insert("module_path".to_string(), Value::from(module_path));
    }
    if let Some(file) = record.file() {
        entry.extra.insert("file".to_string(), Value::from(file));
    }
    if let Some(line) = record.line() {
        entry.extra.insert("line".to_string(), Value::from(line));
    }
    entry
}

/// Shared access to an installed bridge's forwarder.
pub struct BridgeHandle<T> {
    forwarder: Arc<RwLock<LogEventForwarder<T>>>,
}

impl<T> Clone for BridgeHandle<T> {
    fn clone(&self) -> Self {
        Self {
            forwarder: Arc::clone(&self.forwarder),
        }
    }
}

impl<T: ErrorTracker> BridgeHandle<T> {
    /// Change forwarder settings while the bridge is live.
    pub fn configure<F>(&self, f: F)
    where
        F: FnOnce(&mut LogEventForwarder<T>),
    {
        let mut forwarder = self.forwarder.write();
        f(&mut *forwarder)
    }

    pub fn with_forwarder<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LogEventForwarder<T>) -> R,
    {
        // Recursive: may run inside a capture that already holds a read.
        let forwarder = self.forwarder.read_recursive();
        f(&*forwarder)
    }
}

pub struct LogBridge<T> {
    forwarder: Arc<RwLock<LogEventForwarder<T>>>,
    dest: Option<Box<dyn log::Log>>,
}

impl<T> LogBridge<T>
where
    T: ErrorTracker + Send + Sync + 'static,
{
    pub fn new(forwarder: LogEventForwarder<T>) -> Self {
        Self {
            forwarder: Arc::new(RwLock::new(forwarder)),
            dest: None,
        }
    }

    /// Pass every record to `dest` as well.
    pub fn with_dest(mut self, dest: Box<dyn log::Log>) -> Self {
        self.dest = Some(dest);
        self
    }

    /// Use an `env_logger` configured from `RUST_LOG` as destination.
    pub fn with_env_logger_dest(self) -> Self {
        let logger = env_logger::Builder::from_env(env_logger::Env::default())
            .format_timestamp_millis()
            .build();
        self.with_dest(Box::new(logger))
    }

    pub fn handle(&self) -> BridgeHandle<T> {
        BridgeHandle {
            forwarder: Arc::clone(&self.forwarder),
        }
    }

    /// Register as the global logger.
    pub fn install(
        self,
        max_level: log::LevelFilter,
    ) -> Result<BridgeHandle<T>, log::SetLoggerError> {
        let handle = self.handle();
        let min_level = handle.with_forwarder(|f| f.level());

        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);

        log_info!(
            LogContext::new(),
            "BRIDGE_INSTALLED",
            max_level = max_level,
            min_level = min_level,
        );
        Ok(handle)
    }
}

impl<T> log::Log for LogBridge<T>
where
    T: ErrorTracker + Send + Sync + 'static,
{
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        let dest_enabled = self
            .dest
            .as_ref()
            .map(|dest| dest.enabled(metadata))
            .unwrap_or(false);
        if dest_enabled || is_forwarding() || is_own_target(metadata.target()) {
            return dest_enabled;
        }
        // Recursive so a queued `configure` writer cannot block a caller
        // that already holds a read.
        self.forwarder
            .read_recursive()
            .is_handling(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Some(dest) = &self.dest {
            if dest.enabled(record.metadata()) {
                dest.log(record);
            }
        }

        // Anything logged while forwarding (the client's own logs, this
        // crate's diagnostics) only goes to the destination.
        if is_own_target(record.target()) || is_forwarding() {
            return;
        }

        let forwarder = self.forwarder.read_recursive();
        if !forwarder.is_handling(record.level().into()) {
            return;
        }

        let result = {
            let _guard = ForwardingGuard::enter();
            forwarder.handle(to_log_record(record))
        };

        if let Err(err) = result {
            log_error!(
                LogContext::new().with_channel(record.target()),
                "FORWARD_FAILED",
                error = err.to_string(),
            );
        }
    }

    fn flush(&self) {
        if let Some(dest) = &self.dest {
            dest.flush();
        }
    }
}
