//! Process-wide hub
//!
//! The first call to [`init`], [`init_with`] or [`get_logger`] creates the
//! global [`LogHub`] and installs it as the global `tracing` subscriber. If
//! that fails nothing is installed and the error is returned; a later call
//! tries again.

use super::hub::LogHub;
use crate::domain::LogConfig;
use crate::logger::NamedLogger;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;

/// Name used when the caller does not pick one
pub const DEFAULT_NAME: &str = "default";

/// Level used when the caller does not pick one
pub const DEFAULT_LEVEL: &str = "INFO";

static GLOBAL: OnceCell<LogHub> = OnceCell::new();

/// Initialize with the default configuration (`./logs`)
pub fn init() -> Result<&'static LogHub> {
    init_with(LogConfig::default())
}

/// Initialize with `config`. Once a hub exists it is returned as is and
/// `config` is ignored.
pub fn init_with(config: LogConfig) -> Result<&'static LogHub> {
    GLOBAL.get_or_try_init(|| {
        let hub = LogHub::new(config)?;
        // Only the dispatcher is installed; a `log` logger the host already
        // set up is left alone
        let subscriber = tracing_subscriber::registry().with(hub.layer());
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| Error::SubscriberInstall(e.to_string()))?;
        Ok(hub)
    })
}

/// The global hub, if it has been initialized
pub fn global() -> Option<&'static LogHub> {
    GLOBAL.get()
}

/// Get a named logger from the global hub, initializing it if needed.
///
/// See [`LogHub::get_logger`].
pub fn get_logger(name: &str, level: &str, formatter: Option<&str>) -> Result<Arc<NamedLogger>> {
    init()?.get_logger(name, level, formatter)
}

/// Alias of [`get_logger`] kept for callers used to the camel-case name
#[allow(non_snake_case)]
pub fn getLogger(name: &str, level: &str, formatter: Option<&str>) -> Result<Arc<NamedLogger>> {
    get_logger(name, level, formatter)
}

/// `get_logger("default", "INFO", None)`
pub fn default_logger() -> Result<Arc<NamedLogger>> {
    get_logger(DEFAULT_NAME, DEFAULT_LEVEL, None)
}
