//! Named logger handles and the macros that emit through them

use std::fmt;

/// Handle bound to a logger name.
///
/// Every record emitted through it (see [`info!`](crate::info) and friends)
/// carries `module_name = <name>`, which is what routes the record into
/// `<log_dir>/<name>.log`. Handles are only handed out by
/// [`LogHub::get_logger`](crate::LogHub::get_logger) and are shared behind an
/// `Arc`.
#[derive(Debug, PartialEq, Eq)]
pub struct NamedLogger {
    name: String,
}

impl NamedLogger {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($level:expr, $logger:expr, $($arg:tt)+) => {{
        let logger: &$crate::NamedLogger = &$logger;
        $crate::__private::tracing::event!(
            $level,
            module_name = logger.name(),
            $($arg)+
        )
    }};
}

/// Emit a TRACE record through a [`NamedLogger`](crate::NamedLogger)
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($crate::__private::tracing::Level::TRACE, $logger, $($arg)+)
    };
}

/// Emit a DEBUG record through a [`NamedLogger`](crate::NamedLogger)
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($crate::__private::tracing::Level::DEBUG, $logger, $($arg)+)
    };
}

/// Emit an INFO record through a [`NamedLogger`](crate::NamedLogger)
///
/// ```ignore
/// let log = funlog::get_logger("worker", "INFO", None)?;
/// funlog::info!(log, "processed {} jobs", 3);
/// funlog::info!(log, queue = "high", "drained");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($crate::__private::tracing::Level::INFO, $logger, $($arg)+)
    };
}

/// Emit a WARNING record through a [`NamedLogger`](crate::NamedLogger)
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($crate::__private::tracing::Level::WARN, $logger, $($arg)+)
    };
}

/// Emit an ERROR record through a [`NamedLogger`](crate::NamedLogger)
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($crate::__private::tracing::Level::ERROR, $logger, $($arg)+)
    };
}

/// Emit a record at a level only known at runtime
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        match $level {
            $crate::Level::Trace => $crate::trace!($logger, $($arg)+),
            $crate::Level::Debug => $crate::debug!($logger, $($arg)+),
            $crate::Level::Info => $crate::info!($logger, $($arg)+),
            $crate::Level::Warning => $crate::warn!($logger, $($arg)+),
            $crate::Level::Error => $crate::error!($logger, $($arg)+),
        }
    };
}
