//! Sink registry and memoized named loggers

use super::log_dir::ensure_log_dir;
use crate::domain::{LogConfig, ALL_LOG_STEM};
use crate::format::{Template, DEFAULT_FORMAT, DEFAULT_FORMAT_COLOR};
use crate::layer::SinkLayer;
use crate::logger::NamedLogger;
use crate::sink::{Destination, FilePolicy, NameFilter, RotatingFile, Sink, SinkInfo};
use crate::{Error, Level, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Memoization key: the full, normalized argument tuple of `get_logger`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LoggerKey {
    name: String,
    level: Level,
    formatter: Option<String>,
}

/// Owner of every handler registration and every handed-out logger.
///
/// Lifecycle: [`LogHub::new`] registers the console and `all.log` handlers;
/// [`LogHub::get_logger`] appends one filtered file handler per distinct
/// request. Handlers are never removed or changed, and the logger cache is
/// never invalidated. Records reach the handlers through [`LogHub::layer`].
#[derive(Debug)]
pub struct LogHub {
    config: LogConfig,
    started: Instant,
    sinks: Arc<RwLock<Vec<Arc<Sink>>>>,
    files: Mutex<HashMap<PathBuf, Arc<Mutex<RotatingFile>>>>,
    loggers: DashMap<LoggerKey, Arc<NamedLogger>>,
}

impl LogHub {
    /// Create the log directory and the two default handlers.
    ///
    /// Nothing is kept if any step fails.
    pub fn new(config: LogConfig) -> Result<Self> {
        ensure_log_dir(&config.log_dir)?;

        let hub = Self {
            started: Instant::now(),
            sinks: Arc::new(RwLock::new(Vec::new())),
            files: Mutex::new(HashMap::new()),
            loggers: DashMap::new(),
            config,
        };

        let mut defaults = Vec::with_capacity(2);
        if hub.config.console {
            defaults.push(Sink::new(
                Destination::Stderr,
                Template::parse(DEFAULT_FORMAT_COLOR)?,
                hub.config.console_level,
                true,
            ));
        }

        let all_file = hub.file_for(hub.config.all_log_path(), hub.all_policy())?;
        defaults.push(Sink::new(
            Destination::File(all_file),
            Template::parse(DEFAULT_FORMAT)?,
            hub.config.all_level,
            false,
        ));

        hub.sinks
            .write()
            .extend(defaults.into_iter().map(Arc::new));
        Ok(hub)
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Layer to attach to a `tracing_subscriber::registry()`
    pub fn layer(&self) -> SinkLayer {
        SinkLayer::new(Arc::clone(&self.sinks), self.started)
    }

    /// Get (or create) the logger for `name`.
    ///
    /// The first request for a given (name, level, formatter) registers a
    /// rotating file sink at `<log_dir>/<name>.log` that only accepts records
    /// tagged with `name`. Later identical requests, including concurrent
    /// ones, return the same handle and register nothing.
    pub fn get_logger(
        &self,
        name: &str,
        level: &str,
        formatter: Option<&str>,
    ) -> Result<Arc<NamedLogger>> {
        let key = LoggerKey {
            name: name.to_string(),
            level: level.parse()?,
            formatter: formatter.map(str::to_string),
        };

        if let Some(logger) = self.loggers.get(&key).map(|l| Arc::clone(l.value())) {
            return Ok(logger);
        }

        // The shard stays locked until the entry is filled, so racing callers
        // with the same key wait here instead of registering a second sink
        let logger = match self.loggers.entry(key) {
            Entry::Occupied(entry) => return Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let key = entry.key();
                self.register_named_sink(&key.name, key.level, key.formatter.as_deref())?;
                let logger = Arc::new(NamedLogger::new(name));
                entry.insert(Arc::clone(&logger));
                logger
            }
        };

        tracing::debug!(logger = name, "registered named log sink");
        Ok(logger)
    }

    /// Snapshot of every registered handler, in registration order
    pub fn sinks(&self) -> Vec<SinkInfo> {
        self.sinks.read().iter().map(|sink| sink.info()).collect()
    }

    /// Number of handlers whose filter is bound to `name`
    pub fn sinks_for(&self, name: &str) -> usize {
        self.sinks
            .read()
            .iter()
            .filter(|sink| sink.filter().is_some_and(|f| f.name() == name))
            .count()
    }

    /// Number of distinct loggers handed out so far
    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    fn register_named_sink(&self, name: &str, level: Level, formatter: Option<&str>) -> Result<()> {
        validate_name(name)?;
        ensure_log_dir(&self.config.log_dir)?;

        let template = Template::parse(formatter.unwrap_or(DEFAULT_FORMAT))?;
        let file = self.file_for(self.config.log_path(name), self.named_policy())?;
        let sink = Sink::new(Destination::File(file), template, level, false)
            .with_filter(NameFilter::new(name));

        self.sinks.write().push(Arc::new(sink));
        Ok(())
    }

    /// One `RotatingFile` per path, shared by every sink writing there
    fn file_for(&self, path: PathBuf, policy: FilePolicy) -> Result<Arc<Mutex<RotatingFile>>> {
        let mut files = self.files.lock();
        if let Some(file) = files.get(&path) {
            return Ok(Arc::clone(file));
        }

        let file = Arc::new(Mutex::new(RotatingFile::open(&path, policy)?));
        files.insert(path, Arc::clone(&file));
        Ok(file)
    }

    fn all_policy(&self) -> FilePolicy {
        FilePolicy {
            rotation: self.config.rotation,
            compression: self.config.compression,
            retention: self.config.all_retention,
        }
    }

    fn named_policy(&self) -> FilePolicy {
        FilePolicy {
            rotation: self.config.rotation,
            compression: self.config.compression,
            retention: self.config.named_retention,
        }
    }
}

/// Names become file stems, so they must stay inside the log directory and
/// must not collide with `all.log`
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name == ALL_LOG_STEM
        || name.contains(['/', '\\'])
    {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}
