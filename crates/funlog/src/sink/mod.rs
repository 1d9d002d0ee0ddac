//! Sinks: where rendered records go

mod rotating_file;

pub use rotating_file::{compress_log_file, FilePolicy, RotatingFile};

use crate::format::Template;
use crate::record::Record;
use crate::Level;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Output side of a sink
#[derive(Debug, Clone)]
pub enum Destination {
    Stderr,
    /// Shared between every sink that targets the same path
    File(Arc<Mutex<RotatingFile>>),
}

/// Accepts only records whose `module_name` equals the bound name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameFilter {
    name: String,
}

impl NameFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, record: &Record) -> bool {
        record.module_name() == Some(self.name.as_str())
    }
}

/// One registered handler
#[derive(Debug)]
pub struct Sink {
    destination: Destination,
    template: Template,
    level: Level,
    colorize: bool,
    filter: Option<NameFilter>,
}

impl Sink {
    pub fn new(destination: Destination, template: Template, level: Level, colorize: bool) -> Self {
        Self {
            destination,
            template,
            level,
            colorize,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: NameFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn filter(&self) -> Option<&NameFilter> {
        self.filter.as_ref()
    }

    pub fn accepts(&self, record: &Record) -> bool {
        record.level >= self.level && self.filter.as_ref().is_none_or(|f| f.accepts(record))
    }

    /// Render and write one record; callers check `accepts` first
    pub fn emit(&self, record: &Record) -> io::Result<()> {
        let line = self.template.render(record, self.colorize);
        match &self.destination {
            Destination::Stderr => {
                let stderr = io::stderr();
                let mut handle = stderr.lock();
                writeln!(handle, "{}", line)
            }
            Destination::File(file) => file.lock().write_line(&line),
        }
    }

    pub fn info(&self) -> SinkInfo {
        let (path, policy) = match &self.destination {
            Destination::Stderr => (None, None),
            Destination::File(file) => {
                let file = file.lock();
                (Some(file.path().to_path_buf()), Some(file.policy()))
            }
        };
        SinkInfo {
            path,
            policy,
            format: self.template.source().to_string(),
            level: self.level,
            colorize: self.colorize,
            filter: self.filter.as_ref().map(|f| f.name().to_string()),
        }
    }
}

/// Snapshot of a sink registration
#[derive(Debug, Clone, PartialEq)]
pub struct SinkInfo {
    /// `None` for the stderr sink
    pub path: Option<PathBuf>,
    pub policy: Option<FilePolicy>,
    pub format: String,
    pub level: Level,
    pub colorize: bool,
    pub filter: Option<String>,
}
