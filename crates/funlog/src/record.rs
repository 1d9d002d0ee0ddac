//! Records captured from `tracing` events

use crate::Level;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::field::{Field, Visit};
use tracing::Event;

/// Field that carries the logger name bound to a handle
pub const MODULE_NAME_FIELD: &str = "module_name";

/// Everything a sink needs to render one line
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub elapsed: Duration,
    pub level: Level,
    /// Event target, normally the emitting module path
    pub name: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub message: String,
    /// Every structured field other than the message
    pub extra: BTreeMap<String, String>,
    pub thread: String,
    pub process: u32,
}

impl Record {
    /// Capture an event; `started` is the instant `{elapsed}` counts from
    pub fn from_event(event: &Event<'_>, started: Instant) -> Self {
        let metadata = event.metadata();
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        Self {
            time: Local::now(),
            elapsed: started.elapsed(),
            level: Level::from(*metadata.level()),
            name: metadata.target().to_string(),
            file: metadata.file().map(str::to_string),
            line: metadata.line(),
            message: visitor.message,
            extra: visitor.extra,
            thread: current_thread_name(),
            process: std::process::id(),
        }
    }

    /// Bare record, mostly useful for rendering outside of a subscriber
    pub fn new(level: Level, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            elapsed: Duration::ZERO,
            level,
            name: name.into(),
            file: None,
            line: None,
            message: message.into(),
            extra: BTreeMap::new(),
            thread: current_thread_name(),
            process: std::process::id(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Name bound by the emitting handle, if any
    pub fn module_name(&self) -> Option<&str> {
        self.extra.get(MODULE_NAME_FIELD).map(String::as_str)
    }

    /// File stem of the emitting source file (`worker` for `src/worker.rs`)
    pub fn module(&self) -> &str {
        self.file
            .as_deref()
            .and_then(|f| Path::new(f).file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// File name of the emitting source file
    pub fn file_name(&self) -> &str {
        self.file
            .as_deref()
            .and_then(|f| Path::new(f).file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

fn current_thread_name() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    extra: BTreeMap<String, String>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extra.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.extra
                .insert(field.name().to_string(), format!("{:?}", value));
        }
    }
}
