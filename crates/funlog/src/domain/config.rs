//! Logger configuration and file policies

use crate::Level;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for all log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// File stem of the catch-all sink
pub const ALL_LOG_STEM: &str = "all";

/// When the active file is closed and a new one started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Every day at the given local wall-clock time
    Daily(NaiveTime),
    /// Once the active file would grow past this many bytes
    Size(u64),
    Never,
}

impl Rotation {
    pub fn midnight() -> Self {
        Self::Daily(NaiveTime::MIN)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::midnight()
    }
}

/// What happens to a file after rotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    #[default]
    Gzip,
    None,
}

/// How much rotated history to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// Delete rotated files older than this many days
    Days(u32),
    /// Keep only the newest N rotated files
    Count(usize),
    Forever,
}

/// Configuration for the global handlers and for every named sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Base directory for logs
    pub log_dir: PathBuf,

    /// Whether the colorized stderr sink is registered
    pub console: bool,

    /// Minimum level of the stderr sink
    pub console_level: Level,

    /// Minimum level of the catch-all `all.log` sink
    pub all_level: Level,

    /// Rotation schedule shared by every file sink
    pub rotation: Rotation,

    /// Compression applied to rotated files
    pub compression: Compression,

    /// History kept for `all.log`
    pub all_retention: Retention,

    /// History kept for each `<name>.log`
    pub named_retention: Retention,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            console: true,
            console_level: Level::Info,
            all_level: Level::Info,
            rotation: Rotation::midnight(),
            compression: Compression::Gzip,
            all_retention: Retention::Days(30),
            named_retention: Retention::Days(7),
        }
    }
}

impl LogConfig {
    /// Default configuration rooted at another directory
    pub fn with_log_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the catch-all file
    pub fn all_log_path(&self) -> PathBuf {
        self.log_path(ALL_LOG_STEM)
    }

    /// Path of the file for a given stem
    pub fn log_path(&self, stem: &str) -> PathBuf {
        self.log_dir.join(format!("{}.log", stem))
    }
}
