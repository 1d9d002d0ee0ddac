//! # funlog
//!
//! Named, file-backed, rotating loggers on top of `tracing`.
//!
//! On first use a global hub creates `./logs` (with a `.gitignore`), then
//! registers a colorized stderr handler and a rotating `logs/all.log`
//! handler. Each distinct [`get_logger`] request adds a rotating
//! `logs/<name>.log` handler that only receives records emitted through the
//! returned handle.
//!
//! ```ignore
//! let worker = funlog::get_logger("worker", "INFO", None)?;
//! funlog::info!(worker, "started {} threads", 4);
//! ```
//!
//! ## Modules
//!
//! - `domain` - Levels, configuration and file policies
//! - `format` - Line templates, time patterns and color markup
//! - `sink` - Handlers and rotating files
//! - `service` - Log directory setup, the hub and its global instance

pub mod domain;
mod error;
pub mod format;
mod layer;
mod logger;
pub mod record;
pub mod service;
pub mod sink;

pub use domain::*;
pub use error::{Error, Result};
pub use layer::SinkLayer;
pub use logger::NamedLogger;
pub use record::Record;
pub use service::*;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
