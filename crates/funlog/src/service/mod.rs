//! Services: directory setup, the sink hub and its global instance

mod global;
mod hub;
mod log_dir;

pub use global::*;
pub use hub::LogHub;
pub use log_dir::{ensure_log_dir, GITIGNORE_NAME};
