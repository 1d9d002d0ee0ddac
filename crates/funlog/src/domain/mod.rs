//! Domain types: levels, configuration and file policies

pub mod config;
mod level;

pub use config::*;
pub use level::Level;
