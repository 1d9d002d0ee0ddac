//! Process-wide hub
//!
//! Every test here shares the one global hub of this test binary, rooted in a
//! temporary directory that lives as long as the process.

use funlog::LogConfig;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tempfile::TempDir;
use tests::fixtures::quiet_config;

static LOG_DIR: Lazy<TempDir> = Lazy::new(|| tempfile::tempdir().expect("create temp dir"));

fn setup() -> &'static funlog::LogHub {
    funlog::init_with(quiet_config(LOG_DIR.path())).expect("init global hub")
}

fn read(stem: &str) -> String {
    std::fs::read_to_string(LOG_DIR.path().join(format!("{}.log", stem))).unwrap_or_default()
}

#[test]
fn get_logger_is_memoized_globally() {
    let hub = setup();

    let first = funlog::get_logger("global-worker", "INFO", None).unwrap();
    let second = funlog::get_logger("global-worker", "INFO", None).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(hub.sinks_for("global-worker"), 1);
}

#[test]
fn camel_case_alias_shares_the_cache() {
    setup();

    let snake = funlog::get_logger("alias", "INFO", None).unwrap();
    let camel = funlog::getLogger("alias", "INFO", None).unwrap();
    assert!(Arc::ptr_eq(&snake, &camel));
}

#[test]
fn default_logger_uses_default_name() {
    setup();

    let logger = funlog::default_logger().unwrap();
    assert_eq!(logger.name(), funlog::DEFAULT_NAME);
    let again = funlog::get_logger("default", "INFO", None).unwrap();
    assert!(Arc::ptr_eq(&logger, &again));
}

#[test]
fn records_go_through_the_global_subscriber() {
    setup();

    let logger = funlog::get_logger("global-io", "INFO", None).unwrap();
    funlog::info!(logger, "through the global dispatcher");

    assert!(read("global-io").ends_with("| global-io | - through the global dispatcher\n"));
    assert!(read("all").contains("through the global dispatcher"));
}

#[test]
fn later_init_returns_existing_hub() {
    let hub = setup();
    let other = tempfile::tempdir().unwrap();

    let again = funlog::init_with(LogConfig::with_log_dir(other.path())).unwrap();
    assert!(std::ptr::eq(hub, again));
    assert_eq!(again.config().log_dir, LOG_DIR.path());
    assert!(funlog::global().is_some());
}
