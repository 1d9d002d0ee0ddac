//! A host that already installed a `log` logger
//!
//! Kept in its own binary: both the `log` logger and the global hub are
//! process-wide.

use tests::fixtures::quiet_config;

struct HostLogger;

impl log::Log for HostLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, _: &log::Record<'_>) {}

    fn flush(&self) {}
}

static HOST: HostLogger = HostLogger;

#[test]
fn init_succeeds_next_to_existing_log_logger() {
    log::set_logger(&HOST).unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let temp_dir = tempfile::tempdir().unwrap();
    let logs = temp_dir.path().join("logs");

    let hub = funlog::init_with(quiet_config(&logs)).unwrap();
    assert!(funlog::global().is_some());
    assert!(tracing::dispatcher::has_been_set());

    let again = funlog::init_with(quiet_config(&logs)).unwrap();
    assert!(std::ptr::eq(hub, again));

    let logger = funlog::get_logger("host", "INFO", Some("{message}")).unwrap();
    funlog::info!(logger, "after the host logger");
    assert_eq!(
        std::fs::read_to_string(logs.join("host.log")).unwrap(),
        "after the host logger\n"
    );
}
