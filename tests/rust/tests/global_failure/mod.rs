//! Failed global initialization leaves nothing installed
//!
//! Kept in its own binary so no other test initializes the global hub first.

use tests::fixtures::quiet_config;

#[test]
fn unwritable_location_fails_then_retry_succeeds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let blocker = temp_dir.path().join("plain-file");
    std::fs::write(&blocker, "").unwrap();

    let err = funlog::init_with(quiet_config(&blocker.join("logs"))).unwrap_err();
    assert!(matches!(err, funlog::Error::Io { .. }));
    assert!(funlog::global().is_none());
    assert!(!tracing::dispatcher::has_been_set());

    let logs = temp_dir.path().join("logs");
    funlog::init_with(quiet_config(&logs)).unwrap();
    assert!(funlog::global().is_some());
    assert!(tracing::dispatcher::has_been_set());
    assert!(logs.join("all.log").exists());
}
