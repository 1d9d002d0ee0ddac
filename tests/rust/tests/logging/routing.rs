//! Records reach only the file of the handle that emitted them

use pretty_assertions::assert_eq;
use tests::fixtures::TestLogs;

#[test]
fn record_lands_in_own_file_only() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        let a = logs.hub.get_logger("a", "INFO", None).unwrap();
        let _b = logs.hub.get_logger("b", "INFO", None).unwrap();
        funlog::info!(a, "hello");
    });

    let a_lines = logs.lines("a");
    assert_eq!(a_lines.len(), 1);
    let line = &a_lines[0];

    // 2024-01-02 03:04:05.678 |INFO    | logging::routing : routing:  NN | a | - hello
    let (timestamp, rest) = line.split_at(23);
    assert_eq!(timestamp.len(), "YYYY-MM-DD HH:mm:ss.SSS".len());
    assert_eq!(&timestamp[4..5], "-");
    assert_eq!(&timestamp[19..20], ".");
    assert!(rest.starts_with(" |INFO    | logging::routing : routing:"));
    assert!(rest.ends_with(" | a | - hello"));

    assert_eq!(logs.read("b"), "");
}

#[test]
fn all_log_receives_every_named_record() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        let a = logs.hub.get_logger("a", "INFO", None).unwrap();
        let b = logs.hub.get_logger("b", "INFO", None).unwrap();
        funlog::info!(a, "from a");
        funlog::warn!(b, "from b");
    });

    let all = logs.lines("all");
    assert_eq!(all.len(), 2);
    assert!(all[0].contains("|INFO    |"));
    assert!(all[0].ends_with("| a | - from a"));
    assert!(all[1].contains("|WARNING |"));
    assert!(all[1].ends_with("| b | - from b"));
}

#[test]
fn untagged_events_only_reach_all_log() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        logs.hub.get_logger("a", "INFO", None).unwrap();
        tracing::info!("plain tracing event");
    });

    assert_eq!(logs.read("a"), "");
    let all = logs.lines("all");
    assert_eq!(all.len(), 1);
    assert!(all[0].ends_with("|  | - plain tracing event"));
}

#[test]
fn per_logger_level_and_format() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        let verbose = logs
            .hub
            .get_logger("verbose", "DEBUG", Some("{level}:{message}"))
            .unwrap();
        let strict = logs
            .hub
            .get_logger("strict", "ERROR", Some("{level}:{message}"))
            .unwrap();

        funlog::debug!(verbose, "details");
        funlog::info!(strict, "ignored");
        funlog::error!(strict, "failed {}", 42);
        funlog::log!(verbose, funlog::Level::Warning, "dynamic");
    });

    assert_eq!(logs.lines("verbose"), vec!["DEBUG:details", "WARNING:dynamic"]);
    assert_eq!(logs.lines("strict"), vec!["ERROR:failed 42"]);
    // all.log stays at INFO
    assert!(!logs.read("all").contains("details"));
}

#[test]
fn structured_fields_available_as_extra() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        let jobs = logs
            .hub
            .get_logger("jobs", "INFO", Some("{extra[queue]} {extra[module_name]} {message}"))
            .unwrap();
        funlog::info!(jobs, queue = "high", "drained");
    });

    assert_eq!(logs.lines("jobs"), vec!["high jobs drained"]);
}
