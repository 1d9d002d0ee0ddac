//! Repeated acquisition returns the cached handle and adds no sinks

use std::sync::Arc;
use tests::fixtures::TestLogs;

#[test]
fn same_arguments_return_same_handle() {
    let logs = TestLogs::new();

    let first = logs.hub.get_logger("worker", "INFO", None).unwrap();
    let sinks_after_first = logs.hub.sinks().len();
    let second = logs.hub.get_logger("worker", "INFO", None).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(logs.hub.sinks().len(), sinks_after_first);
    assert_eq!(logs.hub.sinks_for("worker"), 1);
}

#[test]
fn both_handles_log_identically() {
    let logs = TestLogs::new();

    logs.scoped(|| {
        let first = logs.hub.get_logger("worker", "INFO", Some("{message}")).unwrap();
        let second = logs.hub.get_logger("worker", "INFO", Some("{message}")).unwrap();
        funlog::info!(first, "one");
        funlog::info!(second, "two");
    });

    // a duplicate sink would have written every line twice
    assert_eq!(logs.lines("worker"), vec!["one", "two"]);
}

#[test]
fn distinct_names_get_distinct_handles() {
    let logs = TestLogs::new();

    let a = logs.hub.get_logger("a", "INFO", None).unwrap();
    let b = logs.hub.get_logger("b", "INFO", None).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.name(), "a");
    assert_eq!(b.name(), "b");
    assert_eq!(logs.hub.sinks_for("a"), 1);
    assert_eq!(logs.hub.sinks_for("b"), 1);
    assert!(logs.path("a").exists());
    assert!(logs.path("b").exists());
}

#[test]
fn marker_file_written_once() {
    let logs = TestLogs::new();
    for name in ["a", "b", "a", "c"] {
        logs.hub.get_logger(name, "INFO", None).unwrap();
    }

    let markers = std::fs::read_dir(logs.dir())
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_name() == ".gitignore")
        .count();
    assert_eq!(markers, 1);
}
