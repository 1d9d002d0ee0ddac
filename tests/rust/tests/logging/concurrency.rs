//! Concurrent acquisition and emission

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use tests::fixtures::TestLogs;

#[test]
fn racing_first_acquisition_registers_one_sink() {
    let logs = Arc::new(TestLogs::new());
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let logs = Arc::clone(&logs);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                logs.hub.get_logger("race", "INFO", None).unwrap()
            })
        })
        .collect();

    let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(loggers.iter().all(|l| Arc::ptr_eq(l, &loggers[0])));
    assert_eq!(logs.hub.sinks_for("race"), 1);
    assert_eq!(logs.hub.logger_count(), 1);
}

#[test]
fn concurrent_writers_produce_whole_lines() {
    let logs = Arc::new(TestLogs::new());
    let logger = logs
        .hub
        .get_logger("shared", "INFO", Some("{message}"))
        .unwrap();

    let threads = 8;
    let per_thread = 50;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logs = Arc::clone(&logs);
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                logs.scoped(|| {
                    for i in 0..per_thread {
                        funlog::info!(logger, "thread-{}-line-{}", t, i);
                    }
                })
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = logs.lines("shared");
    assert_eq!(lines.len(), threads * per_thread);

    let unique: HashSet<_> = lines.iter().collect();
    assert_eq!(unique.len(), threads * per_thread);
    assert!(lines.iter().all(|l| l.starts_with("thread-")));
}
