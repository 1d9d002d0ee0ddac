//! Shared test utilities and fixtures for funlog integration tests.

pub use funlog::{LogConfig, LogHub, NamedLogger};

/// Scratch log directories with a hub rooted in them
pub mod fixtures {
    use funlog::{LogConfig, LogHub};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tracing_subscriber::layer::SubscriberExt;

    /// A hub writing into its own temporary directory.
    ///
    /// The console handler is off so test output stays readable.
    pub struct TestLogs {
        pub hub: LogHub,
        dir: TempDir,
    }

    impl TestLogs {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().expect("create temp dir");
            let hub = LogHub::new(quiet_config(dir.path())).expect("create hub");
            Self { hub, dir }
        }

        pub fn dir(&self) -> &Path {
            self.dir.path()
        }

        pub fn path(&self, stem: &str) -> PathBuf {
            self.dir.path().join(format!("{}.log", stem))
        }

        /// Contents of `<stem>.log`, empty if the file does not exist
        pub fn read(&self, stem: &str) -> String {
            std::fs::read_to_string(self.path(stem)).unwrap_or_default()
        }

        pub fn lines(&self, stem: &str) -> Vec<String> {
            self.read(stem).lines().map(str::to_string).collect()
        }

        /// Run `f` with this hub as the thread's default subscriber
        pub fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
            let subscriber = tracing_subscriber::registry().with(self.hub.layer());
            tracing::subscriber::with_default(subscriber, f)
        }
    }

    impl Default for TestLogs {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn quiet_config(dir: &Path) -> LogConfig {
        LogConfig {
            console: false,
            ..LogConfig::with_log_dir(dir)
        }
    }
}
