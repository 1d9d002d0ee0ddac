//! `tracing` layer that feeds records into the registered sinks

use crate::record::Record;
use crate::sink::Sink;
use crate::Level;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Dispatches every event to each sink that accepts it.
///
/// Obtained from [`LogHub::layer`](crate::LogHub::layer); it shares the hub's
/// handler list, so sinks registered later are picked up immediately.
#[derive(Clone)]
pub struct SinkLayer {
    sinks: Arc<RwLock<Vec<Arc<Sink>>>>,
    started: Instant,
}

impl SinkLayer {
    pub(crate) fn new(sinks: Arc<RwLock<Vec<Arc<Sink>>>>, started: Instant) -> Self {
        Self { sinks, started }
    }
}

impl<S: Subscriber> Layer<S> for SinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let sinks = self.sinks.read();
        let level = Level::from(*event.metadata().level());
        if !sinks.iter().any(|sink| level >= sink.level()) {
            return;
        }

        let record = Record::from_event(event, self.started);
        for sink in sinks.iter().filter(|sink| sink.accepts(&record)) {
            // Nowhere else to report a failing sink
            if let Err(e) = sink.emit(&record) {
                eprintln!("funlog: failed to write log record: {}", e);
            }
        }
    }
}
