//! Installed-sink slot.
//!
//! # Responsibilities
//! - Hold the currently installed sink (or none)
//! - Deliver events, isolating the caller from sink errors and panics
//!
//! # Design Decisions
//! - Lock-free slot via `arc-swap`; reads vastly outnumber writes
//! - A detached delivery captures the sink at emit time, so a concurrent
//!   `clear` does not stop an event already in flight

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::observability::metrics;
use crate::sink::{LogEvent, LogSink};

struct Installed(Arc<dyn LogSink>);

/// Per-client log sink slot.
#[derive(Default)]
pub struct SinkRegistry {
    slot: ArcSwapOption<Installed>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a sink, replacing any previous one. `None` clears.
    pub fn set(&self, sink: Option<Arc<dyn LogSink>>) {
        self.slot.store(sink.map(|s| Arc::new(Installed(s))));
    }

    pub fn get(&self) -> Option<Arc<dyn LogSink>> {
        self.slot.load_full().map(|installed| Arc::clone(&installed.0))
    }

    pub fn clear(&self) {
        self.slot.store(None);
    }

    pub fn is_installed(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Deliver an event on the current task. No-op without a sink.
    pub fn emit(&self, event: LogEvent) {
        if let Some(sink) = self.get() {
            deliver(sink.as_ref(), &event);
        }
    }

    /// Deliver an event from a detached tokio task; falls back to inline
    /// delivery outside a runtime.
    pub fn emit_detached(&self, event: LogEvent) {
        let Some(sink) = self.get() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    deliver(sink.as_ref(), &event);
                });
            }
            Err(_) => deliver(sink.as_ref(), &event),
        }
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("installed", &self.is_installed())
            .finish()
    }
}

fn deliver(sink: &dyn LogSink, event: &LogEvent) {
    match catch_unwind(AssertUnwindSafe(|| sink.log(event))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            metrics::record_sink_failure(event.name());
            tracing::warn!(event = event.name(), call_id = event.call_id(), error = %e, "Log sink failed");
        }
        Err(_) => {
            metrics::record_sink_failure(event.name());
            tracing::warn!(event = event.name(), call_id = event.call_id(), "Log sink panicked");
        }
    }
}
