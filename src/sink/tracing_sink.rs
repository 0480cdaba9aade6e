//! Sink that writes events to the process log through `tracing`.

use crate::sink::{LogEvent, LogSink, SinkError};

/// Forwards each event as an `info` record on the
/// `immutable_http_client::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, event: &LogEvent) -> Result<(), SinkError> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(
            target: "immutable_http_client::events",
            event = event.name(),
            call_id = event.call_id(),
            payload = %payload,
            "http event"
        );
        Ok(())
    }
}
