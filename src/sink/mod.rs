//! Log sink subsystem.
//!
//! # Data Flow
//! ```text
//! executor
//!     → event.rs (typed httpRequest / httpResponse / httpRequestError)
//!     → registry.rs (installed sink, if any; failures swallowed)
//!     → LogSink::log (user-supplied, or tracing_sink.rs)
//! ```
//!
//! # Design Decisions
//! - No sink installed means no event is built or delivered
//! - Sink errors and panics never reach the caller of a request
//! - `httpResponse` is delivered from a detached task

pub mod event;
pub mod registry;
pub mod tracing_sink;

use std::sync::Arc;

pub use event::{HttpRequestErrorEvent, HttpRequestEvent, HttpResponseEvent, LogEvent};
pub use registry::SinkRegistry;
pub use tracing_sink::TracingSink;

/// Error a sink may report. Logged and discarded by the registry.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Destination for structured request/response/error events.
///
/// `httpRequest` and `httpRequestError` are delivered inline on the calling
/// task, so `log` must not block. Hand slow work (network, disk) off to a
/// channel or a spawned task.
pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, event: &LogEvent) -> Result<(), SinkError> {
        (**self).log(event)
    }
}
