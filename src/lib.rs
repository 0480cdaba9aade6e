//! Instrumented HTTP client.
//!
//! Forwards requests to an HTTP transport, optionally records
//! request/response/error events to a pluggable log sink, and optionally
//! lets an "automock" hook answer requests in place of the transport.

pub mod automock;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod sink;
pub mod transport;

pub use automock::ExecutorHandle;
pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{Method, RequestDescriptor, RequestOptions, ResponseBody, ResponseRecord, SessionContext};
pub use sink::{LogEvent, LogSink, TracingSink};
