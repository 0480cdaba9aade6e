//! Transport subsystem.
//!
//! # Responsibilities
//! - Define the seam between the executor and the wire (`Transport`)
//! - Carry a prepared request in and a fully-read response out
//! - Provide the reqwest-backed default implementation
//!
//! # Design Decisions
//! - DNS, TLS, pooling, timeouts and redirects belong to the transport
//! - Non-2xx statuses are returned as responses, never as errors
//! - Bodies are read fully; there is no streaming

mod reqwest_client;

use futures_util::future::BoxFuture;
use reqwest::header::HeaderMap;
use reqwest::Method;
use thiserror::Error;
use url::Url;

pub use reqwest_client::ReqwestTransport;

/// A validated, normalized request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response as read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header list in `HeaderMap` iteration order: names lowercased,
    /// repeated names grouped together.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Performs one HTTP round-trip.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<RawResponse, TransportError>>;
}
