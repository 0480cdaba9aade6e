//! Metrics collection.
//!
//! # Metrics
//! - `http_client_requests_total` (counter): calls by method
//! - `http_client_responses_total` (counter): responses by status
//! - `http_client_errors_total` (counter): failures by kind
//! - `http_client_automock_hits_total` (counter): calls answered by a hook
//! - `http_client_sink_failures_total` (counter): sink errors by event
//!
//! # Design Decisions
//! - No exporter here; binaries pick their own recorder

use metrics::counter;

pub fn record_request(method: &str) {
    counter!("http_client_requests_total", "method" => method.to_string()).increment(1);
}

pub fn record_response(status: u16) {
    counter!("http_client_responses_total", "status" => status.to_string()).increment(1);
}

pub fn record_error(kind: &'static str) {
    counter!("http_client_errors_total", "kind" => kind).increment(1);
}

pub fn record_automock_hit() {
    counter!("http_client_automock_hits_total").increment(1);
}

pub fn record_sink_failure(event: &'static str) {
    counter!("http_client_sink_failures_total", "event" => event).increment(1);
}
