//! Typed log events.
//!
//! Field names serialize to the camelCase keys log consumers expect
//! (`httpRequestId`, `httpResponseStatusCode`, ...).

use serde::Serialize;
use serde_json::Value;

use crate::http::{CallId, RequestDescriptor, ResponseBody, ResponseRecord};
use crate::http::{micro_timestamp, RequestOptions};

/// Emitted once per call, before the transport (or hook) runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestEvent {
    pub http_request_create_time: String,
    pub http_request_id: String,
    pub http_request_method: String,
    pub http_request_url: String,
    pub options: RequestOptions,
    pub module_call_id: Option<String>,
    pub request_id: Option<String>,
}

/// Emitted after a successful round-trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponseEvent {
    pub http_request_id: String,
    pub http_response_body: ResponseBody,
    pub http_response_headers: Vec<(String, String)>,
    pub http_response_create_time: String,
    pub http_response_status_code: u16,
}

/// Emitted when the transport or body parsing fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestErrorEvent {
    pub http_request_id: String,
    pub http_request_error_create_time: String,
    pub http_request_error: String,
}

/// One of the three events a call can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogEvent {
    HttpRequest(HttpRequestEvent),
    HttpResponse(HttpResponseEvent),
    HttpRequestError(HttpRequestErrorEvent),
}

impl LogEvent {
    pub const HTTP_REQUEST: &'static str = "httpRequest";
    pub const HTTP_RESPONSE: &'static str = "httpResponse";
    pub const HTTP_REQUEST_ERROR: &'static str = "httpRequestError";

    pub fn request(call_id: &CallId, descriptor: &RequestDescriptor) -> Self {
        LogEvent::HttpRequest(HttpRequestEvent {
            http_request_create_time: call_id.created_at().to_string(),
            http_request_id: call_id.id().to_string(),
            http_request_method: descriptor.options.effective_method().as_str().to_uppercase(),
            http_request_url: descriptor.url.clone(),
            options: descriptor.options.clone(),
            module_call_id: descriptor.session.module_call_id.clone(),
            request_id: descriptor.session.request_id.clone(),
        })
    }

    pub fn response(call_id: &CallId, record: &ResponseRecord) -> Self {
        LogEvent::HttpResponse(HttpResponseEvent {
            http_request_id: call_id.id().to_string(),
            http_response_body: record.body.clone(),
            http_response_headers: record.headers.clone(),
            http_response_create_time: micro_timestamp(),
            http_response_status_code: record.status_code,
        })
    }

    pub fn error(call_id: &CallId, error: &dyn std::error::Error) -> Self {
        LogEvent::HttpRequestError(HttpRequestErrorEvent {
            http_request_id: call_id.id().to_string(),
            http_request_error_create_time: micro_timestamp(),
            http_request_error: error.to_string(),
        })
    }

    /// Event name as delivered to sinks.
    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::HttpRequest(_) => Self::HTTP_REQUEST,
            LogEvent::HttpResponse(_) => Self::HTTP_RESPONSE,
            LogEvent::HttpRequestError(_) => Self::HTTP_REQUEST_ERROR,
        }
    }

    /// Correlation id shared by every event of one call.
    pub fn call_id(&self) -> &str {
        match self {
            LogEvent::HttpRequest(e) => &e.http_request_id,
            LogEvent::HttpResponse(e) => &e.http_request_id,
            LogEvent::HttpRequestError(e) => &e.http_request_id,
        }
    }

    /// Structured payload as a JSON object.
    pub fn payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, SessionContext};
    use serde_json::json;

    #[test]
    fn request_event_payload() {
        let call_id = CallId::new();
        let descriptor = RequestDescriptor::new("http://localhost/x")
            .with_options(RequestOptions::new().header("foo", "bar"))
            .with_session(SessionContext::new().module_call_id("m1").request_id("r1"));
        let event = LogEvent::request(&call_id, &descriptor);

        assert_eq!(event.name(), "httpRequest");
        assert_eq!(event.call_id(), call_id.id());
        let payload = event.payload();
        assert_eq!(payload["httpRequestMethod"], "GET");
        assert_eq!(payload["httpRequestUrl"], "http://localhost/x");
        assert_eq!(payload["httpRequestCreateTime"], call_id.created_at());
        assert_eq!(payload["options"], json!({"headers": [["foo", "bar"]]}));
        assert_eq!(payload["moduleCallId"], "m1");
        assert_eq!(payload["requestId"], "r1");
    }

    #[test]
    fn request_event_uses_given_method() {
        let descriptor = RequestDescriptor::new("http://localhost/")
            .with_options(RequestOptions::new().method(Method::DELETE));
        let payload = LogEvent::request(&CallId::new(), &descriptor).payload();
        assert_eq!(payload["httpRequestMethod"], "DELETE");
        assert_eq!(payload["moduleCallId"], Value::Null);
    }

    #[test]
    fn response_and_error_payloads() {
        let call_id = CallId::new();
        let record = ResponseRecord::new(201, json!({"ok": true})).with_header("content-type", "application/json");
        let payload = LogEvent::response(&call_id, &record).payload();
        assert_eq!(payload["httpRequestId"], call_id.id());
        assert_eq!(payload["httpResponseBody"], json!({"ok": true}));
        assert_eq!(payload["httpResponseHeaders"], json!([["content-type", "application/json"]]));
        assert_eq!(payload["httpResponseStatusCode"], 201);

        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let event = LogEvent::error(&call_id, &err);
        assert_eq!(event.name(), "httpRequestError");
        assert_eq!(event.payload()["httpRequestError"], "boom");
    }
}
