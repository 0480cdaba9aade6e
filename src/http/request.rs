//! Request descriptors and normalization.
//!
//! # Responsibilities
//! - Typed request options (method, headers, query, body, form, json flag)
//! - Caller session context (correlation fields, automock opt-out)
//! - Validate and normalize a descriptor into a transport request
//!
//! # Design Decisions
//! - Options are immutable per call; `prepare` never mutates them so the
//!   `httpRequest` event carries exactly what the caller passed
//! - Method defaults to GET
//! - Object/array bodies switch the JSON flag on unless it was set explicitly

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::{Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::http::response::ParseMode;
use crate::transport::TransportRequest;

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Transport options for a single call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_method"
    )]
    pub method: Option<Method>,

    /// Request headers in send order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,

    /// Query parameters appended to the URL.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,

    /// Request body. Strings are sent as-is unless JSON encoding is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Form fields, sent url-encoded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<(String, String)>,

    /// JSON flag: encodes the body as JSON and controls response parsing.
    /// `None` lets the client decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

fn serialize_method<S: Serializer>(method: &Option<Method>, s: S) -> Result<S::Ok, S::Error> {
    match method {
        Some(m) => s.serialize_str(m.as_str()),
        None => s.serialize_none(),
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = Some(json);
        self
    }

    /// Method actually sent, GET when unspecified.
    pub fn effective_method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    /// JSON flag after auto-detection: an object or array body turns it on
    /// unless the caller set it.
    pub fn effective_json(&self) -> Option<bool> {
        match (self.json, &self.body) {
            (Some(flag), _) => Some(flag),
            (None, Some(Value::Object(_) | Value::Array(_))) => Some(true),
            (None, _) => None,
        }
    }
}

/// Caller-supplied correlation fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_call_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// `Some(false)` bypasses an installed automock hook for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automock: Option<bool>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module_call_id(mut self, id: impl Into<String>) -> Self {
        self.module_call_id = Some(id.into());
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn automock(mut self, enabled: bool) -> Self {
        self.automock = Some(enabled);
        self
    }

    /// Whether an installed hook may intercept this call.
    pub fn automock_enabled(&self) -> bool {
        self.automock != Some(false)
    }
}

/// Everything the executor needs for one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub options: RequestOptions,
    pub session: SessionContext,
}

/// A validated descriptor, ready for the transport.
#[derive(Debug)]
pub struct PreparedRequest {
    pub request: TransportRequest,
    pub parse_mode: ParseMode,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    /// Validate and normalize into a transport request.
    ///
    /// Fails with [`ClientError::InvalidArgument`] on a malformed URL or
    /// header, a body combined with form fields, or a non-string body with
    /// JSON encoding disabled.
    pub fn prepare(&self) -> ClientResult<PreparedRequest> {
        let options = &self.options;

        let mut url = Url::parse(&self.url)
            .map_err(|e| ClientError::invalid(format!("invalid URL '{}': {}", self.url, e)))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(options.query.iter());
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::invalid(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::invalid(format!("invalid value for header '{}': {}", name, e)))?;
            headers.append(name, value);
        }

        let json = options.effective_json();
        let body = match (options.body.as_ref().filter(|b| !b.is_null()), options.form.is_empty()) {
            (Some(_), false) => {
                return Err(ClientError::invalid("body and form are mutually exclusive"));
            }
            (Some(body), true) => Some(encode_body(body, json, &mut headers)?),
            (None, false) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(options.form.iter())
                    .finish();
                set_default_content_type(&mut headers, FORM_URLENCODED);
                Some(encoded.into_bytes())
            }
            (None, true) => None,
        };

        Ok(PreparedRequest {
            request: TransportRequest {
                method: options.effective_method(),
                url,
                headers,
                body,
            },
            parse_mode: ParseMode::from_flag(json),
        })
    }
}

fn encode_body(body: &Value, json: Option<bool>, headers: &mut HeaderMap) -> ClientResult<Vec<u8>> {
    if json == Some(true) {
        set_default_content_type(headers, APPLICATION_JSON);
        return Ok(serde_json::to_vec(body)?);
    }
    match body {
        Value::String(text) => Ok(text.clone().into_bytes()),
        Value::Number(_) | Value::Bool(_) => Ok(body.to_string().into_bytes()),
        _ => Err(ClientError::invalid(
            "object and array bodies require JSON encoding",
        )),
    }
}

fn set_default_content_type(headers: &mut HeaderMap, value: &'static str) {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
    }
}
