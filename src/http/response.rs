//! Response normalization.
//!
//! # Responsibilities
//! - Decide whether a body is parsed as JSON
//! - Reduce the transport response to body, header list and status
//!
//! # Design Decisions
//! - Non-2xx statuses are ordinary records, never errors
//! - Without a JSON flag, a JSON content-type with an unparseable body is a
//!   parse error
//! - `json: true` (explicit or implied by an object body) parses leniently
//!   and falls back to text whatever the content-type
//! - Empty bodies are never parsed

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::transport::RawResponse;

/// How a response body is turned into a [`ResponseBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Caller set `json: false`.
    Never,
    /// No flag: parse only when the content-type says JSON.
    ContentType,
    /// Caller (or an object body) set `json: true`.
    Lenient,
}

impl ParseMode {
    pub fn from_flag(json: Option<bool>) -> Self {
        match json {
            Some(false) => ParseMode::Never,
            Some(true) => ParseMode::Lenient,
            None => ParseMode::ContentType,
        }
    }
}

/// Response body as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

impl ResponseBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        ResponseBody::Text(text.to_string())
    }
}

impl From<String> for ResponseBody {
    fn from(text: String) -> Self {
        ResponseBody::Text(text)
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        ResponseBody::Json(value)
    }
}

/// Normalized response: body, ordered header list and status code only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub body: ResponseBody,
    pub headers: Vec<(String, String)>,
    pub status_code: u16,
}

impl ResponseRecord {
    /// Build a record by hand, e.g. from an automock hook.
    pub fn new(status_code: u16, body: impl Into<ResponseBody>) -> Self {
        Self {
            body: body.into(),
            headers: Vec::new(),
            status_code,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Deserialize the body into `T`. Text bodies are parsed first.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let value = match &self.body {
            ResponseBody::Json(value) => T::deserialize(value)?,
            ResponseBody::Text(text) => serde_json::from_str(text)?,
        };
        Ok(value)
    }

    /// Normalize a raw transport response.
    pub fn from_raw(raw: RawResponse, mode: ParseMode) -> ClientResult<Self> {
        let content_type_json = raw
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-type"))
            .is_some_and(|(_, v)| is_json_content_type(v));
        let text = String::from_utf8_lossy(&raw.body).into_owned();

        let body = if text.is_empty() {
            ResponseBody::Text(text)
        } else {
            match mode {
                ParseMode::Never => ResponseBody::Text(text),
                ParseMode::Lenient => match serde_json::from_str(&text) {
                    Ok(value) => ResponseBody::Json(value),
                    Err(_) => ResponseBody::Text(text),
                },
                ParseMode::ContentType if content_type_json => ResponseBody::Json(serde_json::from_str(&text)?),
                ParseMode::ContentType => ResponseBody::Text(text),
            }
        };

        Ok(Self {
            body,
            headers: raw.headers,
            status_code: raw.status,
        })
    }
}

/// `application/json` or any `+json` suffix type, parameters ignored.
pub fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.contains('/') && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use serde_json::json;

    fn raw(content_type: &str, body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("+json"));
    }

    #[test]
    fn parses_json_content_type() {
        let record = ResponseRecord::from_raw(raw("application/json", r#"{"foo":"bar"}"#), ParseMode::ContentType).unwrap();
        assert_eq!(record.body, ResponseBody::Json(json!({"foo": "bar"})));
    }

    #[test]
    fn json_false_keeps_text() {
        let record = ResponseRecord::from_raw(raw("application/json", r#"{"foo":"bar"}"#), ParseMode::Never).unwrap();
        assert_eq!(record.body.as_text(), Some(r#"{"foo":"bar"}"#));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = ResponseRecord::from_raw(raw("application/json", "foo"), ParseMode::ContentType).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn lenient_parses_untyped_json_and_falls_back() {
        let record = ResponseRecord::from_raw(raw("text/plain", "[1,2]"), ParseMode::Lenient).unwrap();
        assert_eq!(record.body, ResponseBody::Json(json!([1, 2])));

        let record = ResponseRecord::from_raw(raw("text/plain", "foo"), ParseMode::Lenient).unwrap();
        assert_eq!(record.body.as_text(), Some("foo"));
    }

    #[test]
    fn lenient_keeps_invalid_json_content_as_text() {
        let record = ResponseRecord::from_raw(raw("application/json", "foo"), ParseMode::Lenient).unwrap();
        assert_eq!(record.body.as_text(), Some("foo"));
    }

    #[test]
    fn text_content_type_not_parsed_by_default() {
        let record = ResponseRecord::from_raw(raw("text/html", "[1,2]"), ParseMode::ContentType).unwrap();
        assert_eq!(record.body.as_text(), Some("[1,2]"));
    }

    #[test]
    fn empty_json_body_stays_text() {
        let record = ResponseRecord::from_raw(raw("application/json", ""), ParseMode::ContentType).unwrap();
        assert_eq!(record.body.as_text(), Some(""));
    }

    #[test]
    fn header_lookup_and_typed_body() {
        #[derive(serde::Deserialize)]
        struct Foo {
            foo: String,
        }
        let record = ResponseRecord::new(404, json!({"foo": "bar"})).with_header("X-Trace", "abc");
        assert_eq!(record.header("x-trace"), Some("abc"));
        assert!(!record.is_success());
        assert_eq!(record.json::<Foo>().unwrap().foo, "bar");
    }

    #[test]
    fn serializes_untagged_body() {
        let record = ResponseRecord::new(200, "foo");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"body": "foo", "headers": [], "statusCode": 200})
        );
    }
}
