//! Request and response types.
//!
//! # Data Flow
//! ```text
//! caller (url, RequestOptions, SessionContext)
//!     → request.rs (RequestDescriptor::prepare: validate & normalize)
//!     → call_id.rs (one CallId per call, correlates log events)
//!     → [transport round-trip]
//!     → response.rs (parse body, keep body/headers/status only)
//!     → ResponseRecord to caller
//! ```

pub mod call_id;
pub mod request;
pub mod response;

pub use call_id::{micro_timestamp, CallId};
pub use request::{PreparedRequest, RequestDescriptor, RequestOptions, SessionContext};
pub use response::{is_json_content_type, ParseMode, ResponseBody, ResponseRecord};

pub use reqwest::Method;
