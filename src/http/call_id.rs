//! Unique call identifiers.
//!
//! # Responsibilities
//! - Generate one opaque id per outbound call
//! - Stamp it with a microsecond local-time creation timestamp
//!
//! # Design Decisions
//! - UUID v4 in simple form, uppercased: 32 chars of `[0-9A-Z]`
//! - Timestamp format `YYYY-MM-DD HH:MM:SS.ffffff` (local time)

use std::fmt;

use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Correlation key threaded through the request/response/error events
/// of a single call. Never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallId {
    id: String,
    created_at: String,
}

impl CallId {
    /// Generate a fresh id stamped with the current time.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string().to_ascii_uppercase(),
            created_at: micro_timestamp(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation time, `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Current local time with microsecond precision.
pub fn micro_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
