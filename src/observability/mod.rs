//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! executor / sink registry produce:
//!     → logging.rs (tracing subscriber for the process log)
//!     → metrics.rs (counters via the `metrics` facade)
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or exporter on its own
//! - Call ID flows through every debug record of a call
//! - Metrics are cheap (facade no-ops without a recorder)

pub mod logging;
pub mod metrics;
