//! Observability for the Dawa catalog tools.
//!
//! This crate provides:
//! - `QueryId` - Identifier that correlates log lines and metrics of one query
//! - `StructuredLogger` - Structured logging with query context
//! - `QueryMetricsCollector` - Per-stage pipeline metrics via `StageObserver`

mod logging;
mod metrics;
mod query_id;

pub use logging::*;
pub use metrics::*;
pub use query_id::QueryId;
