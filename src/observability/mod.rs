//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! codec / convert / http handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (conversion counters)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for aggregation)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every HTTP span
//! - Metric updates are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
