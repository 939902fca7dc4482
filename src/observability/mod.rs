//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer and config reloads produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The resolution engine stays silent; only the host records events
//! - Request ID flows through every request span
//! - Metric calls are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
