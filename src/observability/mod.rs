//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → /mocky/metrics (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the HTTP layer's spans
//! - Metrics are optional (`--otel`) and free when disabled

pub mod logging;
pub mod metrics;

pub use metrics::Telemetry;
