//! Client for the Hyperion forensic report backend.
//!
//! Two modes share one validated request type:
//!
//! - [`ForensicsClient::stream`] consumes the backend's SSE endpoint and
//!   hands back a [`ReportStream`] of report chunks as they are generated.
//! - [`ForensicsClient::generate`] fetches the whole report in one JSON
//!   response.
//!
//! [`ForensicsClient::health`] never fails; an unreachable backend is
//! reported as [`HealthStatus::offline`].

pub mod client;
pub mod config;
pub(crate) mod error;
pub mod streaming;
pub mod transport;

pub use client::ForensicsClient;
pub use config::{BackendConfig, ExecutionContext};
pub use streaming::demultiplex;
pub use transport::TransportReader;

// Re-export hyperion-types for convenience
pub use hyperion_types::{
    ForensicReport, ForensicReportRequest, ForensicsError, HealthStatus, OraclePayload,
    PolicyMetadata, ReportStream, StreamOutcome,
};
