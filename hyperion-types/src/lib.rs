//! Shared types for the Hyperion forensic report client.
//!
//! The report backend turns a signed oracle reading into a natural-language
//! forensic report. This crate holds everything both client modes agree on:
//! the request body, the whole-document report, the health status, the
//! error taxonomy, request validation, and the [`ReportStream`] handle the
//! streaming mode hands back to callers.

pub mod error;
pub mod stream;
pub mod types;
pub mod units;
pub mod validation;

pub use error::*;
pub use stream::*;
pub use types::*;
pub use units::*;
pub use validation::*;
