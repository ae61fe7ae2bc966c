//! Error types for all hyperion crates.

/// Errors from forensic report operations.
///
/// Validation errors are raised before any I/O. Every other variant comes
/// out of a network exchange, either when the response arrives or on a later
/// pull of a [`ReportStream`](crate::ReportStream).
#[derive(Debug, thiserror::Error)]
pub enum ForensicsError {
    // Input errors
    /// The oracle payload failed local validation; no request was sent.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending payload key.
        field: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },

    // Transport errors
    /// Connection-level failure (refused, reset, aborted mid-stream).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The stream ended without a completion or error sentinel.
    #[error("stream terminated abnormally: {0}")]
    AbnormalTermination(String),

    // Backend errors
    /// The backend answered with a non-success HTTP status.
    #[error("backend error ({status}): {body}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Full response body.
        body: String,
    },
    /// The backend reported a failure in-band with an `[ERROR]` sentinel.
    #[error("remote error: {message}")]
    Remote {
        /// Message carried after the sentinel prefix.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ForensicsError {
    /// Build a [`ForensicsError::Validation`].
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether reissuing the same request could reasonably succeed.
    ///
    /// Nothing in this workspace retries on its own; this only classifies.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::AbnormalTermination(_) => true,
            Self::Backend { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Validation { .. } | Self::Remote { .. } | Self::InvalidResponse(_) => false,
        }
    }

    /// The payload key a validation error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ForensicsError::Backend {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(err.to_string(), "backend error (500): oops");
    }

    #[test]
    fn remote_error_is_terminal() {
        let err = ForensicsError::Remote {
            message: "backend overloaded".into(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "remote error: backend overloaded");
    }

    #[test]
    fn field_only_for_validation() {
        let err = ForensicsError::validation("measurement_time", "missing");
        assert_eq!(err.field(), Some("measurement_time"));
        assert_eq!(ForensicsError::InvalidResponse("x".into()).field(), None);
    }

    #[test]
    fn network_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = ForensicsError::Network(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "reset");
    }
}
