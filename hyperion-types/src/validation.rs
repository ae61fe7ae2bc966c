//! Input checks run before either client mode touches the network.
//!
//! This is input hygiene only; the backend remains the authority on what it
//! accepts.

use crate::error::ForensicsError;
use crate::types::{ForensicReportRequest, OraclePayload};

/// Keys every oracle payload must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "policy_id",
    "location_id",
    "wind_speed",
    "measurement_time",
];

/// Check an oracle payload for the mandatory keys and sane magnitudes.
///
/// Fails with [`ForensicsError::Validation`] naming the first offending key.
pub fn validate_oracle_payload(payload: &OraclePayload) -> Result<(), ForensicsError> {
    let present = [
        payload.policy_id.is_some(),
        payload.location_id.is_some(),
        payload.wind_speed.is_some(),
        payload.measurement_time.is_some(),
    ];
    if let Some((field, _)) = REQUIRED_FIELDS
        .iter()
        .zip(present)
        .find(|(_, present)| !present)
    {
        return Err(ForensicsError::validation(*field, "missing required field"));
    }

    let speed = payload.wind_speed.unwrap_or_default();
    if !(speed.is_finite() && speed >= 0.0) {
        return Err(ForensicsError::validation(
            "wind_speed",
            format!("must be a non-negative finite number, got {speed}"),
        ));
    }

    let time = payload.measurement_time.unwrap_or_default();
    if time <= 0 {
        return Err(ForensicsError::validation(
            "measurement_time",
            format!("must be a positive Unix timestamp, got {time}"),
        ));
    }

    Ok(())
}

impl ForensicReportRequest {
    /// Validate the primary payload of this request.
    pub fn validate(&self) -> Result<(), ForensicsError> {
        validate_oracle_payload(&self.oracle_payload)
    }
}
