//! Request and response bodies exchanged with the report backend.

use serde::{Deserialize, Serialize};

/// A signed oracle reading, the primary payload of every report request.
///
/// The mandatory keys (`policy_id`, `location_id`, `wind_speed`,
/// `measurement_time`) are optional here so an incomplete reading can be
/// represented and rejected by [`validate_oracle_payload`](crate::validate_oracle_payload)
/// before it reaches the network. Absent keys are omitted from the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OraclePayload {
    /// Policy NFT identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    /// Sensor location, e.g. `miami_beach_buoy_12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// Measured wind speed in m/s.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Unix timestamp of the measurement, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_time: Option<i64>,
    /// Trigger threshold in m/s. The backend assumes 40.0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Replay protection nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    /// Hex-encoded Ed25519 signature over the reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl OraclePayload {
    /// An empty reading. Fill it in with the builder methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy identifier.
    #[must_use]
    pub fn policy_id(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = Some(policy_id.into());
        self
    }

    /// Set the sensor location.
    #[must_use]
    pub fn location_id(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Set the wind speed in m/s.
    #[must_use]
    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    /// Set the measurement time (Unix seconds).
    #[must_use]
    pub fn measurement_time(mut self, measurement_time: i64) -> Self {
        self.measurement_time = Some(measurement_time);
        self
    }

    /// Set the trigger threshold in m/s.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the replay protection nonce.
    #[must_use]
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Set the hex signature.
    #[must_use]
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Sample hurricane reading used in tests and demos.
    #[cfg(any(test, feature = "test-utils"))]
    #[must_use]
    pub fn example() -> Self {
        Self::new()
            .policy_id("d5e6e2e1a6e1e9e8e7e6e5e4e3e2e1e0")
            .location_id("miami_beach_buoy_12")
            .wind_speed(45.5)
            .measurement_time(1_699_564_800)
            .threshold(40.0)
            .nonce(42)
            .signature("a1b2c3d4e5f6")
    }
}

/// Policy NFT metadata, optional context for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Kind of coverage, e.g. "Hurricane Wind Damage".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<String>,
    /// Beneficiary wallet address or pubkey hash.
    pub beneficiary: String,
    /// Payout in the smallest currency unit.
    pub coverage_amount: u64,
    /// Coverage start (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_start: Option<i64>,
    /// Coverage end (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_end: Option<i64>,
}

impl PolicyMetadata {
    /// Metadata with only the required fields set.
    #[must_use]
    pub fn new(beneficiary: impl Into<String>, coverage_amount: u64) -> Self {
        Self {
            coverage_type: None,
            beneficiary: beneficiary.into(),
            coverage_amount,
            coverage_start: None,
            coverage_end: None,
        }
    }

    /// Sample policy matching [`OraclePayload::example`].
    #[cfg(any(test, feature = "test-utils"))]
    #[must_use]
    pub fn example() -> Self {
        Self {
            coverage_type: Some("Hurricane Wind Damage".into()),
            beneficiary: "addr_test1qz".into(),
            coverage_amount: 100_000_000,
            coverage_start: Some(1_698_960_000),
            coverage_end: Some(1_730_582_400),
        }
    }
}

/// Body of `POST /forensics/stream` and `POST /forensics/generate`.
///
/// Immutable once built; the same value can be sent any number of times and
/// each send is an independent session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReportRequest {
    /// The oracle reading to explain.
    pub oracle_payload: OraclePayload,
    /// Optional policy context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_metadata: Option<PolicyMetadata>,
}

impl ForensicReportRequest {
    /// A request without policy context.
    #[must_use]
    pub fn new(oracle_payload: OraclePayload) -> Self {
        Self {
            oracle_payload,
            policy_metadata: None,
        }
    }

    /// Attach policy context.
    #[must_use]
    pub fn with_policy(mut self, policy_metadata: PolicyMetadata) -> Self {
        self.policy_metadata = Some(policy_metadata);
        self
    }
}

/// Response of `POST /forensics/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicReport {
    /// Whether the backend produced a report.
    pub success: bool,
    /// Policy the report is about.
    pub policy_id: String,
    /// Full report text.
    pub report: String,
    /// Generation time reported by the backend.
    pub timestamp: f64,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall status; `"healthy"` when the backend is fully up.
    pub status: String,
    /// Per-service detail.
    pub services: ServiceHealth,
}

/// Per-service detail of a [`HealthStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// The HTTP API itself.
    pub api: String,
    /// The text generation service behind the API.
    pub gemini: String,
}

impl HealthStatus {
    /// Status substituted when the backend cannot be reached.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            status: "error".into(),
            services: ServiceHealth {
                api: "offline".into(),
                gemini: "unknown".into(),
            },
        }
    }

    /// True only when the backend reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_omits_absent_policy_metadata() {
        let req = ForensicReportRequest::new(OraclePayload::example());
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("policy_metadata").is_none());
        assert_eq!(value["oracle_payload"]["wind_speed"], json!(45.5));
        assert_eq!(value["oracle_payload"]["measurement_time"], json!(1_699_564_800));
    }

    #[test]
    fn payload_omits_absent_keys() {
        let payload = OraclePayload::new().policy_id("p1").wind_speed(12.0);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({ "policy_id": "p1", "wind_speed": 12.0 }));
    }

    #[test]
    fn request_with_policy_serializes_metadata() {
        let req = ForensicReportRequest::new(OraclePayload::example())
            .with_policy(PolicyMetadata::new("addr_test1", 5_000));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["policy_metadata"],
            json!({ "beneficiary": "addr_test1", "coverage_amount": 5_000 })
        );
    }

    #[test]
    fn report_deserializes_integer_timestamp() {
        let report: ForensicReport = serde_json::from_value(json!({
            "success": true,
            "policy_id": "abc",
            "report": "The hurricane triggered the payout.",
            "timestamp": 1_699_564_900
        }))
        .unwrap();
        assert!(report.success);
        assert_eq!(report.timestamp, 1_699_564_900.0);
    }

    #[test]
    fn offline_health_is_not_healthy() {
        let status = HealthStatus::offline();
        assert!(!status.is_healthy());
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({ "status": "error", "services": { "api": "offline", "gemini": "unknown" } })
        );
    }
}
