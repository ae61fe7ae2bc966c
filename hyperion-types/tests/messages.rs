use hyperion_types::*;
use serde_json::json;

#[test]
fn request_matches_wire_shape() {
    let req = ForensicReportRequest::new(
        OraclePayload::new()
            .policy_id("abc123")
            .location_id("miami_beach_buoy_12")
            .wind_speed(45.5)
            .measurement_time(1_699_564_800),
    )
    .with_policy(PolicyMetadata {
        coverage_type: Some("Hurricane Wind Damage".into()),
        beneficiary: "addr_test1qz".into(),
        coverage_amount: 100_000_000,
        coverage_start: None,
        coverage_end: None,
    });

    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({
            "oracle_payload": {
                "policy_id": "abc123",
                "location_id": "miami_beach_buoy_12",
                "wind_speed": 45.5,
                "measurement_time": 1_699_564_800
            },
            "policy_metadata": {
                "coverage_type": "Hurricane Wind Damage",
                "beneficiary": "addr_test1qz",
                "coverage_amount": 100_000_000
            }
        })
    );
}

#[test]
fn payload_with_missing_keys_deserializes() {
    let payload: OraclePayload = serde_json::from_value(json!({
        "policy_id": "abc123",
        "wind_speed": 30.0
    }))
    .unwrap();
    assert_eq!(payload.location_id, None);
    assert_eq!(
        validate_oracle_payload(&payload).unwrap_err().field(),
        Some("location_id")
    );
}

#[test]
fn healthy_status_round_trips_from_backend_json() {
    let status: HealthStatus = serde_json::from_value(json!({
        "status": "healthy",
        "services": { "api": "online", "gemini": "connected" }
    }))
    .unwrap();
    assert!(status.is_healthy());
    assert_eq!(status.services.gemini, "connected");
}
