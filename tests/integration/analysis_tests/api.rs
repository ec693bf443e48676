use approx::assert_relative_eq;
use phugoid::api::{AnalysisRequest, FlightDynamicsService, TrimRequest};
use pretty_assertions::assert_eq;

fn trim_request(json: &str) -> TrimRequest {
    serde_json::from_str(json).expect("valid trim request")
}

#[test]
fn test_health() {
    let service = FlightDynamicsService::default();
    let body = serde_json::to_value(service.health()).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[test]
fn test_trim_round_trip_through_json() {
    let service = FlightDynamicsService::default();
    let response = service
        .trim(&trim_request(r#"{"velocity": 51.44, "altitude": 1524.0}"#))
        .unwrap();

    assert_relative_eq!(response.alpha_deg, 2.45, epsilon = 0.1);
    assert_relative_eq!(response.theta_deg, response.alpha_deg, epsilon = 1e-6);
    assert_relative_eq!(response.throttle, 0.527, epsilon = 0.02);
    assert_relative_eq!(
        response.u.hypot(response.w),
        51.44,
        epsilon = 1e-9
    );

    let body = serde_json::to_value(&response).unwrap();
    for key in ["alpha_deg", "elevator_deg", "throttle", "theta_deg", "u", "w"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_overrides_change_the_answer() {
    let service = FlightDynamicsService::default();
    let heavy = service
        .trim(&trim_request(
            r#"{"velocity": 51.44, "altitude": 1524.0, "aircraft": {"mass": 1200.0}}"#,
        ))
        .unwrap();
    let baseline = service
        .trim(&trim_request(r#"{"velocity": 51.44, "altitude": 1524.0}"#))
        .unwrap();

    assert!(heavy.alpha_deg > baseline.alpha_deg);
    assert!(heavy.throttle > baseline.throttle);
}

#[test]
fn test_analysis_lists_conjugate_pairs() {
    let service = FlightDynamicsService::default();
    let request: AnalysisRequest =
        serde_json::from_str(r#"{"velocity": 51.44, "altitude": 1524.0}"#).unwrap();
    let response = service.analyze(&request).unwrap();

    assert_eq!(response.longitudinal.len(), 4);
    assert_eq!(response.lateral.len(), 4);
    for pair in response.longitudinal.chunks(2) {
        assert_eq!(pair[0].real, pair[1].real);
        assert_eq!(pair[0].imag, -pair[1].imag);
        assert_eq!(pair[0].wn, pair[1].wn);
    }
    assert!(response
        .longitudinal
        .iter()
        .chain(&response.lateral)
        .all(|mode| mode.real < 0.0));
}

#[test]
fn test_unstable_override_reported_not_rejected() {
    let service = FlightDynamicsService::default();
    let request: AnalysisRequest = serde_json::from_str(
        r#"{"velocity": 51.44, "altitude": 1524.0, "aircraft": {"Cm_alpha": 0.3}}"#,
    )
    .unwrap();
    let response = service.analyze(&request).unwrap();

    assert!(response.longitudinal.iter().any(|mode| mode.real > 0.0));
}

#[test]
fn test_failures_carry_a_detail_message() {
    let service = FlightDynamicsService::default();

    let slow = service
        .trim(&trim_request(r#"{"velocity": 25.0, "altitude": 1524.0}"#))
        .unwrap_err();
    assert!(!slow.detail.is_empty());

    let negative = service
        .trim(&trim_request(
            r#"{"velocity": 51.44, "altitude": 1524.0, "aircraft": {"mass": -1.0}}"#,
        ))
        .unwrap_err();
    assert!(negative.detail.contains("mass"), "{}", negative.detail);

    let body = serde_json::to_value(&negative).unwrap();
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[test]
fn test_unknown_request_fields_rejected() {
    let parsed: Result<TrimRequest, _> =
        serde_json::from_str(r#"{"velocity": 50.0, "altitude": 0.0, "gear": "down"}"#);
    assert!(parsed.is_err());
}
