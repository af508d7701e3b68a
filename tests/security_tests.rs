//! Security Test Suite
//!
//! Validates the hardening of the web interface: input validation limits,
//! markup escaping, error sanitization and request throttling.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

/// Test input limits on symptom selections
#[test]
fn test_symptom_limits() {
    use symptom_solver::utils::validation::{
        validate_symptoms, ValidationError, MAX_SELECTED_SYMPTOMS, MAX_SYMPTOM_LENGTH,
    };

    let flood: Vec<String> = (0..MAX_SELECTED_SYMPTOMS * 10)
        .map(|i| format!("symptom {i}"))
        .collect();
    assert_eq!(
        validate_symptoms(&flood).unwrap_err(),
        ValidationError::TooManySymptoms
    );

    // The same label repeated is one symptom, not a flood
    let repeated = vec!["Yellowing"; MAX_SELECTED_SYMPTOMS * 10];
    assert_eq!(validate_symptoms(repeated).unwrap().len(), 1);

    let long_label = "a".repeat(MAX_SYMPTOM_LENGTH + 1);
    assert_eq!(
        validate_symptoms([long_label]).unwrap_err(),
        ValidationError::SymptomTooLong
    );
}

/// Test rejection of control characters and terminal escapes
#[test]
fn test_control_character_rejection() {
    use symptom_solver::utils::validation::{
        validate_description, validate_query, validate_symptoms, ValidationError,
    };

    let hostile = [
        "Yellowing\0",
        "Brown\x1b[2Jspots",
        "Wilting\x07",
        "line\x0bfeed",
    ];
    for input in hostile {
        assert_eq!(
            validate_symptoms([input]).unwrap_err(),
            ValidationError::ControlCharacters,
            "symptom {input:?} should be rejected"
        );
        assert_eq!(
            validate_query(input).unwrap_err(),
            ValidationError::ControlCharacters,
            "query {input:?} should be rejected"
        );
        assert_eq!(
            validate_description(input).unwrap_err(),
            ValidationError::ControlCharacters,
            "description {input:?} should be rejected"
        );
    }
}

/// Test that every renderer escapes catalog and user text
#[test]
fn test_html_escaping() {
    use symptom_solver::render::html::{escape_html, render_disease_details_html, render_results_html};
    use symptom_solver::{match_symptoms, DiseaseRecord, SymptomSelection};

    assert_eq!(
        escape_html(r#"<img src=x onerror="alert('x')">&"#),
        "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;&amp;"
    );

    let mut catalog = symptom_solver::DiseaseCatalog::new();
    catalog
        .add_disease(
            DiseaseRecord::new("evil", "<script>steal()</script>")
                .with_summary("<iframe src=//evil>")
                .with_symptoms(["<svg onload=x>"])
                .with_advice(["</p><p>"]),
        )
        .unwrap();

    let details = render_disease_details_html(&catalog.diseases[0]);
    assert!(!details.contains("<script>"));
    assert!(!details.contains("<iframe"));
    assert!(!details.contains("<svg"));
    assert!(!details.contains("</p><p>"));

    let sel: SymptomSelection = ["<svg onload=x>"].into_iter().collect();
    let results = match_symptoms(&sel, &catalog).unwrap();
    let html = render_results_html(&results);
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<svg"));
}

/// Test error message sanitization
#[test]
fn test_error_sanitization() {
    use symptom_solver::web::server::create_safe_error_response;

    let error_response = create_safe_error_response(
        "test_error",
        "User-friendly message",
        Some("/internal/path/file.rs:123 - catalog parse failed"),
    );

    assert_eq!(error_response.error, "User-friendly message");
    assert_eq!(error_response.error_type, "test_error");
    assert!(
        error_response.details.is_none(),
        "Internal details should never be exposed"
    );

    let error_response = create_safe_error_response("test_error", "User message", None);
    assert!(error_response.details.is_none());
}

/// Test the security limit constants
#[test]
fn test_limit_configuration() {
    use symptom_solver::web::server::{
        MAX_BODY_SIZE, MAX_CONCURRENT_REQUESTS, RATE_LIMIT_BURST, RATE_LIMIT_PER_SECOND,
        REQUEST_TIMEOUT_SECS,
    };

    assert_eq!(MAX_BODY_SIZE, 64 * 1024);
    assert_eq!(REQUEST_TIMEOUT_SECS, 30);
    assert_eq!(MAX_CONCURRENT_REQUESTS, 100);
    assert!(u64::from(RATE_LIMIT_BURST) >= RATE_LIMIT_PER_SECOND);
}

/// Test that oversized input over HTTP is refused before matching
#[tokio::test]
async fn test_oversized_selection_rejected_over_http() {
    use symptom_solver::utils::validation::MAX_SELECTED_SYMPTOMS;
    use symptom_solver::web::server::create_router;

    let symptoms: Vec<String> = (0..=MAX_SELECTED_SYMPTOMS).map(|i| format!("s{i}")).collect();
    let body = serde_json::json!({ "symptoms": symptoms });

    let mut req = Request::builder()
        .method(Method::POST)
        .uri("/api/match-symptoms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    let resp = create_router().unwrap().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error_type"], "invalid_input");
    assert_eq!(json["success"], false);
}

/// Test that a single client is throttled once it exhausts its burst
#[tokio::test]
async fn test_rate_limiting_per_client() {
    use symptom_solver::web::server::{create_router, RATE_LIMIT_BURST};

    let app = create_router().unwrap();
    let client = ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 5555)));

    let mut throttled = false;
    for _ in 0..(RATE_LIMIT_BURST * 2) {
        let mut req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        req.extensions_mut().insert(client);
        let resp = app.clone().oneshot(req).await.unwrap();
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            throttled = true;
            break;
        }
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert!(throttled, "burst of {} should be enforced", RATE_LIMIT_BURST);
}
