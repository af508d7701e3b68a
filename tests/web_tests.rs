//! HTTP surface tests
//!
//! Drives the full router, middleware included, with `tower::ServiceExt`.
//! Every request carries a peer address because the rate limiter keys on it.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use symptom_solver::core::disease::DiseaseRecord;
use symptom_solver::web::server::{create_router, create_router_with_catalog, MAX_BODY_SIZE};
use symptom_solver::DiseaseCatalog;

fn peer() -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000)))
}

fn get(uri: &str) -> Request<Body> {
    let mut req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    req.extensions_mut().insert(peer());
    req
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

fn post_raw(uri: &str, body: String) -> Request<Body> {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");
    req.extensions_mut().insert(peer());
    req
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, req).await;
    let json = serde_json::from_str(&body).expect("JSON body");
    (status, json)
}

fn app() -> Router {
    create_router().expect("router")
}

#[tokio::test]
async fn test_health() {
    let (status, json) = send_json(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "symptom-solver");
}

#[tokio::test]
async fn test_index_page_lists_every_disease() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data-id=\"rust\""));
    assert!(body.contains("data-id=\"fusarium_wilt\""));
    assert!(body.contains("Orange pustules"));
    assert!(!body.contains("{{"), "all placeholders should be filled");
}

#[tokio::test]
async fn test_static_assets() {
    let resp = app()
        .oneshot(get("/static/css/styles.css"))
        .await
        .expect("response");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );

    let (status, body) = send(app(), get("/static/js/main.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/diagnose"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let resp = app().oneshot(get("/health")).await.expect("response");
    let headers = resp.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("referrer-policy"));
}

#[tokio::test]
async fn test_list_diseases_in_catalog_order() {
    let (status, json) = send_json(app(), get("/api/diseases")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 9);
    assert_eq!(json["diseases"][0]["id"], "leaf_blight");
    assert_eq!(json["diseases"][8]["id"], "fusarium_wilt");
}

#[tokio::test]
async fn test_disease_lookup() {
    let (status, json) = send_json(app(), get("/api/disease/late_blight")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["disease"]["name"], "Late Blight");
    assert_eq!(json["disease"]["severity"], "very_high");

    let (status, json) = send_json(app(), get("/api/disease/no_such_thing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_type"], "not_found");
}

#[tokio::test]
async fn test_disease_fragment() {
    let (status, body) = send(app(), get("/disease/rust")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h3>Rust</h3>"));

    let (status, _) = send(app(), get("/disease/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_symptom_union_sorted_and_unique() {
    let (status, json) = send_json(app(), get("/api/symptoms")).await;
    assert_eq!(status, StatusCode::OK);

    let symptoms: Vec<String> =
        serde_json::from_value(json["symptoms"].clone()).expect("string array");
    let mut sorted = symptoms.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(symptoms, sorted);
    assert_eq!(json["count"], symptoms.len());
}

#[tokio::test]
async fn test_match_symptoms_ranks_and_ties_keep_catalog_order() {
    let body = serde_json::json!({ "symptoms": ["Orange pustules", "Yellow leaves"] });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);

    let results = json["results"].as_array().expect("results");
    assert_eq!(results[0]["disease_id"], "rust");
    assert_eq!(results[0]["match_percent"], 50);
    assert_eq!(results[0]["confidence"], "medium");
    assert_eq!(
        results[0]["matched_symptoms"],
        serde_json::json!(["Orange pustules"])
    );
    assert_eq!(
        results[0]["unmatched_symptoms"],
        serde_json::json!(["Yellow specks", "Reduced vigor"])
    );
    assert_eq!(results[1]["disease_id"], "yellowing");
    assert_eq!(results[1]["match_percent"], 50);
}

#[tokio::test]
async fn test_match_symptoms_from_description() {
    let body = serde_json::json!({ "description": "orange bumps" });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["description"], "orange bumps");
    assert!(json.get("selected").is_none());
    assert_eq!(json["count"], 1);

    let rust = &json["results"][0];
    assert_eq!(rust["disease_id"], "rust");
    assert_eq!(rust["match_percent"], 33);
    assert_eq!(rust["match_count"], 1);
    assert_eq!(rust["total_symptoms"], 3);
    assert_eq!(rust["matched_symptoms"], serde_json::json!(["Orange pustules"]));
}

#[tokio::test]
async fn test_description_scored_over_each_disease() {
    let body = serde_json::json!({ "description": "leaves have brown spots and are yellowing" });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::OK);

    let results = json["results"].as_array().expect("results");
    assert_eq!(results[0]["disease_id"], "septoria_leaf_spot");
    assert_eq!(results[0]["match_percent"], 80);
    assert_eq!(results[0]["match_count"], 4);
    assert_eq!(results[0]["total_symptoms"], 5);
    assert_eq!(results[1]["disease_id"], "early_blight");
    assert_eq!(results[1]["match_percent"], 60);
    assert!(results
        .iter()
        .all(|r| r["match_percent"].as_u64().is_some_and(|p| p > 0 && p <= 100)));
}

#[tokio::test]
async fn test_unrecognized_description_is_no_match() {
    let body = serde_json::json!({ "description": "zzzz qqqq" });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "no_match");

    let (status, html) = send(app(), post_json("/api/diagnose", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Please consult an expert"));
    assert!(!html.contains("Please select at least one symptom"));
}

#[tokio::test]
async fn test_match_symptoms_no_selection() {
    for body in [
        serde_json::json!({ "symptoms": [] }),
        serde_json::json!({ "symptoms": ["   "] }),
        serde_json::json!({}),
    ] {
        let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error_type"], "no_selection");
        assert_eq!(
            json["error"],
            "Please select at least one symptom to diagnose"
        );
    }
}

#[tokio::test]
async fn test_match_symptoms_no_match() {
    let body = serde_json::json!({ "symptoms": ["Glowing purple stripes"] });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "no_match");
    assert_eq!(
        json["error"],
        "No matching diseases found. Please consult an expert."
    );
}

#[tokio::test]
async fn test_match_symptoms_rejects_both_inputs() {
    let body = serde_json::json!({ "symptoms": ["Yellowing"], "description": "yellow" });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_input");
}

#[tokio::test]
async fn test_diagnose_fragment() {
    let body = serde_json::json!({ "symptoms": ["Brown spots", "Yellowing"] });
    let (status, html) = send(app(), post_json("/api/diagnose", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h4>Leaf Blight</h4>"));
    assert!(html.contains("100% Match"));

    let body = serde_json::json!({ "symptoms": ["Brown spots", "Yellowing"] });
    let (_, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(json["selected"], serde_json::json!(["Brown spots", "Yellowing"]));
    assert_eq!(json["results"][0]["match_count"], 2);
    assert_eq!(json["results"][0]["total_symptoms"], 4);

    let body = serde_json::json!({ "symptoms": [] });
    let (status, html) = send(app(), post_json("/api/diagnose", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("no-results"));
    assert!(html.contains("Please select at least one symptom"));

    let body = serde_json::json!({ "symptoms": ["Nothing like this"] });
    let (_, html) = send(app(), post_json("/api/diagnose", &body)).await;
    assert!(html.contains("Please consult an expert"));
}

#[tokio::test]
async fn test_diagnose_fragment_escapes_labels() {
    let catalog = DiseaseCatalog::from_json(
        r#"{
            "version": "1.0.0",
            "created_at": "2024-01-01T00:00:00Z",
            "diseases": [
                {"id": "x", "name": "<b>Bold</b>", "symptoms": ["<script>alert(1)</script>"]}
            ]
        }"#,
    )
    .expect("catalog");
    let app = create_router_with_catalog(catalog).expect("router");

    let body = serde_json::json!({ "symptoms": ["<script>alert(1)</script>"] });
    let (_, html) = send(app, post_json("/api/diagnose", &body)).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
}

#[tokio::test]
async fn test_search_and_plant_filter() {
    let body = serde_json::json!({ "query": "pepper" });
    let (status, json) = send_json(app(), post_json("/api/search-diseases", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["id"], "bacterial_spot");

    let body = serde_json::json!({ "query": "   " });
    let (status, json) = send_json(app(), post_json("/api/search-diseases", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "empty_query");

    let (status, json) = send_json(app(), get("/api/diseases-by-plant/Banana")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["plant"], "banana");
    assert_eq!(json["count"], 1);
    assert_eq!(json["diseases"][0]["id"], "fusarium_wilt");
}

#[tokio::test]
async fn test_statistics() {
    let (status, json) = send_json(app(), get("/api/statistics")).await;
    assert_eq!(status, StatusCode::OK);

    let stats = &json["statistics"];
    assert_eq!(stats["total_diseases"], 9);
    assert_eq!(stats["severity_distribution"]["Very High"], 2);
    assert_eq!(stats["severity_distribution"]["Unspecified"], 3);
}

#[tokio::test]
async fn test_custom_catalog_router() {
    let mut catalog = DiseaseCatalog::new();
    catalog
        .add_disease(DiseaseRecord::new("blast", "Rice Blast").with_symptoms(["Diamond lesions"]))
        .expect("add");
    let app = create_router_with_catalog(catalog).expect("router");

    let body = serde_json::json!({ "symptoms": ["Diamond lesions"] });
    let (status, json) = send_json(app, post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["disease_id"], "blast");
    assert_eq!(json["results"][0]["match_percent"], 100);
    assert_eq!(json["results"][0]["confidence"], "exact");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let padding = "x".repeat(MAX_BODY_SIZE + 1);
    let body = format!(r#"{{"description": "{padding}"}}"#);
    let (status, _) = send(app(), post_raw("/api/match-symptoms", body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    for uri in ["/api/match-symptoms", "/api/search-diseases"] {
        let (status, body) = send(app(), post_raw(uri, "{not json".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

        let json: serde_json::Value = serde_json::from_str(&body).expect("JSON error body");
        assert_eq!(json["success"], false);
        assert_eq!(json["error_type"], "invalid_json");
        assert_eq!(json["error"], "Invalid request body");
        assert!(!body.contains("key must be a string"), "parser detail leaked: {body}");
    }

    // Wrong field type is a deserialization failure, reported the same way
    let body = serde_json::json!({ "symptoms": "Yellowing" });
    let (status, json) = send_json(app(), post_json("/api/match-symptoms", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "invalid_json");

    let (status, html) = send(app(), post_raw("/api/diagnose", "{not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("<div class=\"no-results\">Invalid request body</div>"));
}
