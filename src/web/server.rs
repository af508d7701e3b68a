use axum::http::header;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::DiseaseCatalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::selection::Observation;
use crate::core::types::DiseaseId;
use crate::matching::{MatchError, MatchResult, SymptomMatcher};
use crate::render::html::{
    escape_html, render_diagnosis_html, render_disease_details_html, render_index_page,
};
use crate::utils::validation::{resolve_observation, validate_query, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_BODY_SIZE: usize = 64 * 1024; // 64KB
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const RATE_LIMIT_PER_SECOND: u64 = 10;
pub const RATE_LIMIT_BURST: u32 = 50;

/// Shared application state
pub struct AppState {
    pub catalog: DiseaseCatalog,
}

/// Error body returned by every JSON endpoint
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Body of `/api/match-symptoms` and `/api/diagnose`
#[derive(Debug, Default, Deserialize)]
pub struct MatchRequest {
    /// Checked symptom labels
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
    /// Free-text description, as an alternative to `symptoms`
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `/api/search-diseases`
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        success: false,
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(create_safe_error_response(error_type, message, None)),
    )
        .into_response()
}

fn validation_error_response(err: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, "invalid_input", &err.to_string())
}

/// Map a body that failed to deserialize to a JSON error without echoing
/// the parser's message
fn json_rejection_response(rejection: &JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "Request body too large",
        )
    } else {
        error_response(StatusCode::BAD_REQUEST, "invalid_json", "Invalid request body")
    }
}

fn match_error_response(err: MatchError) -> Response {
    match err {
        MatchError::NoSelection => {
            error_response(StatusCode::BAD_REQUEST, "no_selection", &err.to_string())
        }
        MatchError::NoMatch => error_response(StatusCode::NOT_FOUND, "no_match", &err.to_string()),
    }
}

fn result_json(m: &MatchResult) -> serde_json::Value {
    serde_json::json!({
        "disease_id": m.disease_id.as_str(),
        "disease_name": m.disease_name,
        "match_percent": m.match_percent,
        "match_count": m.match_count,
        "total_symptoms": m.total_symptoms,
        "confidence": m.confidence(),
        "matched_symptoms": m.matched_symptoms,
        "unmatched_symptoms": m.unmatched_symptoms,
    })
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router over the embedded catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn create_router() -> anyhow::Result<Router> {
    create_router_with_catalog(DiseaseCatalog::load_embedded()?)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router_with_catalog(catalog: DiseaseCatalog) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { catalog });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_PER_SECOND)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/disease/{id}", get(disease_fragment_handler))
        .route("/api/diseases", get(list_diseases_handler))
        .route("/api/disease/{id}", get(disease_handler))
        .route("/api/symptoms", get(symptoms_handler))
        .route("/api/match-symptoms", post(match_symptoms_handler))
        .route("/api/diagnose", post(diagnose_html_handler))
        .route("/api/search-diseases", post(search_handler))
        .route("/api/diseases-by-plant/{plant}", get(by_plant_handler))
        .route("/api/statistics", get(statistics_handler))
        .route("/static/css/styles.css", get(styles_css_handler))
        .route("/static/js/main.js", get(main_js_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("content-security-policy"),
                    HeaderValue::from_static("default-src 'self'"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    tracing::info!("Serving catalog with {} diseases", catalog.len());

    let app = create_router_with_catalog(catalog)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-solver web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("Could not open browser: {}", e);
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index_page(&state.catalog))
}

async fn styles_css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("static/css/styles.css"),
    )
}

async fn main_js_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("static/js/main.js"),
    )
}

/// Reachability check used by the page's status line
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "symptom-solver",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_diseases_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "count": state.catalog.len(),
        "diseases": state.catalog.diseases,
    }))
}

async fn disease_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.get(&DiseaseId::new(id)) {
        Some(disease) => Json(serde_json::json!({
            "success": true,
            "disease": disease,
        }))
        .into_response(),
        None => error_response(StatusCode::NOT_FOUND, "not_found", "Disease not found"),
    }
}

/// Details panel for one disease, as an HTML fragment
async fn disease_fragment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.get(&DiseaseId::new(id)) {
        Some(disease) => Html(render_disease_details_html(disease)).into_response(),
        None => (StatusCode::NOT_FOUND, Html("<p>Disease not found</p>")).into_response(),
    }
}

async fn symptoms_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let symptoms = state.catalog.symptom_union();
    Json(serde_json::json!({
        "success": true,
        "count": symptoms.len(),
        "symptoms": symptoms,
    }))
}

/// API endpoint for ranking diseases against checked symptoms or a description
async fn match_symptoms_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return json_rejection_response(&rejection),
    };

    let observation = match resolve_observation(
        request.symptoms.as_deref(),
        request.description.as_deref(),
        &state.catalog,
    ) {
        Ok(observation) => observation,
        Err(e) => return validation_error_response(&e),
    };

    match SymptomMatcher::new(&state.catalog).diagnose(&observation) {
        Ok(results) => {
            let mut body = serde_json::json!({
                "success": true,
                "count": results.len(),
                "results": results.iter().map(result_json).collect::<Vec<_>>(),
            });
            match &observation {
                Observation::Checked(selection) => {
                    body["selected"] = serde_json::json!(selection);
                }
                Observation::Described(text) => {
                    body["description"] = serde_json::json!(text);
                }
            }
            Json(body).into_response()
        }
        Err(e) => match_error_response(e),
    }
}

fn error_fragment(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(format!(
            "<div class=\"no-results\">{}</div>",
            escape_html(message)
        )),
    )
        .into_response()
}

/// Same ranking as `/api/match-symptoms`, rendered as an HTML fragment
async fn diagnose_html_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            return error_fragment("Invalid request body");
        }
    };

    let observation = match resolve_observation(
        request.symptoms.as_deref(),
        request.description.as_deref(),
        &state.catalog,
    ) {
        Ok(observation) => observation,
        Err(e) => return error_fragment(&e.to_string()),
    };

    let outcome = SymptomMatcher::new(&state.catalog).diagnose(&observation);
    Html(render_diagnosis_html(&outcome)).into_response()
}

/// Search diseases by name, scientific name or host plant
async fn search_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return json_rejection_response(&rejection),
    };

    let query = match validate_query(&request.query) {
        Ok(query) => query,
        Err(e) => return validation_error_response(&e),
    };

    match state.catalog.search(query) {
        Ok(results) => Json(serde_json::json!({
            "success": true,
            "count": results.len(),
            "results": results,
        }))
        .into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, "empty_query", &e.to_string()),
    }
}

async fn by_plant_handler(
    State(state): State<Arc<AppState>>,
    Path(plant): Path<String>,
) -> Response {
    let plant = match validate_query(&plant) {
        Ok(plant) => plant.to_lowercase(),
        Err(e) => return validation_error_response(&e),
    };

    let diseases = state.catalog.by_plant(&plant);
    Json(serde_json::json!({
        "success": true,
        "plant": plant,
        "count": diseases.len(),
        "diseases": diseases,
    }))
    .into_response()
}

async fn statistics_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.catalog.statistics();
    let distribution: serde_json::Map<String, serde_json::Value> = stats
        .severity_distribution
        .into_iter()
        .map(|(label, count)| (label, serde_json::Value::from(count)))
        .collect();

    Json(serde_json::json!({
        "success": true,
        "statistics": {
            "total_diseases": stats.total_diseases,
            "total_symptoms": stats.total_symptoms,
            "severity_distribution": distribution,
        }
    }))
}
