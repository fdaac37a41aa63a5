//! REST API handlers
//!
//! Routes map one-to-one onto `MoodAnalyzer` operations. Every body is
//! wrapped in the `ApiResponse` envelope except `/metrics`, which serves
//! the Prometheus text format.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::crisis;
use crate::engine::{AnalyzeRequest, ServiceStats};
use crate::error::{Error, ErrorCategory, KokoroErrorTrait};
use crate::metrics;
use crate::models::{
    CrisisAssessment, CrisisResource, MoodEntry, MoodForecast, PatternSummary, Recommendation,
};

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub inference_available: bool,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<MoodEntry>,
    pub days: u32,
}

/// Patterns response with the optional LLM insight
#[derive(Debug, Serialize)]
pub struct PatternsResponse {
    #[serde(flatten)]
    pub summary: PatternSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

/// Crisis check request body
#[derive(Debug, Deserialize)]
pub struct CrisisCheckRequest {
    pub text: String,
}

/// Query parameters for history and insight endpoints
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub user_id: String,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

// ============================================================================
// Error Mapping
// ============================================================================

fn status_for(error: &Error) -> StatusCode {
    match error.category() {
        ErrorCategory::Input => StatusCode::BAD_REQUEST,
        ErrorCategory::Inference => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert an engine result into a wrapped response, recording metrics
fn respond<T: Serialize>(
    endpoint: &str,
    result: crate::error::Result<T>,
) -> axum::response::Response {
    match result {
        Ok(data) => {
            metrics::record_api_request(endpoint, 200);
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(error) => {
            let status = status_for(&error);
            metrics::record_api_request(endpoint, status.as_u16());
            tracing::warn!(endpoint, status = status.as_u16(), "request failed: {error}");
            (status, Json(ErrorResponse::new(error.to_string()))).into_response()
        }
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and operational endpoints
        .route("/api/health", get(health_check))
        .route("/api/stats", get(get_stats))
        .route("/metrics", get(get_metrics))
        // Mood endpoints
        .route("/api/mood/analyze", post(analyze_mood))
        .route("/api/mood/history", get(get_history))
        // Crisis endpoints
        .route("/api/crisis/check", post(check_crisis))
        .route("/api/crisis/resources", get(get_resources))
        // Insight endpoints
        .route("/api/insights/patterns", get(get_patterns))
        .route("/api/insights/forecast", get(get_forecast))
        .route("/api/insights/recommendations", get(get_recommendations))
        .with_state(state)
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();
    let inference_available = state.inference_health.check().await;

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
        inference_available,
    }))
}

/// Service counters
async fn get_stats(State(state): State<AppState>) -> axum::response::Response {
    respond::<ServiceStats>("/api/stats", state.engine.stats())
}

/// Prometheus metrics in text format
async fn get_metrics() -> axum::response::Response {
    match metrics::encode_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encoding failed: {e}"),
        )
            .into_response(),
    }
}

// ============================================================================
// Mood Handlers
// ============================================================================

/// Analyze a journal entry and persist the result
async fn analyze_mood(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> axum::response::Response {
    let _timer = metrics::start_request_timer("/api/mood/analyze");
    respond("/api/mood/analyze", state.engine.analyze(request).await)
}

/// Mood history for a user
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> axum::response::Response {
    let days = query
        .days
        .unwrap_or(state.engine.config().default_window_days);
    respond(
        "/api/mood/history",
        state
            .engine
            .history(&query.user_id, days)
            .map(|entries| HistoryResponse { entries, days }),
    )
}

// ============================================================================
// Crisis Handlers
// ============================================================================

/// Assess crisis risk for text without persisting
async fn check_crisis(
    State(state): State<AppState>,
    Json(request): Json<CrisisCheckRequest>,
) -> axum::response::Response {
    let _timer = metrics::start_request_timer("/api/crisis/check");
    respond::<CrisisAssessment>(
        "/api/crisis/check",
        state.engine.check(&request.text).await,
    )
}

/// Full support resource catalog
async fn get_resources() -> axum::response::Response {
    respond::<Vec<CrisisResource>>("/api/crisis/resources", Ok(crisis::catalog()))
}

// ============================================================================
// Insight Handlers
// ============================================================================

/// Pattern summary with optional LLM insight
async fn get_patterns(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> axum::response::Response {
    let days = query
        .days
        .unwrap_or(state.engine.config().default_window_days);

    let summary = match state.engine.patterns(&query.user_id, days) {
        Ok(summary) => summary,
        Err(error) => return respond::<PatternsResponse>("/api/insights/patterns", Err(error)),
    };

    let insight = state.engine.pattern_insight(&summary).await;
    respond(
        "/api/insights/patterns",
        Ok(PatternsResponse { summary, insight }),
    )
}

/// Mood forecast for a user
async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> axum::response::Response {
    respond::<MoodForecast>("/api/insights/forecast", state.engine.forecast(&query.user_id))
}

/// Recommendations for a user
async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> axum::response::Response {
    respond::<Vec<Recommendation>>(
        "/api/insights/recommendations",
        state.engine.recommendations(&query.user_id).await,
    )
}
