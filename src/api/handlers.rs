//! HTTP API handlers.
//!
//! The handlers are a thin shell: axum's `Json` extractor rejects malformed
//! bodies before the handler body runs, the handler delegates to the shared
//! [`PredictionService`], and any prediction error is mapped uniformly to a
//! 500 response carrying the error message as `detail`.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::metrics;
use crate::prediction::{PredictionService, SpendingRecord, TransactionData};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared prediction service, initialized once at process start.
    pub service: Arc<PredictionService>,
    /// Prometheus recorder handle, present when the exporter is installed.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state without a metrics exporter (tests).
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self {
            service,
            metrics_handle: None,
        }
    }

    /// Create app state with an installed Prometheus recorder handle.
    pub fn with_metrics(service: Arc<PredictionService>, handle: PrometheusHandle) -> Self {
        Self {
            service,
            metrics_handle: Some(handle),
        }
    }
}

/// Categorization request body.
#[derive(Debug, Deserialize)]
pub struct CategorizationRequest {
    /// Transactions to categorize. May be empty; order is significant.
    pub transactions: Vec<TransactionData>,
}

/// Categorization response body. Both lists are 1:1 with the input.
#[derive(Debug, Serialize)]
pub struct CategorizationResponse {
    /// Category label per input transaction, in input order.
    pub categories: Vec<String>,
    /// Confidence score per input transaction, in input order.
    pub confidence_scores: Vec<f64>,
}

/// Recommendation request body.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// User identifier.
    pub user_id: String,
    /// Opaque pass-through spending records.
    pub spending_history: Vec<SpendingRecord>,
    /// Cards the user already holds. May be empty.
    pub current_cards: Vec<String>,
}

/// Recommendation response body.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Recommended card names.
    pub recommended_cards: Vec<String>,
    /// One reason per recommended card, same order.
    pub reasons: Vec<String>,
    /// Aggregate expected rewards across the recommended cards.
    pub expected_rewards: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
}

/// Model readiness response.
#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    /// Whether the categorizer has loaded.
    pub categorizer: bool,
    /// Whether the recommendation engine has loaded.
    pub recommendation_engine: bool,
}

/// Error body returned for failed predictions.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
}

/// Blanket error boundary: every prediction error becomes a 500 whose body
/// carries the error's display string as `detail`.
#[derive(Debug)]
pub struct ApiError(PredictionError);

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Health check handler - always returns the fixed identity record.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "ml-services",
    })
}

/// Categorize a batch of transactions.
pub async fn categorize(
    State(state): State<AppState>,
    Json(request): Json<CategorizationRequest>,
) -> Result<Json<CategorizationResponse>, ApiError> {
    let start = Instant::now();
    metrics::inc_categorize_requests();

    let result = state
        .service
        .categorize_transactions(&request.transactions)
        .await;
    metrics::record_http_latency(start, "/categorize");

    match result {
        Ok((categories, confidence_scores)) => {
            metrics::add_transactions_categorized(request.transactions.len() as u64);
            Ok(Json(CategorizationResponse {
                categories,
                confidence_scores,
            }))
        }
        Err(err) => {
            metrics::inc_prediction_failures("/categorize");
            Err(err.into())
        }
    }
}

/// Recommend cards for a user.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let start = Instant::now();
    metrics::inc_recommend_requests();

    let result = state
        .service
        .get_recommendations(
            &request.user_id,
            &request.spending_history,
            &request.current_cards,
        )
        .await;
    metrics::record_http_latency(start, "/recommend");

    match result {
        Ok(recs) => Ok(Json(RecommendationResponse {
            recommended_cards: recs.recommended_cards,
            reasons: recs.reasons,
            expected_rewards: recs.expected_rewards,
        })),
        Err(err) => {
            metrics::inc_prediction_failures("/recommend");
            Err(err.into())
        }
    }
}

/// Report per-model readiness. The readiness accessors are infallible, so
/// this handler has no error path.
pub async fn model_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ModelStatusResponse {
        categorizer: state.service.categorizer.is_loaded(),
        recommendation_engine: state.service.recommendation_engine.is_loaded(),
    })
}

/// Render Prometheus metrics, or 503 when no recorder is installed.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn api_error_renders_detail_body() {
        let err = ApiError(PredictionError::InferenceFailed("boom".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "inference failed: boom");
    }

    #[test]
    fn recommendation_request_accepts_opaque_history() {
        let body = r#"{
            "user_id": "u1",
            "spending_history": [{"category": "Dining", "amount": 12.5, "extra": [1, 2]}],
            "current_cards": []
        }"#;
        let request: RecommendationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.spending_history.len(), 1);
        assert!(request.spending_history[0].contains_key("extra"));
    }
}
