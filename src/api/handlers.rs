use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{PredictResponse, PredictionRequest, PropertyQuery, PropertyView},
    services::recommend,
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub properties: usize,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        properties: state.dataset.len(),
        timestamp: Utc::now(),
    })
}

/// Canonical location names accepted by `/predict`
pub async fn get_locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset.locations().sorted())
}

/// Recommends up to ten properties for the requested criteria
pub async fn predict(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let result = handle_predict(&state, payload);

    match &result {
        Ok(response) => tracing::info!(
            request_id = %request_id,
            returned = response.properties.len(),
            "Prediction completed"
        ),
        Err(e) => tracing::warn!(request_id = %request_id, error = %e, "Prediction failed"),
    }

    result.map(Json)
}

fn handle_predict(
    state: &AppState,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> AppResult<PredictResponse> {
    let Json(request) = payload?;
    let query = PropertyQuery::try_from(request)?;

    tracing::info!(
        location = %query.location,
        bhk = query.bhk,
        gym = query.gym,
        pool = query.pool,
        rera = query.rera,
        "Processing prediction request"
    );

    let recommendation = recommend(
        &state.dataset,
        &query,
        state.sampler.as_ref(),
        state.model.as_ref(),
    )?;

    tracing::info!(
        resolved_location = ?recommendation.resolved_location,
        step = %recommendation.step,
        candidates = recommendation.candidates,
        "Filters applied"
    );

    Ok(PredictResponse {
        properties: recommendation
            .properties
            .into_iter()
            .map(PropertyView::from)
            .collect(),
    })
}
