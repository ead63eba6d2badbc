//! HTTP handlers for the REST API.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use super::dto::HealthResponse;
use super::error::AppError;
use super::state::AppState;
use crate::chart::{calculate_chart, ChartRequest, ChartResult};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /get_planets
///
/// Computes one chart. The calculation either returns all twelve positions
/// or an error body; nothing partial is sent.
pub async fn get_planet_positions(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> HandlerResult<ChartResult> {
    let Json(mut request) = payload?;
    info!(
        year = request.year,
        month = request.month,
        day = request.day,
        hour = request.hour,
        timezone = %request.timezone,
        "chart requested"
    );
    if request.ayanamsa.is_none() {
        request.ayanamsa = Some(state.default_ayanamsa);
    }

    // ephemeris lookups block on the Swiss Ephemeris lock
    let ephemeris = Arc::clone(&state.ephemeris);
    let result = tokio::task::spawn_blocking(move || calculate_chart(ephemeris.as_ref(), &request))
        .await
        .map_err(|e| AppError::Internal(format!("chart task failed: {}", e)))?
        .map_err(|e| {
            warn!(error = %e, "chart calculation failed");
            AppError::from(e)
        })?;

    Ok(Json(result))
}
