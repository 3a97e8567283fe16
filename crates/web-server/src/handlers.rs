use crate::{error::AppError, service::QueryService, AppState};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Json,
};
use core_types::{ChangePointSummary, CorrelationRecord, EventRecord, PriceRow};
use serde_json::json;
use std::sync::Arc;

/// Runs a query on the blocking pool; the pipeline reads files synchronously.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&QueryService) -> T + Send + 'static,
{
    let service = state.service.clone();
    Ok(tokio::task::spawn_blocking(move || query(&service)).await?)
}

/// # GET /api/prices
/// The full series with returns and volatility; `[]` when there is no price data.
pub async fn get_prices(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PriceRow>>, AppError> {
    let prices = run_query(&state, QueryService::prices).await?;
    Ok(Json(prices))
}

/// # GET /api/events
pub async fn get_events(State(state): State<Arc<AppState>>) -> Result<Json<Vec<EventRecord>>, AppError> {
    let events = run_query(&state, QueryService::events).await?;
    Ok(Json(events))
}

/// # GET /api/change_points
/// Always 200: an absent or corrupted summary is reported in the body.
pub async fn get_change_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChangePointSummary>, AppError> {
    let summary = run_query(&state, QueryService::change_points).await?;
    Ok(Json(summary))
}

/// # GET /api/correlations
pub async fn get_correlations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CorrelationRecord>>, AppError> {
    let correlations = run_query(&state, QueryService::correlations).await?;
    Ok(Json(correlations))
}

/// # GET /api/metrics
/// Headline figures, or `{}` when there is no price data.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let snapshot = run_query(&state, QueryService::metrics).await?;
    Ok(match snapshot {
        Some(snapshot) => Json(snapshot).into_response(),
        None => Json(json!({})).into_response(),
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}
