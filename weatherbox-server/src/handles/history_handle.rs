use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::errors::{ApiError, RequestError, UnitError};
use crate::models::HistorySample;
use crate::services::UnitStore;

#[derive(Clone)]
pub struct HistoryState {
    pub store: Arc<UnitStore>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Only return samples from the last `hours` hours
    pub hours: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub unit_id: String,
    pub data_points: usize,
    pub history: Vec<HistorySample>,
}

pub fn history_router(history_state: HistoryState) -> Router {
    Router::new()
        .route("/api/history/:unit_id", get(get_history))
        .with_state(history_state)
}

pub async fn get_history(
    Path(unit_id): Path<String>,
    State(state): State<HistoryState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(RequestError::from)?;
    let window = query.hours.map(|hours| Duration::hours(i64::from(hours)));

    let history = state
        .store
        .get_history(&unit_id, window)
        .await
        .ok_or_else(|| UnitError::HistoryNotFound(unit_id.clone()))?;

    Ok(Json(HistoryResponse {
        unit_id,
        data_points: history.len(),
        history,
    }))
}
