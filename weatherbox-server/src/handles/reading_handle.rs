use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, UnitError};
use crate::models::Reading;
use crate::services::UnitStore;
use crate::services::normalizer::decode_payload;

#[derive(Clone)]
pub struct ReadingState {
    pub store: Arc<UnitStore>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadingAck {
    pub status: String,
    pub unit_id: String,
}

pub fn reading_router(reading_state: ReadingState) -> Router {
    Router::new()
        .route("/api/latest", get(get_all_latest))
        .route("/api/latest/:unit_id", get(get_latest_by_id))
        .route("/api/mock/:unit_id", post(inject_reading))
        .with_state(reading_state)
}

pub async fn get_all_latest(State(state): State<ReadingState>) -> Json<HashMap<String, Reading>> {
    Json(state.store.get_all_latest().await)
}

pub async fn get_latest_by_id(
    Path(unit_id): Path<String>,
    State(state): State<ReadingState>,
) -> Result<Json<Reading>, ApiError> {
    let reading = state
        .store
        .get_latest(&unit_id)
        .await
        .ok_or(UnitError::ReadingNotFound(unit_id))?;

    Ok(Json(reading))
}

/// Records a manual reading. The body is decoded exactly like a transport
/// payload, so the same keys are extracted and the same inputs are rejected.
pub async fn inject_reading(
    Path(unit_id): Path<String>,
    State(state): State<ReadingState>,
    body: Bytes,
) -> Result<Json<ReadingAck>, ApiError> {
    let payload = decode_payload(&body)?;
    let reading = state.store.record_reading(Reading::new(&unit_id, payload)).await;

    tracing::debug!("manual reading recorded for unit {}", reading.unit_id);

    Ok(Json(ReadingAck {
        status: "ok".to_string(),
        unit_id: reading.unit_id,
    }))
}
