use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::services::UnitStore;

#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<UnitStore>,
    /// Broker address the ingestion service connects to
    pub gateway: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mqtt_broker: String,
    pub active_units: Vec<String>,
    pub total_units: usize,
}

pub fn health_router(health_state: HealthState) -> Router {
    Router::new()
        .route("/", get(get_health))
        .with_state(health_state)
}

pub async fn get_health(State(state): State<HealthState>) -> Json<HealthResponse> {
    let active_units = state.store.unit_ids().await;

    Json(HealthResponse {
        status: "running".to_string(),
        mqtt_broker: state.gateway.clone(),
        total_units: active_units.len(),
        active_units,
    })
}
