use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::models::StatusSummary;
use crate::services::UnitStore;

#[derive(Clone)]
pub struct StatusState {
    pub store: Arc<UnitStore>,
}

pub fn status_router(status_state: StatusState) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .with_state(status_state)
}

pub async fn get_status(State(state): State<StatusState>) -> Json<StatusSummary> {
    Json(state.store.status_summary().await)
}
