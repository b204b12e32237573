use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::*;
use crate::services::{IngestionService, UnitStore};

/// Starts ingestion against the configured broker and returns the HTTP router
/// over the shared store.
pub fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let store = Arc::new(UnitStore::new(&settings.store));

    IngestionService::new(&settings.gateway, &store)?.start();

    Ok(create_router(&store, settings.gateway.target()))
}

pub fn create_router(store: &Arc<UnitStore>, gateway: String) -> Router {
    Router::new()
        .merge(health_router(HealthState {
            store: store.clone(),
            gateway,
        }))
        .merge(reading_router(ReadingState {
            store: store.clone(),
        }))
        .merge(location_router(LocationState {
            store: store.clone(),
        }))
        .merge(history_router(HistoryState {
            store: store.clone(),
        }))
        .merge(status_router(StatusState {
            store: store.clone(),
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
