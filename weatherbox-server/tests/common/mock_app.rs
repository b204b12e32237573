use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use serde_json::{Map, Value};

use weatherbox_server::configs::Store;
use weatherbox_server::handles::*;
use weatherbox_server::models::Reading;
use weatherbox_server::services::UnitStore;

pub struct MockApp {
    pub store: Arc<UnitStore>,
    pub router: Router,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_store(Store::default())
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            store: Arc::new(UnitStore::new(&store)),
            router: Router::new(),
        }
    }

    pub fn with_health_handle(mut self) -> Self {
        self.router = self.router.merge(health_router(HealthState {
            store: self.store.clone(),
            gateway: String::from("localhost:1883"),
        }));
        self
    }

    pub fn with_reading_handle(mut self) -> Self {
        self.router = self.router.merge(reading_router(ReadingState {
            store: self.store.clone(),
        }));
        self
    }

    pub fn with_location_handle(mut self) -> Self {
        self.router = self.router.merge(location_router(LocationState {
            store: self.store.clone(),
        }));
        self
    }

    pub fn with_history_handle(mut self) -> Self {
        self.router = self.router.merge(history_router(HistoryState {
            store: self.store.clone(),
        }));
        self
    }

    pub fn with_status_handle(mut self) -> Self {
        self.router = self.router.merge(status_router(StatusState {
            store: self.store.clone(),
        }));
        self
    }

    pub async fn record(&self, unit_id: &str, payload: Value) -> Reading {
        let payload: Map<String, Value> = payload.as_object().cloned().unwrap();
        self.store.record_reading(Reading::new(unit_id, payload)).await
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::GET)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
