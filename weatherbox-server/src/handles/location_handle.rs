use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, RequestError, UnitError};
use crate::models::Location;
use crate::services::UnitStore;

#[derive(Clone)]
pub struct LocationState {
    pub store: Arc<UnitStore>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationBody {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationAck {
    pub status: String,
    pub unit_id: String,
    pub location: Location,
}

pub fn location_router(location_state: LocationState) -> Router {
    Router::new()
        .route("/api/location/:unit_id", get(get_location).post(set_location))
        .route("/api/locations", get(get_all_locations))
        .with_state(location_state)
}

pub async fn set_location(
    Path(unit_id): Path<String>,
    State(state): State<LocationState>,
    body: Result<Json<LocationBody>, JsonRejection>,
) -> Result<Json<LocationAck>, ApiError> {
    let Json(body) = body.map_err(RequestError::from)?;

    // Zero is a valid coordinate, only absence is rejected
    let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
        return Err(UnitError::MissingCoordinates.into());
    };

    let location = state
        .store
        .set_location(&unit_id, Location::new(&unit_id, lat, lon, body.name))
        .await;

    Ok(Json(LocationAck {
        status: "ok".to_string(),
        unit_id,
        location,
    }))
}

pub async fn get_location(
    Path(unit_id): Path<String>,
    State(state): State<LocationState>,
) -> Result<Json<Location>, ApiError> {
    let location = state
        .store
        .get_location(&unit_id)
        .await
        .ok_or(UnitError::LocationNotFound(unit_id))?;

    Ok(Json(location))
}

pub async fn get_all_locations(State(state): State<LocationState>) -> Json<HashMap<String, Location>> {
    Json(state.store.get_all_locations().await)
}
