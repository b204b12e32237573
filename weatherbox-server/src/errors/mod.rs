pub mod api;
pub mod ingest;
pub mod request;
pub mod unit;

pub use api::ApiError;
pub use ingest::IngestError;
pub use request::RequestError;
pub use unit::UnitError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::UnitError(e) => (e.status_code(), e.to_string()),
            ApiError::IngestError(e) => (e.status_code(), e.to_string()),
            ApiError::RequestError(e) => (e.status_code(), e.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": error_message
            }
        }));

        (status, body).into_response()
    }
}
