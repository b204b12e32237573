use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;

/// Requests the extractors could not turn into handler input.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Invalid body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody(JsonRejection::MissingJsonContentType(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            RequestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}
