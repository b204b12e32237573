use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Topic '{0}' does not carry a unit id")]
    InvalidTopic(String),

    #[error("Payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Payload is not a JSON object")]
    InvalidPayload,
}

impl IngestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::InvalidTopic(_) => StatusCode::BAD_REQUEST,
            IngestError::Encoding(_) => StatusCode::BAD_REQUEST,
            IngestError::Decode(_) => StatusCode::BAD_REQUEST,
            IngestError::InvalidPayload => StatusCode::BAD_REQUEST,
        }
    }
}
