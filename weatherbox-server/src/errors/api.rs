use super::{IngestError, RequestError, UnitError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unit error: {0}")]
    UnitError(#[from] UnitError),

    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),

    #[error("Request error: {0}")]
    RequestError(#[from] RequestError),
}
