use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("No data for unit '{0}'")]
    ReadingNotFound(String),

    #[error("No location data for unit '{0}'")]
    LocationNotFound(String),

    #[error("No historical data for unit '{0}'")]
    HistoryNotFound(String),

    #[error("Latitude and longitude are required")]
    MissingCoordinates,
}

impl UnitError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UnitError::ReadingNotFound(_) => StatusCode::NOT_FOUND,
            UnitError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            UnitError::HistoryNotFound(_) => StatusCode::NOT_FOUND,
            UnitError::MissingCoordinates => StatusCode::BAD_REQUEST,
        }
    }
}
