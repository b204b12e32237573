use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::models::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Online,
    Offline,
}

/// The six canonical measurements a unit may report. Each one is read from
/// the payload key of the same name and left unset when missing or non-numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub rainfall: Option<f64>,
}

impl Measurements {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let field = |key: &str| payload.get(key).and_then(Value::as_f64);

        Self {
            temperature: field("temperature"),
            humidity: field("humidity"),
            pressure: field("pressure"),
            wind_speed: field("wind_speed"),
            wind_direction: field("wind_direction"),
            rainfall: field("rainfall"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub unit_id: String,
    #[serde(flatten)]
    pub measurements: Measurements,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub status: UnitStatus,
    pub raw_payload: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<Location>,
}

impl Reading {
    pub fn new(unit_id: &str, payload: Map<String, Value>) -> Self {
        Self {
            unit_id: unit_id.to_string(),
            measurements: Measurements::from_payload(&payload),
            timestamp: OffsetDateTime::now_utc(),
            status: UnitStatus::Online,
            raw_payload: payload,
            location: None,
        }
    }

    pub fn sample(&self) -> HistorySample {
        HistorySample {
            timestamp: self.timestamp,
            measurements: self.measurements,
        }
    }

    pub(crate) fn with_location(self, location: Option<Location>) -> Self {
        Self { location, ..self }
    }

    pub(crate) fn with_status(self, status: UnitStatus) -> Self {
        Self { status, ..self }
    }
}

/// Compact form of a reading kept in the history buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub measurements: Measurements,
}
