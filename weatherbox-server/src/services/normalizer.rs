use serde_json::{Map, Value};

use crate::errors::IngestError;
use crate::models::Reading;

/// Returns the second segment of `<prefix>/<unit_id>/<suffix>`.
pub fn unit_id_from_topic(topic: &str) -> Result<&str, IngestError> {
    match topic.split('/').nth(1) {
        Some(unit_id) if !unit_id.is_empty() => Ok(unit_id),
        _ => Err(IngestError::InvalidTopic(topic.to_string())),
    }
}

pub fn decode_payload(payload: &[u8]) -> Result<Map<String, Value>, IngestError> {
    let text = std::str::from_utf8(payload)?;

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        _ => Err(IngestError::InvalidPayload),
    }
}

/// Turns one transport message into a reading stamped with the ingestion time.
pub fn normalize(topic: &str, payload: &[u8]) -> Result<Reading, IngestError> {
    let unit_id = unit_id_from_topic(topic)?;
    let payload = decode_payload(payload)?;

    Ok(Reading::new(unit_id, payload))
}
