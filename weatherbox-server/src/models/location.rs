use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub name: String,
}

impl Location {
    pub fn new(unit_id: &str, latitude: f64, longitude: f64, name: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: name.unwrap_or_else(|| format!("Box {unit_id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_name_from_unit() {
        let location = Location::new("box3", 32.755, -97.33, None);
        assert_eq!(location.name, "Box box3");

        let location = Location::new("box3", 32.755, -97.33, Some("Rooftop".to_string()));
        assert_eq!(location.name, "Rooftop");
    }

    #[test]
    fn test_wire_keys() {
        let location = Location::new("box3", 0.0, -97.3, None);

        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({"lat": 0.0, "lon": -97.3, "name": "Box box3"})
        );
    }
}
