use std::path::PathBuf;
use std::time::Duration;
use std::{env, io};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::services::MAX_HISTORY_POINTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gateway {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub topic: String,
    /// Keep alive interval in seconds
    pub keep_alive: u64,
    /// Pause in seconds between polls after a transport error
    pub reconnect_delay: u64,
    pub auth: Option<GatewayAuth>,
}

impl Gateway {
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayAuth {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(default = "default_max_history_points")]
    pub max_history_points: usize,
    /// Seconds without a reading before a unit counts as offline
    pub offline_after: Option<u64>,
}

impl Store {
    pub fn offline_after(&self) -> Option<Duration> {
        self.offline_after.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_points == 0 {
            return Err(ConfigError::Message(
                "store.max_history_points must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self {
            max_history_points: MAX_HISTORY_POINTS,
            offline_after: None,
        }
    }
}

fn default_max_history_points() -> usize {
    MAX_HISTORY_POINTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub gateway: Gateway,
    #[serde(default)]
    pub store: Store,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("WEATHERBOX").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.store.validate()?;

        if let Some(auth) = &settings.gateway.auth {
            let cert_path = normalize_path(&auth.cert_path)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();
            let key_path = normalize_path(&auth.key_path)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();

            settings.gateway.auth = Some(GatewayAuth { cert_path, key_path });
        }

        Ok(settings)
    }
}

pub(crate) fn normalize_path(path: &str) -> io::Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        env::current_dir()?.join(path_buf)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_defaults_to_day_of_five_minute_samples() {
        let store = Store::default();

        assert_eq!(store.max_history_points, 288);
        assert!(store.offline_after().is_none());
    }

    #[test]
    fn test_store_section_fills_missing_bound() {
        let store: Store = serde_json::from_str(r#"{"offline_after": 600}"#).unwrap();

        assert_eq!(store.max_history_points, MAX_HISTORY_POINTS);
        assert_eq!(store.offline_after(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_store_rejects_empty_history() {
        let store: Store = serde_json::from_str(r#"{"max_history_points": 0}"#).unwrap();

        let err = store.validate().unwrap_err();
        assert!(err.to_string().contains("max_history_points"));

        assert!(Store::default().validate().is_ok());
    }

    #[test]
    fn test_gateway_target() {
        let gateway = Gateway {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "test".to_string(),
            topic: "weather/+/readings".to_string(),
            keep_alive: 60,
            reconnect_delay: 5,
            auth: None,
        };

        assert_eq!(gateway.target(), "localhost:1883");
    }

    #[test]
    fn test_normalize_path_keeps_absolute() {
        let path = normalize_path("/etc/weatherbox/client.crt").unwrap();
        assert_eq!(path, PathBuf::from("/etc/weatherbox/client.crt"));

        let path = normalize_path("certs/client.crt").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("certs/client.crt"));
    }
}
