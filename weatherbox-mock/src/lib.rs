use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use time::OffsetDateTime;
use tokio::time::{interval, sleep};

use crate::settings::Settings;
use crate::simulate::{simulate_reading, ReadingPayload};

pub mod settings;
pub mod simulate;

/// Publishes one simulated reading per configured unit on every tick.
pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let gateway = &settings.gateway;

    let mut options = MqttOptions::new(&gateway.client_id, &gateway.host, gateway.port);
    options.set_keep_alive(Duration::from_secs(5));

    let (client, mut event_loop) = AsyncClient::new(options, 10);

    tokio::spawn(async move {
        loop {
            if let Err(e) = event_loop.poll().await {
                tracing::error!("MQTT error: {}", e);
                sleep(Duration::from_secs(1)).await;
            }
        }
    });

    let mut ticker = interval(Duration::from_secs(settings.mock.interval.max(1)));
    loop {
        ticker.tick().await;

        let fraction = day_fraction(OffsetDateTime::now_utc());
        let readings: Vec<ReadingPayload> = {
            let mut rng = rand::rng();
            settings
                .mock
                .units
                .iter()
                .map(|_| simulate_reading(fraction, &mut rng))
                .collect()
        };

        for (unit_id, reading) in settings.mock.units.iter().zip(readings) {
            let topic = reading_topic(&gateway.topic_prefix, unit_id);

            tracing::debug!("Send {}: {:?}", topic, reading);

            if let Err(e) = client
                .publish(topic, QoS::AtLeastOnce, false, serde_json::to_vec(&reading)?)
                .await
            {
                tracing::error!("Failed to publish reading for {}: {}", unit_id, e);
            }
        }
    }
}

pub fn reading_topic(prefix: &str, unit_id: &str) -> String {
    format!("{prefix}/{unit_id}/readings")
}

fn day_fraction(now: OffsetDateTime) -> f64 {
    let seconds_since_midnight =
        u32::from(now.hour()) * 3600 + u32::from(now.minute()) * 60 + u32::from(now.second());

    f64::from(seconds_since_midnight) / 86400.0
}
