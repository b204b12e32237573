use std::sync::Arc;
use std::{fs, io, time};

use anyhow::anyhow;
use rumqttc::tokio_rustls::rustls::{ClientConfig, RootCertStore};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS, TlsConfiguration, Transport};
use rustls_pemfile::{certs, read_one, Item};
use tokio::task::JoinHandle;

use crate::configs::{Gateway, GatewayAuth};
use crate::errors::IngestError;
use crate::models::Reading;
use crate::services::normalizer::normalize;
use crate::services::UnitStore;

/// Subscribes to the unit topics and feeds every message into the store.
pub struct IngestionService {
    client: AsyncClient,
    event_loop: EventLoop,
    topic: String,
    reconnect_delay: time::Duration,
    store: Arc<UnitStore>,
}

impl IngestionService {
    pub fn new(gateway: &Gateway, store: &Arc<UnitStore>) -> anyhow::Result<Self> {
        let mut options = MqttOptions::new(&gateway.client_id, &gateway.host, gateway.port);
        options.set_keep_alive(time::Duration::from_secs(gateway.keep_alive));

        if let Some(auth) = &gateway.auth {
            options.set_transport(tls_transport(auth)?);
        }

        let (client, event_loop) = AsyncClient::new(options, 10);

        Ok(Self {
            client,
            event_loop,
            topic: gateway.topic.clone(),
            reconnect_delay: time::Duration::from_secs(gateway.reconnect_delay),
            store: Arc::clone(store),
        })
    }

    /// Runs the receive loop on its own task for the rest of the process.
    pub fn start(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match self.event_loop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        tracing::info!("connected to MQTT broker, subscribing to {}", self.topic);

                        // The subscription is renewed on every connection since the session is clean
                        if let Err(e) = self.client.try_subscribe(&self.topic, QoS::AtLeastOnce) {
                            tracing::error!("Failed to subscribe {}: {}", self.topic, e);
                        }
                    }
                    Ok(Event::Incoming(Packet::SubAck(_))) => {
                        tracing::debug!("subscribe topic {}", self.topic);
                    }
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        if let Err(e) = ingest(&self.store, &publish.topic, &publish.payload).await {
                            tracing::warn!("Dropping message on {}: {}", publish.topic, e);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("MQTT error: {}", e);
                        tokio::time::sleep(self.reconnect_delay).await;
                    }
                }
            }
        })
    }
}

/// Normalizes one message and records it. Nothing is stored on failure.
pub async fn ingest(store: &UnitStore, topic: &str, payload: &[u8]) -> Result<Reading, IngestError> {
    let reading = store.record_reading(normalize(topic, payload)?).await;

    tracing::info!(
        "unit {}: temperature={:?}, humidity={:?}",
        reading.unit_id,
        reading.measurements.temperature,
        reading.measurements.humidity
    );

    Ok(reading)
}

fn tls_transport(auth: &GatewayAuth) -> anyhow::Result<Transport> {
    let mut root_cert_store = RootCertStore::empty();
    root_cert_store.add_parsable_certificates(rustls_native_certs::load_native_certs().certs);

    let certs = certs(&mut io::BufReader::new(fs::File::open(&auth.cert_path)?))
        .collect::<Result<Vec<_>, _>>()?;
    let mut key_buffer = io::BufReader::new(fs::File::open(&auth.key_path)?);
    let key = loop {
        match read_one(&mut key_buffer)? {
            Some(Item::Sec1Key(key)) => break key.into(),
            Some(Item::Pkcs1Key(key)) => break key.into(),
            Some(Item::Pkcs8Key(key)) => break key.into(),
            None => return Err(anyhow!("no keys found or encrypted keys not supported")),
            _ => {}
        }
    };

    let tls_config = ClientConfig::builder()
        .with_root_certificates(root_cert_store)
        .with_client_auth_cert(certs, key)?;

    Ok(Transport::Tls(TlsConfiguration::from(tls_config)))
}
