//! # MQTT Module - Messaging Client Capability
//!
//! The session depends on two seams, both defined here:
//!
//! - [`MessagingClient`]: connect / subscribe / publish against a broker.
//! - [`MessageSink`]: the inbound delivery capability, injected at connect
//!   time and invoked for every message on every subscribed topic.
//!
//! [`MqttClient`] is the production implementation over `rumqttc`. All
//! transport concerns (framing, keep-alive, retry, reconnection) live in the
//! library; this module only drives its event loop and forwards inbound
//! publishes to the sink. The trait surface carries no library types so tests
//! can stand in a recording mock for the broker.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use rumqttc::{AsyncClient, ConnectReturnCode, Event, MqttOptions, Packet, QoS};
use tokio::time::sleep;

use crate::config::Config;

/// Errors from the messaging-client seam. String payloads keep the trait
/// surface free of `rumqttc` types.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("broker connection failed: {0}")]
    Connection(String),

    #[error("client request failed: {0}")]
    Request(String),

    #[error("not connected to a broker")]
    NotConnected,
}

impl From<rumqttc::ClientError> for ClientError {
    fn from(e: rumqttc::ClientError) -> Self {
        ClientError::Request(e.to_string())
    }
}

impl From<rumqttc::ConnectionError> for ClientError {
    fn from(e: rumqttc::ConnectionError) -> Self {
        ClientError::Connection(e.to_string())
    }
}

/// Inbound delivery capability: one method, called for every message arriving
/// on any subscribed topic (self-originated echoes included).
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, topic: &str, payload: &[u8]);
}

/// The broker-facing capability the session is written against.
#[async_trait]
pub trait MessagingClient: Send {
    /// Establish the broker connection and inject the sink that will receive
    /// every subsequent inbound message. Called once at startup; failure is
    /// fatal to the session.
    async fn connect(&mut self, sink: Arc<dyn MessageSink>) -> Result<(), ClientError>;

    /// Subscribe to `topic`. Resubscribing to an already-subscribed topic is
    /// harmless and does not duplicate deliveries.
    async fn subscribe(&self, topic: &str) -> Result<(), ClientError>;

    /// Publish `payload` to `topic`. Fire-and-forget beyond the client call
    /// itself returning.
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), ClientError>;
}

/// MQTT implementation over `rumqttc::AsyncClient`.
pub struct MqttClient {
    host: String,
    port: u16,
    keep_alive: Duration,
    client_id: String,
    client: Option<AsyncClient>,
}

impl MqttClient {
    /// Build an unconnected client from configuration. The chat identity is
    /// presented to the broker as the MQTT client id.
    pub fn new(config: &Config) -> Self {
        MqttClient {
            host: config.broker.host.clone(),
            port: config.broker.port,
            keep_alive: Duration::from_secs(config.broker.keep_alive_secs),
            client_id: config.chat.identity.clone(),
            client: None,
        }
    }

    fn client(&self) -> Result<&AsyncClient, ClientError> {
        self.client.as_ref().ok_or(ClientError::NotConnected)
    }
}

#[async_trait]
impl MessagingClient for MqttClient {
    async fn connect(&mut self, sink: Arc<dyn MessageSink>) -> Result<(), ClientError> {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(self.keep_alive);
        // Broker retains our subscriptions across reconnects; reconnection
        // itself is rumqttc's job, not ours.
        options.set_clean_session(false);

        let (client, mut eventloop) = AsyncClient::new(options, 64);

        // Drive the event loop until the broker acknowledges the connection.
        // Startup failures are returned, not retried.
        loop {
            match eventloop.poll().await? {
                Event::Incoming(Packet::ConnAck(ack)) => {
                    if ack.code == ConnectReturnCode::Success {
                        info!("connected to broker at {}:{}", self.host, self.port);
                        break;
                    }
                    return Err(ClientError::Connection(format!(
                        "broker refused connection: {:?}",
                        ack.code
                    )));
                }
                event => debug!("pre-connack event: {:?}", event),
            }
        }

        // Inbound pump: every Publish on any subscribed topic goes to the
        // sink. Event-loop errors mid-session are logged and polling resumes;
        // rumqttc reconnects on the next poll.
        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        sink.deliver(&publish.topic, &publish.payload).await;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("mqtt event loop error: {} (will re-poll)", e);
                        sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        self.client = Some(client);
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ClientError> {
        self.client()?.subscribe(topic, QoS::AtLeastOnce).await?;
        debug!("subscribed to '{}'", topic);
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), ClientError> {
        self.client()?
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await?;
        Ok(())
    }
}
