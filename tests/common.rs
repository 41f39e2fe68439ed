//! Test utilities & fixtures.
//! Provides a recording stand-in for the broker-facing messaging client.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mqchat::mqtt::{ClientError, MessageSink, MessagingClient};

/// Everything a [`RecordingClient`] was asked to do, in call order.
#[derive(Default)]
pub struct ClientLog {
    pub subscribes: Mutex<Vec<String>>,
    pub publishes: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)] // Not every test file uses every accessor.
impl ClientLog {
    pub fn subscribes(&self) -> Vec<String> {
        self.subscribes.lock().unwrap().clone()
    }

    pub fn publishes(&self) -> Vec<(String, String)> {
        self.publishes.lock().unwrap().clone()
    }
}

/// Messaging client that records calls instead of talking to a broker.
#[derive(Default)]
pub struct RecordingClient {
    pub fail_connect: bool,
    pub log: Arc<ClientLog>,
}

#[allow(dead_code)] // Not every test file uses every constructor.
impl RecordingClient {
    pub fn new() -> Self {
        RecordingClient::default()
    }

    pub fn refusing_connections() -> Self {
        RecordingClient {
            fail_connect: true,
            ..RecordingClient::default()
        }
    }
}

#[async_trait]
impl MessagingClient for RecordingClient {
    async fn connect(&mut self, _sink: Arc<dyn MessageSink>) -> Result<(), ClientError> {
        if self.fail_connect {
            Err(ClientError::Connection("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    async fn subscribe(&self, topic: &str) -> Result<(), ClientError> {
        self.log.subscribes.lock().unwrap().push(topic.to_string());
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), ClientError> {
        self.log.publishes.lock().unwrap().push((
            topic.to_string(),
            String::from_utf8_lossy(payload).to_string(),
        ));
        Ok(())
    }
}
