//! Inbound message routing: persist every observed message and notify the
//! operator. No filtering and no deduplication; if the broker delivers a
//! message twice, the log holds it twice.

use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use crate::logutil::preview;
use crate::mqtt::MessageSink;
use crate::storage::ChatLogStore;

/// The sink wired into the messaging client at connect time. Invoked for
/// every message on every subscribed topic, including self-originated echoes.
pub struct MessageRouter {
    store: Arc<ChatLogStore>,
}

impl MessageRouter {
    pub fn new(store: Arc<ChatLogStore>) -> Self {
        MessageRouter { store }
    }
}

#[async_trait]
impl MessageSink for MessageRouter {
    async fn deliver(&self, topic: &str, payload: &[u8]) {
        let message = String::from_utf8_lossy(payload);
        println!("New message on '{}': {}", topic, preview(&message));
        // Persist the raw payload unmodified; the sender's prefix, if any,
        // is already part of it. A failed append loses that one line only,
        // and the operator hears about it even when logs go to a file.
        if let Err(e) = self.store.append(topic, &message).await {
            eprintln!("Failed to save message on '{}': {}", topic, e);
            error!("failed to persist message on '{}': {}", topic, e);
        }
    }
}
