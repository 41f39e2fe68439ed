//! Session controller: owns the identity, the messaging client, and a store
//! handle; turns parsed operator commands into publishes, subscriptions, and
//! log displays.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::chat::commands::{Command, CommandParser, SendTarget, ViewTarget};
use crate::chat::topics::{self, BROADCAST_TOPIC};
use crate::mqtt::{MessageSink, MessagingClient};
use crate::storage::{ChatLogStore, StoreError};

/// One operator's chat session against a broker.
///
/// Generic over the messaging client so tests can substitute a recording
/// mock; production uses [`crate::mqtt::MqttClient`].
pub struct ChatSession<C> {
    identity: String,
    client: C,
    store: Arc<ChatLogStore>,
    parser: CommandParser,
}

impl<C: MessagingClient> ChatSession<C> {
    pub fn new(identity: String, client: C, store: Arc<ChatLogStore>) -> Self {
        ChatSession {
            identity,
            client,
            store,
            parser: CommandParser::new(),
        }
    }

    /// The fixed identity this session authors messages as.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Connect to the broker and subscribe the broadcast topic, wiring `sink`
    /// to receive every inbound message. Errors are returned to the caller;
    /// startup failure means no command loop.
    pub async fn start(&mut self, sink: Arc<dyn MessageSink>) -> Result<()> {
        self.client
            .connect(sink)
            .await
            .context("failed to connect to broker")?;
        self.client
            .subscribe(BROADCAST_TOPIC)
            .await
            .with_context(|| format!("failed to subscribe to '{BROADCAST_TOPIC}'"))?;
        info!("session started as '{}'", self.identity);
        Ok(())
    }

    /// Execute one operator input line.
    ///
    /// User-notice outcomes (invalid command, not authorized, no chat log)
    /// return `Ok`; transport and I/O failures return `Err` so the loop can
    /// report them and continue. Every failure is terminal for this one
    /// command only.
    pub async fn handle_line(&self, line: &str) -> Result<()> {
        match self.parser.parse(line) {
            Command::Send { target, message } => self.send(target, &message).await,
            Command::View { target } => {
                let topic = match target {
                    ViewTarget::All => BROADCAST_TOPIC.to_string(),
                    ViewTarget::Topic(t) => topics::view_topic(&t),
                };
                self.view(&topic).await
            }
            Command::Invalid => {
                println!("Invalid command.");
                Ok(())
            }
        }
    }

    async fn send(&self, target: SendTarget, message: &str) -> Result<()> {
        match target {
            SendTarget::All => self.publish(BROADCAST_TOPIC, message).await,
            SendTarget::Pair { from, to } => {
                // Open both directions of the conversation before sending so
                // replies are received too. Resubscribing is harmless.
                self.client
                    .subscribe(&topics::direct_topic(&from, &to))
                    .await
                    .context("failed to subscribe to chat topic")?;
                self.client
                    .subscribe(&topics::direct_topic(&to, &from))
                    .await
                    .context("failed to subscribe to chat topic")?;
                self.publish(&topics::direct_topic(&from, &to), message)
                    .await
            }
        }
    }

    /// Publish `message` to `topic` as this session's identity.
    ///
    /// You may only publish as yourself: an unauthorized topic gets a console
    /// notice and nothing is transmitted or logged. On success the payload is
    /// the identity-prefixed message and is echoed to the console.
    async fn publish(&self, topic: &str, message: &str) -> Result<()> {
        if !topics::can_publish(&self.identity, topic) {
            println!("You are not authorized to send messages to this topic.");
            debug!(
                "rejected publish by '{}' to '{}'",
                self.identity, topic
            );
            return Ok(());
        }
        let payload = format!("{}: {}", self.identity, message);
        self.client
            .publish(topic, payload.as_bytes())
            .await
            .with_context(|| format!("failed to publish to '{topic}'"))?;
        println!("Message sent to '{}': {}", topic, payload);
        Ok(())
    }

    /// Display the full chat log for `topic`, or the no-chat notice if no log
    /// file exists.
    async fn view(&self, topic: &str) -> Result<()> {
        match self.store.read_all(topic).await {
            Ok(lines) => {
                println!("Chat for topic '{}':", topic);
                println!("====================================");
                for line in lines {
                    println!("{}", line);
                }
                println!("====================================");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => {
                println!("No chat exists for topic '{}'.", topic);
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read chat log for '{topic}'")),
        }
    }
}
