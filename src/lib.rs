//! # mqchat - Console Chat over MQTT
//!
//! mqchat is a single-binary console chat client for MQTT brokers. One process
//! connects to a broker, subscribes to the shared broadcast topic plus any
//! one-to-one chat topics the operator opens, and persists every message it
//! observes to a per-topic append-only log file.
//!
//! Transport concerns (framing, keep-alive, retry, reconnection) are delegated
//! entirely to the MQTT client library; this crate implements topic routing,
//! command parsing, and chat-log bookkeeping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mqchat::chat::{ChatSession, MessageRouter};
//! use mqchat::config::Config;
//! use mqchat::mqtt::MqttClient;
//! use mqchat::storage::ChatLogStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let store = Arc::new(ChatLogStore::new(&config.storage.data_dir).await?);
//!     let client = MqttClient::new(&config);
//!     let mut session = ChatSession::new(config.chat.identity.clone(), client, store.clone());
//!     session.start(Arc::new(MessageRouter::new(store))).await?;
//!     session.handle_line("send todos hello everyone").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`chat`] - Session controller, command interpreter, topic naming, inbound routing
//! - [`mqtt`] - Messaging-client capability and its rumqttc implementation
//! - [`storage`] - Per-topic append-only chat logs
//! - [`config`] - TOML configuration
//! - [`validation`] - Identity validation at startup
//! - [`logutil`] - Single-line escaping for untrusted text in console output

pub mod chat;
pub mod config;
pub mod logutil;
pub mod mqtt;
pub mod storage;
pub mod validation;
