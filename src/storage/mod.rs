//! # Storage Module - Chat Log Persistence
//!
//! One append-only text file per topic, named by the topic's filename
//! transform, under a configured data directory. Files are line-delimited:
//! one observed message per line, appended in arrival order, never rotated or
//! truncated by this crate.
//!
//! Writes use scoped handle acquisition: each append opens the file, writes,
//! flushes, and closes. A single async mutex serializes writers so at most
//! one writable handle per file exists at a time, which is what keeps
//! interleaved appends from the command loop and the inbound pump at line
//! granularity.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mqchat::storage::ChatLogStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = ChatLogStore::new("./data").await?;
//!     store.append("/chat/todos", "cesar: hello").await?;
//!     for line in store.read_all("/chat/todos").await? {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::chat::topics::log_file_name;

/// Errors surfaced by the chat log store. Never silently swallowed: append
/// failures go back to the caller, and a missing log is its own case so the
/// session can print the no-chat notice instead of an I/O error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no chat log exists for topic '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Per-topic append-only chat logs under one data directory.
pub struct ChatLogStore {
    data_dir: PathBuf,
    // Single-writer-at-a-time across all topics; appends are short-lived.
    write_gate: Mutex<()>,
}

impl ChatLogStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    pub async fn new(data_dir: &str) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).await?;
        Ok(ChatLogStore {
            data_dir: PathBuf::from(data_dir),
            write_gate: Mutex::new(()),
        })
    }

    /// On-disk path of the log file for `topic`.
    pub fn log_path(&self, topic: &str) -> PathBuf {
        self.data_dir.join(log_file_name(topic))
    }

    /// Append one message line to the log for `topic`, creating the file on
    /// first use. The write is flushed before this returns.
    pub async fn append(&self, topic: &str, message: &str) -> Result<(), StoreError> {
        let _writer = self.write_gate.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path(topic))
            .await?;
        file.write_all(message.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }

    /// Read the full ordered sequence of lines appended to `topic`'s log.
    ///
    /// Probes durable storage directly, so history written by a previous run
    /// is visible. A topic whose log file does not exist yields
    /// [`StoreError::NotFound`].
    pub async fn read_all(&self, topic: &str) -> Result<Vec<String>, StoreError> {
        match fs::read_to_string(self.log_path(topic)).await {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(topic.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The data directory this store writes under.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
