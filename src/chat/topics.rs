//! Topic naming: the wire contract with the broker, the filename transform
//! for chat logs, and the publish authorization predicate.

/// The shared topic every participant subscribes to at startup.
pub const BROADCAST_TOPIC: &str = "/chat/todos";

/// Namespace prefix under which all chat topics live.
pub const CHAT_NAMESPACE: &str = "/chat";

/// File extension for on-disk chat logs.
const LOG_EXTENSION: &str = ".txt";

/// Canonical topic for messages flowing from `sender` to `recipient`.
/// Directional: `direct_topic(a, b) != direct_topic(b, a)`.
pub fn direct_topic(sender: &str, recipient: &str) -> String {
    format!("{CHAT_NAMESPACE}/{sender}/{recipient}")
}

/// Topic a raw `chat <target>` sub-path refers to: the target under the chat
/// namespace. The `todos` shorthand is resolved by the command parser before
/// this is consulted; viewing does not need to know the pair ordering the
/// sender used, so no `direct_topic` mapping happens here.
pub fn view_topic(target: &str) -> String {
    format!("{CHAT_NAMESPACE}/{target}")
}

/// Filesystem-safe log filename for a topic: every `/` becomes `_`, plus the
/// log extension. Deterministic; other characters pass through unescaped
/// (identities are validated at startup, remote topic strings are
/// broker-controlled either way).
pub fn log_file_name(topic: &str) -> String {
    format!("{}{}", topic.replace('/', "_"), LOG_EXTENSION)
}

/// Whether `identity` may publish to `topic`. You may only publish as
/// yourself: the broadcast topic, your own identity topic, or a direct topic
/// whose first component is your identity. Never a topic naming someone else
/// as the sender.
pub fn can_publish(identity: &str, topic: &str) -> bool {
    topic == BROADCAST_TOPIC
        || topic == format!("{CHAT_NAMESPACE}/{identity}")
        || topic.starts_with(&format!("{CHAT_NAMESPACE}/{identity}/"))
}
