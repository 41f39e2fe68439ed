//! Operator command parsing.
//!
//! One input line, whitespace-delimited, first two tokens mandatory:
//!
//! ```text
//! <action> <target> [<rest-of-line-as-message>]
//! ```
//!
//! Recognized actions are `send` and `chat`, both case-insensitive. Anything
//! that does not fit the grammar parses to [`Command::Invalid`]; the caller
//! prints a notice and keeps the loop going.

/// Where a `send` command is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTarget {
    /// The shared broadcast topic (`send todos ...`).
    All,
    /// A directed pair (`send alice/bob ...`): messages flow `from` -> `to`.
    Pair { from: String, to: String },
}

/// Which chat log a `chat` command displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    /// The broadcast topic's log.
    All,
    /// A raw sub-path under the chat namespace.
    Topic(String),
}

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send {
        target: SendTarget,
        message: String,
    },
    View {
        target: ViewTarget,
    },
    Invalid,
}

/// Parser for operator input lines.
#[derive(Debug, Default)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        CommandParser
    }

    /// Parse a single input line into a [`Command`].
    pub fn parse(&self, line: &str) -> Command {
        let Some((action, rest)) = next_token(line) else {
            return Command::Invalid;
        };
        let Some((target, rest)) = next_token(rest) else {
            return Command::Invalid;
        };
        // Message is the rest of the line; internal whitespace is preserved,
        // and it may be empty.
        let message = rest.trim_start();

        if action.eq_ignore_ascii_case("send") {
            let Some(target) = parse_send_target(target) else {
                return Command::Invalid;
            };
            Command::Send {
                target,
                message: message.to_string(),
            }
        } else if action.eq_ignore_ascii_case("chat") {
            let target = if target.eq_ignore_ascii_case("todos") {
                ViewTarget::All
            } else {
                ViewTarget::Topic(target.to_string())
            };
            Command::View { target }
        } else {
            Command::Invalid
        }
    }
}

/// Split the next whitespace-delimited token off `s`, tolerating runs of
/// whitespace between tokens.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(i) => Some((&s[..i], &s[i..])),
        None => Some((s, "")),
    }
}

fn parse_send_target(target: &str) -> Option<SendTarget> {
    if target.eq_ignore_ascii_case("todos") {
        return Some(SendTarget::All);
    }
    // A pair target is exactly one separator with two non-empty parts.
    let parts: Vec<&str> = target.split('/').collect();
    match parts.as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => Some(SendTarget::Pair {
            from: from.to_string(),
            to: to.to_string(),
        }),
        _ => None,
    }
}
