//! Core chat functionality: topic naming, command parsing, inbound routing,
//! and the session controller tying them to the messaging client and store.

pub mod commands;
pub mod router;
pub mod session;
pub mod topics;

pub use commands::{Command, CommandParser, SendTarget, ViewTarget};
pub use router::MessageRouter;
pub use session::ChatSession;
