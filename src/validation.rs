//! Identity validation performed once at startup.
//!
//! The identity doubles as the MQTT client id and as a component of topic
//! strings and chat-log filenames, so it must stay free of separators and
//! control characters.

/// Maximum identity length in bytes. MQTT v3.1.1 brokers are only required to
/// accept 23-byte client ids, but every mainstream broker takes far more; 64
/// keeps filenames reasonable.
pub const MAX_IDENTITY_BYTES: usize = 64;

/// Identity validation errors with operator-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity cannot be empty")]
    Empty,

    #[error("identity is too long (maximum {max} bytes)")]
    TooLong { max: usize },

    #[error("identity cannot contain whitespace")]
    Whitespace,

    #[error("identity cannot contain path separators (/ or \\)")]
    PathSeparator,

    #[error("identity cannot contain control characters")]
    ControlCharacter,
}

/// Validate the identity this process will present as.
pub fn validate_identity(identity: &str) -> Result<(), IdentityError> {
    if identity.is_empty() {
        return Err(IdentityError::Empty);
    }
    if identity.len() > MAX_IDENTITY_BYTES {
        return Err(IdentityError::TooLong {
            max: MAX_IDENTITY_BYTES,
        });
    }
    if identity.chars().any(char::is_whitespace) {
        return Err(IdentityError::Whitespace);
    }
    if identity.contains('/') || identity.contains('\\') {
        return Err(IdentityError::PathSeparator);
    }
    if identity.chars().any(char::is_control) {
        return Err(IdentityError::ControlCharacter);
    }
    Ok(())
}
