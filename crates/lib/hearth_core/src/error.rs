//! Error taxonomy shared by the Hearth client crates.

use thiserror::Error;

/// Form field a client-side policy failure refers to.
///
/// Lets the caller render the message inline next to the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Terms,
}

/// Client-side credential policy failure.
///
/// Never contacts the network; blocks submission until resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: CredentialField,
    pub message: String,
}

/// Authentication and session errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The persisted token could not be parsed. Recovered locally by
    /// treating the session as absent.
    #[error("Malformed session token: {0}")]
    TokenDecode(String),

    /// The persisted token's `exp` claim is in the past.
    #[error("Session token expired")]
    TokenExpired,

    /// The identity API answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The identity API could not be reached, or sent an unreadable body.
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side policy failure, surfaced inline next to the field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persisted token slot could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Bad client configuration (base URL, endpoint paths).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Another auth operation is still pending. Retry once it settles.
    #[error("Another authentication request is already in flight")]
    InFlight,
}

impl AuthError {
    /// Message suitable for direct display in the UI.
    ///
    /// Server-provided messages are passed through; transport-level noise
    /// is replaced with a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Remote { message, .. } if !message.is_empty() => message.clone(),
            AuthError::Remote { .. } | AuthError::Network(_) => {
                "Unable to reach the server. Please try again.".to_string()
            }
            AuthError::TokenDecode(_) | AuthError::TokenExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::Validation(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}
