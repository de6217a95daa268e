//! Domain models shared across the Hearth client crates.

use serde::{Deserialize, Serialize};

/// Authenticated user record, as returned by the identity endpoints.
///
/// At most one identity is "current" at a time — always the one from the
/// most recent successful authority check or auth operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable identifier. Some server variants omit it on login responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the profile carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Claims parsed from a bearer token payload.
///
/// Parsed without signature verification — see [`crate::token`] for the
/// trust caveats. `exp` is the only claim this client requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiry (unix timestamp, seconds).
    pub exp: i64,
    /// Subject — user ID (standard JWT `sub` claim).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at (unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Claims this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
