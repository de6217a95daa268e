//! Bearer token codec — parse-only.
//!
//! [`decode`] reads the payload segment of a JWT-shaped token and parses it
//! as a claims object. It does **not** verify the signature and is therefore
//! not a security control: the claims are untrusted input, and the local
//! expiry check is only a cheap pre-filter that avoids a pointless round
//! trip with a token that is already stale. The authoritative session check
//! is the remote identity fetch (`GET /auth/me`) — never treat a locally
//! decoded token as proof of identity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::models::TokenClaims;

/// Decode the claims of a JWT-shaped bearer token without verifying it.
///
/// Malformed input yields [`AuthError::TokenDecode`], never a panic.
pub fn decode(raw: &str) -> Result<TokenClaims, AuthError> {
    let mut segments = raw.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::TokenDecode(
            "expected three dot-separated segments".into(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::TokenDecode(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::TokenDecode(format!("payload is not a claims object: {e}")))
}

/// Whether the claims are unexpired at `now`.
pub fn is_fresh(claims: &TokenClaims, now: DateTime<Utc>) -> bool {
    claims.exp > now.timestamp()
}
