//! Wire shapes for the identity endpoints.

use serde::{Deserialize, Serialize};

use hearth_core::models::UserIdentity;

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `{ user }` envelope returned by `GET /auth/me`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: UserIdentity,
}

/// Token grant returned by login/register. Older servers spell the token
/// field `token`; registration may omit it entirely.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenGrant {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    pub user: UserIdentity,
}
