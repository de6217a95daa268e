//! Login, register, and logout.
//!
//! All three hold the session's in-flight guard for their full duration, so
//! a double-submit fails fast with [`AuthError::InFlight`] instead of racing
//! the slot's last-write-wins semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use hearth_core::error::AuthError;
use hearth_core::models::UserIdentity;
use hearth_core::sanitize::{sanitize_email, sanitize_username};

use crate::config::RegisterBehavior;
use crate::http::routes;
use crate::session::AuthSession;
use crate::wire::{LoginRequest, RegisterRequest, TokenGrant};

/// How long the detached logout invalidation may wait on the server.
const INVALIDATE_TIMEOUT: Duration = Duration::from_secs(5);

/// RAII guard: one auth operation at a time.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AuthError> {
        if flag.swap(true, Ordering::AcqRel) {
            return Err(AuthError::InFlight);
        }
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AuthSession {
    /// Exchange credentials for a token and sign the user in.
    ///
    /// On failure nothing is mutated: slot, header, and identity cache stay
    /// exactly as they were.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let _guard = InFlightGuard::acquire(&self.op_in_flight)?;
        let email = sanitize_email(email);

        let grant: TokenGrant = self
            .client
            .post_json(
                routes::LOGIN,
                &LoginRequest {
                    email: &email,
                    password,
                },
            )
            .await?;

        let TokenGrant { access_token, user } = grant;
        let token = access_token
            .ok_or_else(|| AuthError::Network("login response carried no access token".into()))?;

        self.store.set(&token)?;
        self.cache_identity(user.clone());
        info!(username = %user.username, "signed in");
        Ok(user)
    }

    /// Create an account.
    ///
    /// Callers are expected to have run the policy checks in
    /// [`hearth_core::validation`] first; this does not re-validate.
    /// Whether the new user ends up signed in is controlled by
    /// [`crate::ClientConfig::register_behavior`].
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, AuthError> {
        let _guard = InFlightGuard::acquire(&self.op_in_flight)?;
        let username = sanitize_username(username);
        let email = sanitize_email(email);

        let grant: TokenGrant = self
            .client
            .post_json(
                routes::REGISTER,
                &RegisterRequest {
                    username: &username,
                    email: &email,
                    password,
                },
            )
            .await?;

        let TokenGrant { access_token, user } = grant;
        match (self.config.register_behavior, access_token) {
            (RegisterBehavior::AutoLogin, Some(token)) => {
                self.store.set(&token)?;
                self.cache_identity(user.clone());
                info!(username = %user.username, "registered and signed in");
            }
            _ => {
                info!(username = %user.username, "registered; sign-in pending");
            }
        }
        Ok(user)
    }

    /// Sign out.
    ///
    /// Local state is cleared immediately. The server-side invalidation is
    /// best-effort, detached, and bounded by a short timeout, so an
    /// unreachable or hung server can neither block nor fail the clear.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = InFlightGuard::acquire(&self.op_in_flight)?;

        // Capture the token before the clear disarms the default header.
        let token = self.store.get().ok().flatten();
        self.store.clear()?;
        self.clear_identity();
        info!("signed out");

        if let Some(token) = token {
            let client = Arc::clone(&self.client);
            tokio::spawn(async move {
                let body = serde_json::json!({});
                let call = client.post_json_as::<_, serde_json::Value>(
                    routes::LOGOUT,
                    &body,
                    &token,
                );
                match tokio::time::timeout(INVALIDATE_TIMEOUT, call).await {
                    Ok(Ok(_)) => debug!("server-side logout acknowledged"),
                    Ok(Err(e)) => warn!(error = %e, "server-side logout failed"),
                    Err(_) => warn!("server-side logout timed out"),
                }
            });
        }

        Ok(())
    }
}
