//! Client configuration.

use url::Url;

use hearth_core::error::AuthError;

/// What to do after a successful registration.
///
/// The upstream dashboard shipped both behaviors at different points, so
/// this is an explicit choice rather than a hard-coded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterBehavior {
    /// Store the returned token and treat the new user as signed in.
    #[default]
    AutoLogin,
    /// Ignore any returned token; the user signs in manually afterwards.
    RedirectToLogin,
}

/// Configuration for the Hearth identity client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the identity API (e.g. `http://localhost:5000/`).
    pub base_url: Url,
    /// Post-registration behavior.
    pub register_behavior: RegisterBehavior,
}

impl ClientConfig {
    /// Builds a config. The base URL is normalized to end in `/` — under
    /// `Url::join`, a base without a trailing slash silently drops its last
    /// path segment, sending `/api` traffic to `/auth/...`.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            register_behavior: RegisterBehavior::default(),
        }
    }

    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                    | Default                  |
    /// |-----------------------------|--------------------------|
    /// | `HEARTH_API_URL`            | `http://localhost:5000/` |
    /// | `HEARTH_REGISTER_AUTOLOGIN` | `true`                   |
    pub fn from_env() -> Result<Self, AuthError> {
        let raw =
            std::env::var("HEARTH_API_URL").unwrap_or_else(|_| "http://localhost:5000/".into());
        let base_url = Url::parse(&raw)
            .map_err(|e| AuthError::Config(format!("HEARTH_API_URL {raw:?}: {e}")))?;

        let auto_login = std::env::var("HEARTH_REGISTER_AUTOLOGIN")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let mut config = Self::new(base_url);
        if !auto_login {
            config.register_behavior = RegisterBehavior::RedirectToLogin;
        }
        Ok(config)
    }
}
