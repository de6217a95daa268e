//! Thin reqwest wrapper around the identity API.
//!
//! The default `Authorization` header lives here as an explicit slot on the
//! client, not as ambient global state. Only the session store writes it;
//! every request issued through this client carries it once armed.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use hearth_core::error::AuthError;

/// Identity API routes, relative to the configured base URL.
pub mod routes {
    pub const LOGIN: &str = "auth/login";
    pub const REGISTER: &str = "auth/register";
    pub const ME: &str = "auth/me";
    pub const LOGOUT: &str = "auth/logout";
}

/// Error body shape returned by the identity API. Field names vary across
/// server versions, so all the known spellings are tried.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the identity API.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    /// Default bearer token applied to every request; `None` when signed out.
    bearer: RwLock<Option<String>>,
}

/// Upper bound on any single request. Nothing in the session layer may
/// wait on the network forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        // The builder only fails when the TLS backend cannot initialize;
        // fall back to the default client rather than panic.
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url,
            bearer: RwLock::new(None),
        }
    }

    /// Arm the default `Authorization: Bearer <token>` header.
    pub(crate) fn set_bearer(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    /// Disarm the default `Authorization` header.
    pub(crate) fn clear_bearer(&self) {
        *self.bearer.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether a bearer token is currently armed.
    pub fn has_bearer(&self) -> bool {
        self.bearer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::Config(format!("bad endpoint {path:?}: {e}")))
    }

    fn with_bearer(&self, req: RequestBuilder) -> RequestBuilder {
        match &*self.bearer.read().unwrap_or_else(|e| e.into_inner()) {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// POST a JSON body, expecting a JSON response.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AuthError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let resp = self
            .with_bearer(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("POST {path}: {e}")))?;
        Self::read_json(path, resp).await
    }

    /// POST a JSON body with an explicit bearer token, ignoring the armed
    /// default. Used for the post-signout invalidation call, which runs
    /// after the default header has already been disarmed.
    pub(crate) async fn post_json_as<B, R>(
        &self,
        path: &str,
        body: &B,
        bearer: &str,
    ) -> Result<R, AuthError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("POST {path}: {e}")))?;
        Self::read_json(path, resp).await
    }

    /// GET a JSON response.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AuthError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let resp = self
            .with_bearer(self.http.get(url))
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("GET {path}: {e}")))?;
        Self::read_json(path, resp).await
    }

    async fn read_json<R: DeserializeOwned>(path: &str, resp: Response) -> Result<R, AuthError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message.or(b.msg).or(b.error))
                .unwrap_or_default();
            debug!(%status, path, "identity API error");
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| AuthError::Network(format!("{path}: malformed response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_slot_arms_and_disarms() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/").unwrap());
        assert!(!client.has_bearer());
        client.set_bearer("t1");
        assert!(client.has_bearer());
        client.clear_bearer();
        assert!(!client.has_bearer());
    }

    #[test]
    fn endpoints_join_relative_to_base() {
        let client = ApiClient::new(Url::parse("http://localhost:5000/api/").unwrap());
        let url = client.endpoint(routes::ME).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/auth/me");
    }
}
