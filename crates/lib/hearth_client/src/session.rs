//! Session lifecycle: the user identity cache, the derived authentication
//! state, and the one-shot startup bootstrap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use hearth_core::models::UserIdentity;
use hearth_core::token;

use crate::config::ClientConfig;
use crate::http::{ApiClient, routes};
use crate::store::{FileTokenStore, SessionStore, TokenStore};
use crate::wire::UserEnvelope;

/// Derived authentication state. Never stored — computed on demand from
/// the identity cache and the armed bearer header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// True only during the bootstrap window between construction and
    /// bootstrap completion. Protected views must not render while set.
    pub is_loading: bool,
    pub user: Option<UserIdentity>,
}

/// Terminal outcome of the startup bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No persisted token was found. No network call was made.
    NoSession,
    /// A token was found but was malformed or already expired; the slot
    /// was cleared without contacting the server.
    LocalTokenInvalid,
    /// The identity endpoint rejected the token or could not be reached;
    /// the slot was cleared. Recoverable — the user lands on the login view.
    RemoteRejected,
    /// The identity endpoint confirmed the session.
    Authenticated(UserIdentity),
}

/// The session: identity cache plus the collaborators every auth operation
/// needs. One instance per process.
pub struct AuthSession {
    pub(crate) client: Arc<ApiClient>,
    pub(crate) store: SessionStore,
    pub(crate) config: ClientConfig,
    identity: RwLock<Option<UserIdentity>>,
    /// True until the bootstrap completes.
    loading: AtomicBool,
    /// Recorded bootstrap outcome; the cell also serializes concurrent
    /// callers so the sequence runs at most once.
    outcome: OnceCell<BootstrapOutcome>,
    /// One auth operation at a time; see `ops`.
    pub(crate) op_in_flight: AtomicBool,
}

impl AuthSession {
    /// Session with the default file-backed token slot.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_store(config, Box::new(FileTokenStore::new()))
    }

    /// Session with an explicit token store.
    pub fn with_store(config: ClientConfig, store: Box<dyn TokenStore>) -> Self {
        let client = Arc::new(ApiClient::new(config.base_url.clone()));
        Self {
            store: SessionStore::new(store, Arc::clone(&client)),
            client,
            config,
            identity: RwLock::new(None),
            loading: AtomicBool::new(true),
            outcome: OnceCell::new(),
            op_in_flight: AtomicBool::new(false),
        }
    }

    /// The shared HTTP client. Requests issued through it carry the session
    /// bearer header once armed, so the rest of the app should reuse it.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    /// The session token store (read access; writes happen via the auth
    /// operations and the bootstrap).
    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Snapshot of the derived authentication state.
    pub fn state(&self) -> AuthState {
        let user = self
            .identity
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        AuthState {
            is_authenticated: user.is_some() && self.client.has_bearer(),
            is_loading: self.loading.load(Ordering::Acquire),
            user,
        }
    }

    pub(crate) fn cache_identity(&self, user: UserIdentity) {
        *self.identity.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    pub(crate) fn clear_identity(&self) {
        *self.identity.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// One-shot startup bootstrap.
    ///
    /// Reads the persisted token, pre-filters it locally (decode + expiry),
    /// and confirms a fresh-looking one against `GET /auth/me` — the remote
    /// check is the actual trust boundary, the local decode never is. Every
    /// failure path ends unauthenticated with the slot cleared; none is
    /// fatal to the process.
    ///
    /// Runs once per session: the outcome cell serializes concurrent
    /// callers, so late or duplicate invocations observe the first run's
    /// recorded outcome instead of re-executing the sequence.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        if let Some(prev) = self.outcome.get() {
            debug!("bootstrap already completed");
            return prev.clone();
        }

        self.outcome
            .get_or_init(|| async {
                let outcome = self.run_bootstrap().await;
                self.loading.store(false, Ordering::Release);
                outcome
            })
            .await
            .clone()
    }

    async fn run_bootstrap(&self) -> BootstrapOutcome {
        let raw = match self.store.get() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted session token");
                self.clear_identity();
                return BootstrapOutcome::NoSession;
            }
            Err(e) => {
                warn!(error = %e, "session slot unreadable; treating as signed out");
                self.clear_identity();
                return BootstrapOutcome::NoSession;
            }
        };

        // Malformed and expired tokens are treated identically: clear and
        // stay offline.
        let fresh = match token::decode(&raw) {
            Ok(claims) => token::is_fresh(&claims, Utc::now()),
            Err(e) => {
                debug!(error = %e, "persisted token undecodable");
                false
            }
        };
        if !fresh {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear stale token");
            }
            self.clear_identity();
            return BootstrapOutcome::LocalTokenInvalid;
        }

        // Re-arm the Authorization header before the authority check.
        if let Err(e) = self.store.set(&raw) {
            warn!(error = %e, "failed to re-persist session token");
        }

        match self.client.get_json::<UserEnvelope>(routes::ME).await {
            Ok(body) => {
                info!(username = %body.user.username, "session confirmed");
                self.cache_identity(body.user.clone());
                BootstrapOutcome::Authenticated(body.user)
            }
            Err(e) => {
                info!(error = %e, "identity check failed; signing out");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "failed to clear rejected token");
                }
                self.clear_identity();
                BootstrapOutcome::RemoteRejected
            }
        }
    }
}
