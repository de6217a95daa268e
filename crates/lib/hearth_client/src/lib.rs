//! # hearth_client
//!
//! Session and authentication client for the Hearth dashboard: a persisted
//! bearer-token slot, a one-shot startup bootstrap that reconciles it
//! against the identity API, and the login/register/logout operations.
//!
//! The pure pieces (token codec, credential policy, errors) live in
//! [`hearth_core`]; this crate owns everything that touches the network or
//! the filesystem.

pub mod config;
pub mod http;
pub mod session;
pub mod store;

mod ops;
mod wire;

pub use config::{ClientConfig, RegisterBehavior};
pub use session::{AuthSession, AuthState, BootstrapOutcome};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
