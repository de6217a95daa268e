//! # hearth_core
//!
//! Core domain logic for the Hearth client: bearer-token codec, credential
//! policy checks, input sanitization, and the shared error taxonomy.
//!
//! Everything here is pure — no I/O, no network. The HTTP-facing session
//! layer lives in `hearth_client`.

pub mod error;
pub mod models;
pub mod sanitize;
pub mod token;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
