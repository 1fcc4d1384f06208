//! Customer session credentials.
//!
//! The session is an explicit value passed into the catalog client rather
//! than ambient global state, so multiple concurrent sessions can coexist
//! and tests need no environment faking. An anonymous session is valid for
//! all read operations; the two auth-gated operations refuse locally with
//! [`CatalogError::Unauthenticated`] before any request is made.

use secrecy::SecretString;

use crate::catalog::CatalogError;
use crate::config::StorefrontConfig;

/// The current customer session, authenticated or anonymous.
#[derive(Clone, Default)]
pub struct Session {
    access_token: Option<SecretString>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Session {
    /// An anonymous session with no credential.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { access_token: None }
    }

    /// A session carrying a bearer token.
    #[must_use]
    pub const fn with_token(token: SecretString) -> Self {
        Self {
            access_token: Some(token),
        }
    }

    /// Build a session from the configured access token, anonymous if none
    /// is configured.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            access_token: config.access_token.clone(),
        }
    }

    /// Whether the session carries a credential.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The bearer token for auth-gated requests.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] when the session is
    /// anonymous; callers must not issue the request in that case.
    pub(crate) fn bearer(&self) -> Result<&SecretString, CatalogError> {
        self.access_token
            .as_ref()
            .ok_or(CatalogError::Unauthenticated)
    }
}
