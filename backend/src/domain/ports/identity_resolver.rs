//! Driving port resolving bearer tokens to user identifiers.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, UserId};

/// Resolves a bearer token to the caller's identity.
///
/// Implementations return [`crate::domain::ErrorCode::Unauthorized`] for
/// rejected tokens so handlers can stop before any domain operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the token.
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error>;
}
