//! Port for the managed auth platform.
//!
//! The platform owns credentials and issues bearer tokens. Adapters translate
//! its HTTP responses into the closed error kinds below so callers never
//! inspect upstream message text.

use async_trait::async_trait;

use crate::domain::{AccessToken, EmailAddress, LoginCredentials, Password, Registration, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by auth platform adapters.
    pub enum IdentityProviderError {
        /// Email and password did not match an account.
        InvalidCredentials => "invalid login credentials",
        /// The bearer token is expired, malformed or revoked.
        InvalidToken => "access token rejected",
        /// The platform refused the request, e.g. the email is already registered.
        Rejected { message: String } => "auth platform rejected request: {message}",
        /// Network failure or unexpected status.
        Transport { message: String } => "auth platform unreachable: {message}",
        /// Response body could not be decoded.
        Decode { message: String } => "auth platform response invalid: {message}",
    }
}

/// Account as seen by the auth platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformUser {
    pub id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
}

/// Signed-in session returned by a password login.
#[derive(Debug, Clone)]
pub struct PlatformSession {
    pub access_token: AccessToken,
    pub user: PlatformUser,
}

/// Credential changes applied with service-role privileges.
#[derive(Debug, Clone, Default)]
pub struct CredentialUpdate {
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
}

/// Port for the auth platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account; name and lastname are stored as user metadata.
    async fn sign_up(&self, registration: &Registration) -> Result<PlatformUser, IdentityProviderError>;

    /// Exchange email and password for a session.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PlatformSession, IdentityProviderError>;

    /// Resolve a bearer token to its account.
    async fn user_for_token(&self, token: &AccessToken) -> Result<PlatformUser, IdentityProviderError>;

    /// Change email and/or password for an account.
    async fn update_credentials(
        &self,
        user_id: &UserId,
        update: &CredentialUpdate,
    ) -> Result<(), IdentityProviderError>;

    /// Find an account by email via the admin user listing.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlatformUser>, IdentityProviderError>;
}
