//! Driving ports for account lifecycle use-cases.

use async_trait::async_trait;

use crate::domain::{
    AccessToken, EmailAddress, Error, LoginCredentials, Password, ProfileChanges, Registration,
    ResetToken, UserId, UserProfile,
};

/// Successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub profile: UserProfile,
    pub token: AccessToken,
}

/// Result of a forgot-password request.
///
/// `debug_token` is populated only outside production and only when the
/// email belongs to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetRequested {
    pub debug_token: Option<String>,
}

/// Account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and its profile.
    async fn register(&self, registration: Registration) -> Result<UserProfile, Error>;

    /// Sign in with email and password.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error>;

    /// Apply a partial profile update.
    async fn update_profile(&self, user_id: &UserId, changes: ProfileChanges) -> Result<UserProfile, Error>;

    /// Soft-delete the account.
    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error>;

    /// Issue and email a reset token when the address is known.
    async fn request_password_reset(&self, email: EmailAddress) -> Result<PasswordResetRequested, Error>;

    /// Redeem a reset token and set a new password.
    async fn reset_password(&self, token: ResetToken, new_password: Password) -> Result<(), Error>;
}

/// Account reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch the caller's profile.
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error>;
}
