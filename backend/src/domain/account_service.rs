//! Account lifecycle over the auth platform and the profile table.
//!
//! The platform owns credentials; the profile table owns display fields.
//! Multi-step operations are not compensated: when a later step fails the
//! earlier ones stay applied.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountCommand, AccountQuery, CredentialUpdate, IdentityProvider, IdentityProviderError,
    LoginOutcome, Mailer, PasswordResetRepository, PasswordResetRepositoryError,
    PasswordResetRequested, PlatformUser, UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{
    EmailAddress, EmailMessage, Error, LoginCredentials, Password, PasswordResetTicket,
    ProfileChanges, Registration, ResetToken, UserId, UserProfile,
};

/// Message returned for any rejected sign-in.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";
/// Message returned when a reset token cannot be redeemed.
pub const INVALID_RESET_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Deployment-specific account behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    /// Base URL of the frontend, used to build reset links.
    pub frontend_url: String,
    /// Echo reset tokens in responses. Never enabled in production.
    pub expose_reset_token: bool,
}

impl AccountSettings {
    fn reset_link(&self, token: &ResetToken) -> String {
        format!(
            "{}/reset-password?token={}",
            self.frontend_url.trim_end_matches('/'),
            token.expose()
        )
    }
}

/// Account service implementing [`AccountCommand`] and [`AccountQuery`].
pub struct AccountService<P, U, T> {
    identity: Arc<P>,
    profiles: Arc<U>,
    resets: Arc<T>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    settings: AccountSettings,
}

impl<P, U, T> AccountService<P, U, T> {
    /// Wire the service to its driven ports.
    pub fn new(
        identity: Arc<P>,
        profiles: Arc<U>,
        resets: Arc<T>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        settings: AccountSettings,
    ) -> Self {
        Self {
            identity,
            profiles,
            resets,
            mailer,
            clock,
            settings,
        }
    }
}

fn map_identity_error(err: IdentityProviderError) -> Error {
    match err {
        IdentityProviderError::InvalidCredentials => Error::unauthorized(INVALID_LOGIN_MESSAGE),
        IdentityProviderError::InvalidToken => Error::unauthorized("invalid or expired token"),
        IdentityProviderError::Rejected { message } => {
            debug!(%message, "auth platform rejected request");
            Error::invalid_request("request rejected by auth platform")
                .with_details(json!({ "code": "auth_rejected" }))
        }
        other => {
            error!(error = %other, "auth platform failure");
            Error::internal("authentication service unavailable")
        }
    }
}

fn map_profile_error(err: UserProfileRepositoryError) -> Error {
    error!(error = %err, "profile repository failure");
    Error::internal("failed to process user profile")
}

fn map_reset_error(err: PasswordResetRepositoryError) -> Error {
    error!(error = %err, "reset token repository failure");
    Error::internal("failed to process password reset")
}

fn profile_from_platform(
    user: &PlatformUser,
    fallback_email: &EmailAddress,
    now: DateTime<Utc>,
) -> UserProfile {
    UserProfile {
        id: user.id,
        name: user.name.clone().unwrap_or_default(),
        lastname: user.lastname.clone().unwrap_or_default(),
        email: user
            .email
            .clone()
            .unwrap_or_else(|| fallback_email.as_str().to_owned()),
        birth_date: None,
        created_at: now,
        updated_at: now,
    }
}

impl<P, U, T> AccountService<P, U, T>
where
    U: UserProfileRepository,
{
    async fn existing_profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.profiles
            .find_by_id(user_id)
            .await
            .map_err(map_profile_error)?
            .filter(|profile| !profile.is_deleted())
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<P, U, T> AccountCommand for AccountService<P, U, T>
where
    P: IdentityProvider,
    U: UserProfileRepository,
    T: PasswordResetRepository,
{
    async fn register(&self, registration: Registration) -> Result<UserProfile, Error> {
        let user = self
            .identity
            .sign_up(&registration)
            .await
            .map_err(map_identity_error)?;
        let now = self.clock.utc();
        let profile = UserProfile {
            id: user.id,
            name: registration.name.as_str().to_owned(),
            lastname: registration.lastname.as_str().to_owned(),
            email: registration.email.as_str().to_owned(),
            birth_date: registration.birth_date,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.profiles.insert(&profile).await {
            warn!(user_id = %profile.id, error = %err, "profile insert failed after sign-up");
        }
        if let Err(err) = self.mailer.send(&EmailMessage::welcome(&profile)).await {
            warn!(user_id = %profile.id, error = %err, "welcome email not sent");
        }
        info!(user_id = %profile.id, "account registered");
        Ok(profile)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let session = self
            .identity
            .sign_in(&credentials)
            .await
            .map_err(map_identity_error)?;
        let stored = self
            .profiles
            .find_by_id(&session.user.id)
            .await
            .map_err(map_profile_error)?;
        let profile = match stored {
            Some(profile) => profile,
            None => {
                debug!(user_id = %session.user.id, "no profile row; using platform metadata");
                profile_from_platform(&session.user, credentials.email(), self.clock.utc())
            }
        };
        Ok(LoginOutcome {
            profile,
            token: session.access_token,
        })
    }

    async fn update_profile(&self, user_id: &UserId, changes: ProfileChanges) -> Result<UserProfile, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        let mut profile = self.existing_profile(user_id).await?;

        if changes.touches_credentials() {
            let update = CredentialUpdate {
                email: changes.email.clone(),
                password: changes.password.clone(),
            };
            self.identity
                .update_credentials(user_id, &update)
                .await
                .map_err(map_identity_error)?;
        }

        let ProfileChanges {
            name,
            lastname,
            email,
            birth_date,
            ..
        } = changes;
        if let Some(name) = name {
            profile.name = name.as_str().to_owned();
        }
        if let Some(lastname) = lastname {
            profile.lastname = lastname.as_str().to_owned();
        }
        if let Some(email) = email {
            profile.email = email.as_str().to_owned();
        }
        if birth_date.is_some() {
            profile.birth_date = birth_date;
        }
        profile.updated_at = self.clock.utc();

        self.profiles
            .update(&profile)
            .await
            .map_err(map_profile_error)?;
        Ok(profile)
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error> {
        let sentinel = EmailAddress::deleted_sentinel(user_id);
        let touched = self
            .profiles
            .soft_delete(user_id, &sentinel)
            .await
            .map_err(map_profile_error)?;
        if !touched {
            return Err(Error::not_found("user not found"));
        }

        let update = CredentialUpdate {
            email: Some(sentinel),
            password: None,
        };
        self.identity
            .update_credentials(user_id, &update)
            .await
            .map_err(map_identity_error)?;
        info!(user_id = %user_id, "account soft-deleted");
        Ok(())
    }

    async fn request_password_reset(&self, email: EmailAddress) -> Result<PasswordResetRequested, Error> {
        let Some(user) = self
            .identity
            .find_by_email(&email)
            .await
            .map_err(map_identity_error)?
        else {
            debug!("password reset requested for unknown email");
            return Ok(PasswordResetRequested::default());
        };

        let token = ResetToken::generate();
        let ticket = PasswordResetTicket::issue(&token, user.id, self.clock.utc());
        self.resets.store(&ticket).await.map_err(map_reset_error)?;

        let message = EmailMessage::password_reset(email.as_str(), &self.settings.reset_link(&token));
        self.mailer.send(&message).await.map_err(|err| {
            error!(user_id = %user.id, error = %err, "reset email not sent");
            Error::internal("failed to send password reset email")
        })?;
        info!(user_id = %user.id, "password reset issued");

        Ok(PasswordResetRequested {
            debug_token: self
                .settings
                .expose_reset_token
                .then(|| token.expose().to_owned()),
        })
    }

    async fn reset_password(&self, token: ResetToken, new_password: Password) -> Result<(), Error> {
        let hash = token.hash();
        let now = self.clock.utc();
        let ticket = self
            .resets
            .find(&hash)
            .await
            .map_err(map_reset_error)?
            .filter(|ticket| ticket.is_redeemable(now))
            .ok_or_else(|| Error::invalid_request(INVALID_RESET_TOKEN_MESSAGE))?;

        let update = CredentialUpdate {
            email: None,
            password: Some(new_password),
        };
        self.identity
            .update_credentials(&ticket.user_id, &update)
            .await
            .map_err(map_identity_error)?;
        self.resets
            .mark_used(&hash, now)
            .await
            .map_err(map_reset_error)?;
        info!(user_id = %ticket.user_id, "password reset completed");
        Ok(())
    }
}

#[async_trait]
impl<P, U, T> AccountQuery for AccountService<P, U, T>
where
    P: IdentityProvider,
    U: UserProfileRepository,
    T: PasswordResetRepository,
{
    async fn profile(&self, user_id: &UserId) -> Result<UserProfile, Error> {
        self.existing_profile(user_id).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
