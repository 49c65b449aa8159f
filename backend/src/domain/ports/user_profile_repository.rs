//! Port for profile rows kept next to auth platform accounts.

use async_trait::async_trait;

use crate::domain::{EmailAddress, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

/// Profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Insert a new profile.
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Fetch a profile by user id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserProfileRepositoryError>;

    /// Overwrite the mutable profile fields.
    async fn update(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError>;

    /// Rewrite the email to `sentinel`. Returns whether a row was touched.
    async fn soft_delete(
        &self,
        id: &UserId,
        sentinel: &EmailAddress,
    ) -> Result<bool, UserProfileRepositoryError>;
}
