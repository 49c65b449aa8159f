//! Port for rating persistence.

use async_trait::async_trait;

use crate::domain::{ContentId, Rating, RatingEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating repository adapters.
    pub enum RatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rating repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rating repository query failed: {message}",
        /// A rating already exists for the (user, content) pair.
        Duplicate => "rating already exists for this user and content",
    }
}

/// Rating storage with one row per (user, content).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Fetch the caller's rating for a content item.
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Rating>, RatingRepositoryError>;

    /// Insert a new rating.
    async fn insert(&self, rating: &Rating) -> Result<(), RatingRepositoryError>;

    /// Persist score, comment and `updated_at` of an existing rating.
    async fn update(&self, rating: &Rating) -> Result<(), RatingRepositoryError>;

    /// List a user's ratings with content details, most recently updated first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RatingEntry>, RatingRepositoryError>;
}
