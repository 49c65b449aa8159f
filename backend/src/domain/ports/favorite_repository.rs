//! Port for favourite membership persistence.

use async_trait::async_trait;

use crate::domain::{ContentId, Favorite, FavoriteEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favourite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
    }
}

/// Favourite storage. No uniqueness constraint exists at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Fetch the membership row for a (user, content) pair.
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError>;

    /// Insert a membership row.
    async fn insert(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError>;

    /// Delete every row for the pair; returns how many were removed.
    async fn delete(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<usize, FavoriteRepositoryError>;

    /// List a user's favourites with content details, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntry>, FavoriteRepositoryError>;
}
