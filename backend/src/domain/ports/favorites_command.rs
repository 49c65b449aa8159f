//! Driving ports for favourite use-cases.

use async_trait::async_trait;

use crate::domain::{ContentId, Error, Favorite, FavoriteEntry, UserId};

/// Favourite mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Add a favourite; `Conflict` when it already exists.
    async fn add(&self, user_id: &UserId, content_id: &ContentId) -> Result<Favorite, Error>;

    /// Remove a favourite; succeeds when nothing was stored.
    async fn remove(&self, user_id: &UserId, content_id: &ContentId) -> Result<(), Error>;
}

/// Favourite reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// Whether the pair is a favourite.
    async fn is_favorite(&self, user_id: &UserId, content_id: &ContentId) -> Result<bool, Error>;

    /// All favourites for a user.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntry>, Error>;
}
