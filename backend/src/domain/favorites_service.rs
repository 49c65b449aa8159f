//! Favourite set management.
//!
//! `add` checks for an existing row before inserting. The check and the insert
//! are not atomic, so concurrent adds may both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::content_registrar::map_content_error;
use crate::domain::ports::{
    ContentRepository, FavoriteRepository, FavoriteRepositoryError, FavoritesCommand, FavoritesQuery,
};
use crate::domain::{ContentId, Error, Favorite, FavoriteEntry, UserId};

/// Favourites service implementing the favourite driving ports.
pub struct FavoritesService<C, F> {
    contents: Arc<C>,
    favorites: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<C, F> FavoritesService<C, F> {
    /// Create a service over the content and favourite repositories.
    pub fn new(contents: Arc<C>, favorites: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            contents,
            favorites,
            clock,
        }
    }
}

fn map_favorite_error(err: FavoriteRepositoryError) -> Error {
    error!(error = %err, "favorite repository failure");
    Error::internal("failed to process favorite")
}

#[async_trait]
impl<C, F> FavoritesCommand for FavoritesService<C, F>
where
    C: ContentRepository,
    F: FavoriteRepository,
{
    async fn add(&self, user_id: &UserId, content_id: &ContentId) -> Result<Favorite, Error> {
        let content = self
            .contents
            .find_by_id(content_id)
            .await
            .map_err(map_content_error)?;
        if content.is_none() {
            return Err(Error::not_found("content not found"));
        }

        let existing = self
            .favorites
            .find(user_id, content_id)
            .await
            .map_err(map_favorite_error)?;
        if existing.is_some() {
            return Err(Error::conflict("content is already in favorites"));
        }

        let favorite = Favorite {
            user_id: *user_id,
            content_id: *content_id,
            added_at: self.clock.utc(),
        };
        self.favorites
            .insert(&favorite)
            .await
            .map_err(map_favorite_error)?;
        Ok(favorite)
    }

    async fn remove(&self, user_id: &UserId, content_id: &ContentId) -> Result<(), Error> {
        let removed = self
            .favorites
            .delete(user_id, content_id)
            .await
            .map_err(map_favorite_error)?;
        debug!(user_id = %user_id, content_id = %content_id, removed, "favorite removed");
        Ok(())
    }
}

#[async_trait]
impl<C, F> FavoritesQuery for FavoritesService<C, F>
where
    C: ContentRepository,
    F: FavoriteRepository,
{
    async fn is_favorite(&self, user_id: &UserId, content_id: &ContentId) -> Result<bool, Error> {
        self.favorites
            .find(user_id, content_id)
            .await
            .map(|found| found.is_some())
            .map_err(map_favorite_error)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<FavoriteEntry>, Error> {
        self.favorites
            .list_for_user(user_id)
            .await
            .map_err(map_favorite_error)
    }
}

#[cfg(test)]
#[path = "favorites_service_tests.rs"]
mod tests;
