//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{ContentId, Favorite, FavoriteEntry, UserId};

use super::diesel_content_repository::row_to_content;
use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ContentRow, FavoriteRow, NewFavoriteRow};
use super::pool::DbPool;
use super::schema::{contents, favorites};

/// Diesel-backed favourite storage.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_diesel_error(
        error,
        |message| FavoriteRepositoryError::query(message),
        |message| FavoriteRepositoryError::connection(message),
    )
}

fn row_to_favorite(row: FavoriteRow) -> Favorite {
    Favorite {
        user_id: UserId::from_uuid(row.user_id),
        content_id: ContentId::from_uuid(row.content_id),
        added_at: row.added_at,
    }
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FavoriteRepositoryError::connection))?;

        let row: Option<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .filter(favorites::content_id.eq(content_id.as_uuid()))
            .order(favorites::added_at.asc())
            .select(FavoriteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_favorite))
    }

    async fn insert(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FavoriteRepositoryError::connection))?;

        let row = NewFavoriteRow {
            id: Uuid::new_v4(),
            user_id: *favorite.user_id.as_uuid(),
            content_id: *favorite.content_id.as_uuid(),
            added_at: favorite.added_at,
        };
        diesel::insert_into(favorites::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn delete(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<usize, FavoriteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FavoriteRepositoryError::connection))?;

        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_uuid()))
                .filter(favorites::content_id.eq(content_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<FavoriteEntry>, FavoriteRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FavoriteRepositoryError::connection))?;

        let rows: Vec<(FavoriteRow, ContentRow)> = favorites::table
            .inner_join(contents::table)
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .order(favorites::added_at.desc())
            .select((FavoriteRow::as_select(), ContentRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(favorite, content)| {
                let content = row_to_content(content)?;
                Some(FavoriteEntry {
                    favorite: row_to_favorite(favorite),
                    content: content.summary(),
                })
            })
            .collect())
    }
}
