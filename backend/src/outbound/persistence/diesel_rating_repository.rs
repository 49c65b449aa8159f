//! PostgreSQL-backed `RatingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{RatingRepository, RatingRepositoryError};
use crate::domain::{ContentId, Rating, RatingEntry, Score, UserId};

use super::diesel_content_repository::row_to_content;
use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{ContentRow, RatingRow, RatingUpdate};
use super::pool::DbPool;
use super::schema::{contents, ratings};

/// Diesel-backed rating storage.
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> RatingRepositoryError {
    if is_unique_violation(&error) {
        return RatingRepositoryError::duplicate();
    }
    map_diesel_error(
        error,
        |message| RatingRepositoryError::query(message),
        |message| RatingRepositoryError::connection(message),
    )
}

fn score_from_db(row: &RatingRow) -> Option<Score> {
    let raw = row.score?;
    match Score::new(i64::from(raw)) {
        Ok(score) => Some(score),
        Err(err) => {
            warn!(rating_id = %row.id, error = %err, "ignoring out-of-range stored score");
            None
        }
    }
}

fn row_to_rating(row: RatingRow) -> Rating {
    let score = score_from_db(&row);
    Rating {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        content_id: ContentId::from_uuid(row.content_id),
        score,
        comment: row.comment,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn rating_to_row(rating: &Rating) -> RatingRow {
    RatingRow {
        id: rating.id,
        user_id: *rating.user_id.as_uuid(),
        content_id: *rating.content_id.as_uuid(),
        score: rating.score.map(|score| i16::from(score.get())),
        comment: rating.comment.clone(),
        created_at: rating.created_at,
        updated_at: rating.updated_at,
    }
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn find(
        &self,
        user_id: &UserId,
        content_id: &ContentId,
    ) -> Result<Option<Rating>, RatingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RatingRepositoryError::connection))?;

        let row: Option<RatingRow> = ratings::table
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .filter(ratings::content_id.eq(content_id.as_uuid()))
            .select(RatingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_rating))
    }

    async fn insert(&self, rating: &Rating) -> Result<(), RatingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RatingRepositoryError::connection))?;

        diesel::insert_into(ratings::table)
            .values(&rating_to_row(rating))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn update(&self, rating: &Rating) -> Result<(), RatingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RatingRepositoryError::connection))?;

        let changes = RatingUpdate {
            score: rating.score.map(|score| i16::from(score.get())),
            comment: rating.comment.as_deref(),
            updated_at: rating.updated_at,
        };
        let updated = diesel::update(ratings::table.filter(ratings::id.eq(rating.id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;

        if updated == 0 {
            return Err(RatingRepositoryError::query("rating not found for update"));
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RatingEntry>, RatingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, RatingRepositoryError::connection))?;

        let rows: Vec<(RatingRow, ContentRow)> = ratings::table
            .inner_join(contents::table)
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .order((ratings::updated_at.desc(), ratings::id.asc()))
            .select((RatingRow::as_select(), ContentRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(rating, content)| {
                let content = row_to_content(content)?;
                Some(RatingEntry {
                    rating: row_to_rating(rating),
                    content: content.summary(),
                })
            })
            .collect())
    }
}
