//! PostgreSQL-backed `ContentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ContentRepository, ContentRepositoryError};
use crate::domain::{Content, ContentId, ExternalContentId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ContentRow;
use super::pool::DbPool;
use super::schema::contents;

/// Diesel-backed content storage.
#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ContentRepositoryError {
    map_diesel_error(
        error,
        |message| ContentRepositoryError::query(message),
        |message| ContentRepositoryError::connection(message),
    )
}

/// Rebuild a domain content item; rows with an unusable external id are
/// skipped with a warning.
pub(crate) fn row_to_content(row: ContentRow) -> Option<Content> {
    let external_id = match ExternalContentId::new(&row.external_id) {
        Ok(external_id) => external_id,
        Err(err) => {
            warn!(content_id = %row.id, error = %err, "skipping content row with invalid external id");
            return None;
        }
    };
    Some(Content {
        id: ContentId::from_uuid(row.id),
        external_id,
        title: row.title,
        content_type: row.content_type,
        duration_seconds: row.duration_seconds,
        rating: row.rating,
        created_at: row.created_at,
    })
}

fn content_to_row(content: &Content) -> ContentRow {
    ContentRow {
        id: *content.id.as_uuid(),
        external_id: content.external_id.as_str().to_owned(),
        title: content.title.clone(),
        content_type: content.content_type.clone(),
        duration_seconds: content.duration_seconds,
        rating: content.rating,
        created_at: content.created_at,
    }
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, ContentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContentRepositoryError::connection))?;

        let row: Option<ContentRow> = contents::table
            .filter(contents::id.eq(id.as_uuid()))
            .select(ContentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.and_then(row_to_content))
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalContentId,
    ) -> Result<Option<Content>, ContentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContentRepositoryError::connection))?;

        let row: Option<ContentRow> = contents::table
            .filter(contents::external_id.eq(external_id.as_str()))
            .order((contents::created_at.asc(), contents::id.asc()))
            .select(ContentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.and_then(row_to_content))
    }

    async fn insert(&self, content: &Content) -> Result<(), ContentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ContentRepositoryError::connection))?;

        diesel::insert_into(contents::table)
            .values(&content_to_row(content))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}
