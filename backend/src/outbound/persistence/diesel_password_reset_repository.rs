//! PostgreSQL-backed `PasswordResetRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PasswordResetRepository, PasswordResetRepositoryError};
use crate::domain::{PasswordResetTicket, TokenHash, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::PasswordResetRow;
use super::pool::DbPool;
use super::schema::password_reset_tokens;

/// Diesel-backed reset ticket storage.
#[derive(Clone)]
pub struct DieselPasswordResetRepository {
    pool: DbPool,
}

impl DieselPasswordResetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> PasswordResetRepositoryError {
    map_diesel_error(
        error,
        |message| PasswordResetRepositoryError::query(message),
        |message| PasswordResetRepositoryError::connection(message),
    )
}

fn row_to_ticket(row: PasswordResetRow) -> PasswordResetTicket {
    PasswordResetTicket {
        token_hash: TokenHash::from_stored(row.token_hash),
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        expires_at: row.expires_at,
        used_at: row.used_at,
    }
}

#[async_trait]
impl PasswordResetRepository for DieselPasswordResetRepository {
    async fn store(&self, ticket: &PasswordResetTicket) -> Result<(), PasswordResetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PasswordResetRepositoryError::connection))?;

        let row = PasswordResetRow {
            token_hash: ticket.token_hash.as_str().to_owned(),
            user_id: *ticket.user_id.as_uuid(),
            created_at: ticket.created_at,
            expires_at: ticket.expires_at,
            used_at: ticket.used_at,
        };
        diesel::insert_into(password_reset_tokens::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find(
        &self,
        token_hash: &TokenHash,
    ) -> Result<Option<PasswordResetTicket>, PasswordResetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PasswordResetRepositoryError::connection))?;

        let row: Option<PasswordResetRow> = password_reset_tokens::table
            .filter(password_reset_tokens::token_hash.eq(token_hash.as_str()))
            .select(PasswordResetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_ticket))
    }

    async fn mark_used(
        &self,
        token_hash: &TokenHash,
        used_at: DateTime<Utc>,
    ) -> Result<(), PasswordResetRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, PasswordResetRepositoryError::connection))?;

        diesel::update(
            password_reset_tokens::table
                .filter(password_reset_tokens::token_hash.eq(token_hash.as_str())),
        )
        .set(password_reset_tokens::used_at.eq(Some(used_at)))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_error)
    }
}
