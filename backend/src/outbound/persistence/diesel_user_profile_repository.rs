//! PostgreSQL-backed `UserProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{EmailAddress, UserId, UserProfile};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserProfileRow, UserProfileUpdate};
use super::pool::DbPool;
use super::schema::user_profiles;

/// Diesel-backed profile storage.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_diesel_error(
        error,
        |message| UserProfileRepositoryError::query(message),
        |message| UserProfileRepositoryError::connection(message),
    )
}

fn row_to_profile(row: UserProfileRow) -> UserProfile {
    UserProfile {
        id: UserId::from_uuid(row.id),
        name: row.name,
        lastname: row.lastname,
        email: row.email,
        birth_date: row.birth_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn profile_to_row(profile: &UserProfile) -> UserProfileRow {
    UserProfileRow {
        id: *profile.id.as_uuid(),
        name: profile.name.clone(),
        lastname: profile.lastname.clone(),
        email: profile.email.clone(),
        birth_date: profile.birth_date,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserProfileRepositoryError::connection))?;

        diesel::insert_into(user_profiles::table)
            .values(&profile_to_row(profile))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserProfileRepositoryError::connection))?;

        let row: Option<UserProfileRow> = user_profiles::table
            .filter(user_profiles::id.eq(id.as_uuid()))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_profile))
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserProfileRepositoryError::connection))?;

        let changes = UserProfileUpdate {
            name: &profile.name,
            lastname: &profile.lastname,
            email: &profile.email,
            birth_date: profile.birth_date,
            updated_at: profile.updated_at,
        };
        let updated = diesel::update(user_profiles::table.filter(user_profiles::id.eq(profile.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;

        if updated == 0 {
            return Err(UserProfileRepositoryError::query("profile not found for update"));
        }
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: &UserId,
        sentinel: &EmailAddress,
    ) -> Result<bool, UserProfileRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserProfileRepositoryError::connection))?;

        let updated = diesel::update(user_profiles::table.filter(user_profiles::id.eq(id.as_uuid())))
            .set((
                user_profiles::email.eq(sentinel.as_str()),
                user_profiles::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(updated > 0)
    }
}
