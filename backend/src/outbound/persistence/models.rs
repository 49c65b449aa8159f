//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{contents, favorites, password_reset_tokens, ratings, user_profiles};

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub id: Uuid,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable profile columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    // `None` leaves the column untouched; profiles never clear a birth date.
    pub birth_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentRow {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub content_type: String,
    pub duration_seconds: i32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RatingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub score: Option<i16>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns rewritten by an upsert. `comment` is always written so a
/// cleared comment reaches the database as `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = ratings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RatingUpdate<'a> {
    pub score: Option<i16>,
    pub comment: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Favourites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    #[expect(dead_code, reason = "surrogate key is never exposed to the domain")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content_id: Uuid,
    pub added_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Password reset tickets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = password_reset_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PasswordResetRow {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}
