//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Profile rows keyed by the auth platform's user id.
    user_profiles (id) {
        id -> Uuid,
        name -> Varchar,
        lastname -> Varchar,
        /// Rewritten to a sentinel address on soft delete.
        email -> Varchar,
        birth_date -> Nullable<Date>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalogue entries minted on first reference to an external id.
    contents (id) {
        id -> Uuid,
        external_id -> Varchar,
        title -> Text,
        content_type -> Varchar,
        duration_seconds -> Int4,
        rating -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One rating per (user_id, content_id).
    ratings (id) {
        id -> Uuid,
        user_id -> Uuid,
        content_id -> Uuid,
        score -> Nullable<Int2>,
        comment -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favourite membership rows; duplicates are not prevented here.
    favorites (id) {
        id -> Uuid,
        user_id -> Uuid,
        content_id -> Uuid,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Password reset tickets keyed by SHA-256 token fingerprint.
    password_reset_tokens (token_hash) {
        token_hash -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
        used_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(ratings -> contents (content_id));
diesel::joinable!(favorites -> contents (content_id));

diesel::allow_tables_to_appear_in_same_query!(
    contents,
    favorites,
    password_reset_tokens,
    ratings,
    user_profiles,
);
