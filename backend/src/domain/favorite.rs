//! Favourite membership between a user and a content item.

use chrono::{DateTime, Utc};

use super::content::{ContentId, ContentSummary};
use super::user::UserId;

/// A (user, content) membership tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub added_at: DateTime<Utc>,
}

/// Favourite joined with the content summary for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub favorite: Favorite,
    pub content: ContentSummary,
}
