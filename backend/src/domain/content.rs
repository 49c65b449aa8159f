//! Content records referenced by ratings and favourites.
//!
//! A content row is minted lazily the first time a rating names an external
//! identifier that has not been seen before.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type stored for rows minted from the video provider.
pub const VIDEO_CONTENT_TYPE: &str = "video";

/// Maximum accepted length for an external identifier.
pub const EXTERNAL_ID_MAX: usize = 128;

/// Validation errors for content identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("content id must not be empty")]
    EmptyExternalId,
    #[error("content id must be at most {max} characters")]
    ExternalIdTooLong { max: usize },
    #[error("content id must be a valid UUID")]
    InvalidId,
}

/// Internal content identifier generated by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Parse an identifier from text.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| ContentValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Mint a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned by the video provider, used as a natural key.
///
/// # Examples
/// ```
/// use reelmark::domain::ExternalContentId;
///
/// let id = ExternalContentId::new(" 857251 ").expect("valid id");
/// assert_eq!(id.as_str(), "857251");
/// assert_eq!(id.placeholder_title(), "Video 857251");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalContentId(String);

impl ExternalContentId {
    /// Validate and trim an external identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContentValidationError::EmptyExternalId);
        }
        if trimmed.chars().count() > EXTERNAL_ID_MAX {
            return Err(ContentValidationError::ExternalIdTooLong {
                max: EXTERNAL_ID_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title given to a content row minted for this identifier.
    #[must_use]
    pub fn placeholder_title(&self) -> String {
        format!("Video {}", self.0)
    }
}

impl fmt::Display for ExternalContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable content record.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: ContentId,
    pub external_id: ExternalContentId,
    pub title: String,
    pub content_type: String,
    pub duration_seconds: i32,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

impl Content {
    /// Placeholder row for an external identifier seen for the first time.
    #[must_use]
    pub fn placeholder(external_id: ExternalContentId, now: DateTime<Utc>) -> Self {
        Self {
            id: ContentId::random(),
            title: external_id.placeholder_title(),
            external_id,
            content_type: VIDEO_CONTENT_TYPE.to_owned(),
            duration_seconds: 0,
            rating: 0.0,
            created_at: now,
        }
    }

    /// Display fields joined into rating and favourite listings.
    #[must_use]
    pub fn summary(&self) -> ContentSummary {
        ContentSummary {
            id: self.id,
            external_id: self.external_id.as_str().to_owned(),
            title: self.title.clone(),
            content_type: self.content_type.clone(),
            duration_seconds: self.duration_seconds,
            rating: self.rating,
        }
    }
}

/// Denormalised content fields shown next to ratings and favourites.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSummary {
    pub id: ContentId,
    pub external_id: String,
    pub title: String,
    pub content_type: String,
    pub duration_seconds: i32,
    pub rating: f64,
}
