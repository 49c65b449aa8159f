//! Driving ports for rating use-cases.

use async_trait::async_trait;

use crate::domain::{Error, RatingEntry, RatingSubmission, RatingUpsert, UserId};

/// Rating mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsCommand: Send + Sync {
    /// Create or partially update the caller's rating for a content item.
    async fn upsert(&self, user_id: &UserId, submission: RatingSubmission) -> Result<RatingUpsert, Error>;
}

/// Rating reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsQuery: Send + Sync {
    /// The caller's ratings joined with content details.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RatingEntry>, Error>;
}
