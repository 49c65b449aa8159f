//! Rating upsert and listing.
//!
//! Submissions arrive already validated. The service resolves the external
//! content id through [`ContentRegistrar`], then creates or partially updates
//! the single rating row for (user, content).

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::content_registrar::ContentRegistrar;
use crate::domain::ports::{
    ContentRepository, RatingRepository, RatingRepositoryError, RatingsCommand, RatingsQuery,
};
use crate::domain::{Error, Rating, RatingEntry, RatingSubmission, RatingUpsert, UserId};

/// Rating service implementing the rating driving ports.
pub struct RatingService<C, R> {
    registrar: ContentRegistrar<C>,
    ratings: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<C, R> RatingService<C, R> {
    /// Create a service over the content and rating repositories.
    pub fn new(contents: Arc<C>, ratings: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registrar: ContentRegistrar::new(contents, Arc::clone(&clock)),
            ratings,
            clock,
        }
    }
}

fn map_rating_error(err: RatingRepositoryError) -> Error {
    error!(error = %err, "rating repository failure");
    Error::internal("failed to process rating")
}

#[async_trait]
impl<C, R> RatingsCommand for RatingService<C, R>
where
    C: ContentRepository,
    R: RatingRepository,
{
    async fn upsert(&self, user_id: &UserId, submission: RatingSubmission) -> Result<RatingUpsert, Error> {
        let content_id = self.registrar.register(submission.content()).await?;
        let now = self.clock.utc();

        let existing = self
            .ratings
            .find(user_id, &content_id)
            .await
            .map_err(map_rating_error)?;

        match existing {
            Some(mut rating) => {
                rating.apply(&submission, now);
                self.ratings
                    .update(&rating)
                    .await
                    .map_err(map_rating_error)?;
                info!(rating_id = %rating.id, user_id = %user_id, "rating updated");
                Ok(RatingUpsert {
                    rating,
                    created: false,
                })
            }
            None => {
                let rating = Rating::create(*user_id, content_id, &submission, now);
                self.ratings
                    .insert(&rating)
                    .await
                    .map_err(map_rating_error)?;
                info!(rating_id = %rating.id, user_id = %user_id, "rating created");
                Ok(RatingUpsert {
                    rating,
                    created: true,
                })
            }
        }
    }
}

#[async_trait]
impl<C, R> RatingsQuery for RatingService<C, R>
where
    C: ContentRepository,
    R: RatingRepository,
{
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RatingEntry>, Error> {
        self.ratings
            .list_for_user(user_id)
            .await
            .map_err(map_rating_error)
    }
}

#[cfg(test)]
#[path = "rating_service_tests.rs"]
mod tests;
