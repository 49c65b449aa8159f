//! Find-or-create of content rows by external identifier.
//!
//! The lookup and the insert are separate statements. Two first-time requests
//! for the same external id can both miss and both insert; the duplicate row
//! is tolerated and later lookups return the oldest one.

use std::sync::Arc;

use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{ContentRepository, ContentRepositoryError};
use crate::domain::{Content, ContentId, Error, ExternalContentId};

/// Resolves external identifiers to internal content ids, minting rows on demand.
pub struct ContentRegistrar<C> {
    contents: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> ContentRegistrar<C> {
    /// Create a registrar over the given repository.
    pub fn new(contents: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { contents, clock }
    }
}

impl<C> ContentRegistrar<C>
where
    C: ContentRepository,
{
    /// Return the internal id for `external_id`, inserting a placeholder row
    /// when none exists.
    pub async fn register(&self, external_id: &ExternalContentId) -> Result<ContentId, Error> {
        if let Some(existing) = self
            .contents
            .find_by_external_id(external_id)
            .await
            .map_err(map_content_error)?
        {
            return Ok(existing.id);
        }

        let content = Content::placeholder(external_id.clone(), self.clock.utc());
        self.contents
            .insert(&content)
            .await
            .map_err(map_content_error)?;
        info!(
            content_id = %content.id,
            external_id = %external_id,
            "registered content for unseen external id"
        );
        Ok(content.id)
    }
}

pub(crate) fn map_content_error(err: ContentRepositoryError) -> Error {
    error!(error = %err, "content repository failure");
    Error::internal("failed to process content")
}
