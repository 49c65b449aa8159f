//! Port for content rows keyed by internal and external identifiers.

use async_trait::async_trait;

use crate::domain::{Content, ContentId, ExternalContentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content repository adapters.
    pub enum ContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "content repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "content repository query failed: {message}",
    }
}

/// Content storage.
///
/// External identifiers carry no storage-level uniqueness; when duplicates
/// exist, lookups return the oldest row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch content by internal id.
    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, ContentRepositoryError>;

    /// Fetch content by the provider's identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalContentId,
    ) -> Result<Option<Content>, ContentRepositoryError>;

    /// Insert a content row.
    async fn insert(&self, content: &Content) -> Result<(), ContentRepositoryError>;
}
