//! Driving port for catalogue search.

use async_trait::async_trait;

use crate::domain::{Error, SearchMode, VideoCard};

/// Catalogue search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalogQuery: Send + Sync {
    /// Run a search and return content cards.
    async fn search(&self, mode: &SearchMode) -> Result<Vec<VideoCard>, Error>;
}
