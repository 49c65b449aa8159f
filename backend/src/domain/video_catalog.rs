//! Catalogue search over the stock video provider.
//!
//! The popular feed queries every genre concurrently. A genre whose query
//! fails contributes no cards; the rest of the feed is still returned.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use futures_util::future::join_all;
use mockable::Clock;
use tracing::{error, warn};

use crate::domain::ports::{VideoCatalogQuery, VideoSearchSource};
use crate::domain::video::{POPULAR_GENRES, POPULAR_PAGE_SIZE, SEARCH_PAGE_SIZE};
use crate::domain::{Error, SearchMode, VideoCard};

/// Catalogue service implementing [`VideoCatalogQuery`].
///
/// The source is optional; without a provider key every search fails with a
/// configuration error before any network call.
pub struct VideoCatalogService<S> {
    source: Option<Arc<S>>,
    clock: Arc<dyn Clock>,
}

impl<S> VideoCatalogService<S> {
    /// Create a catalogue over `source`.
    pub fn new(source: Option<Arc<S>>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }
}

impl<S> VideoCatalogService<S>
where
    S: VideoSearchSource,
{
    async fn genre_cards(source: &S, genre: &'static str, year: i32) -> Vec<VideoCard> {
        match source.search(genre, POPULAR_PAGE_SIZE).await {
            Ok(hits) => hits
                .into_iter()
                .map(|hit| VideoCard::from_hit(hit, genre, year))
                .collect(),
            Err(err) => {
                warn!(genre, error = %err, "genre query failed; skipping");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<S> VideoCatalogQuery for VideoCatalogService<S>
where
    S: VideoSearchSource,
{
    async fn search(&self, mode: &SearchMode) -> Result<Vec<VideoCard>, Error> {
        let Some(source) = self.source.as_deref() else {
            error!("video search requested without a provider key");
            return Err(Error::internal("video search is not configured"));
        };
        let year = self.clock.utc().year();

        match mode {
            SearchMode::Popular => {
                let feeds = join_all(
                    POPULAR_GENRES
                        .into_iter()
                        .map(|genre| Self::genre_cards(source, genre, year)),
                )
                .await;
                Ok(feeds.into_iter().flatten().collect())
            }
            SearchMode::Term(term) => {
                let hits = source.search(term, SEARCH_PAGE_SIZE).await.map_err(|err| {
                    error!(term = %term, error = %err, "video search failed");
                    Error::internal("failed to search videos")
                })?;
                Ok(hits
                    .into_iter()
                    .map(|hit| VideoCard::from_hit(hit, term, year))
                    .collect())
            }
        }
    }
}
