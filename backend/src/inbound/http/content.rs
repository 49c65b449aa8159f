//! Content summary embedded in rating and favourite listings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ContentSummary;

/// Content details attached to listing entries.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummaryResponse {
    pub id: String,
    pub external_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub duration_seconds: i32,
    pub rating: f64,
}

impl From<ContentSummary> for ContentSummaryResponse {
    fn from(value: ContentSummary) -> Self {
        Self {
            id: value.id.to_string(),
            external_id: value.external_id,
            title: value.title,
            content_type: value.content_type,
            duration_seconds: value.duration_seconds,
            rating: value.rating,
        }
    }
}
