//! Video catalogue search.
//!
//! `GET /videos/search` without a query (or with `popular`) returns the
//! popular feed; any other term runs a single search.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{SearchMode, VideoCard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /videos/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search term; blank or `popular` selects the popular feed.
    pub query: Option<String>,
}

/// Catalogue card.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoCardResponse {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub year: i32,
    pub poster: Option<String>,
    pub video_url: Option<String>,
}

impl From<VideoCard> for VideoCardResponse {
    fn from(value: VideoCard) -> Self {
        Self {
            id: value.id,
            title: value.title,
            genre: value.genre,
            year: value.year,
            poster: value.poster,
            video_url: value.video_url,
        }
    }
}

/// Search the video catalogue.
#[utoipa::path(
    get,
    path = "/videos/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Video cards", body = [VideoCardResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["videos"],
    operation_id = "searchVideos",
    security([])
)]
#[get("/videos/search")]
pub async fn search_videos(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<VideoCardResponse>>> {
    let mode = SearchMode::from_query(params.query.as_deref());
    let cards = state.videos.search(&mode).await?;
    Ok(web::Json(cards.into_iter().map(Into::into).collect()))
}
