//! Rating HTTP handlers.
//!
//! ```text
//! POST /ratings {"contentId":"v1","score":4}
//! GET  /ratings/my-ratings
//! ```
//!
//! Legacy clients send `id_contenido`, `puntuacion` and `comentario`; those
//! names are accepted as aliases.

use actix_web::{get, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, ExternalContentId, Rating, RatingEntry, RatingSubmission, RatingUpsert, Score,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::content::ContentSummaryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_content_validation, map_rating_validation, missing_field_error,
};

const CONTENT_ID: FieldName = FieldName::new("contentId");

/// External content identifier sent either as text or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ContentRef {
    Text(String),
    Number(i64),
}

impl ContentRef {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Distinguish an omitted field (`None`) from an explicit `null`
/// (`Some(None)`). Pair with `#[serde(default)]`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Rating submission payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RatingRequest {
    /// External content identifier.
    #[serde(alias = "id_contenido")]
    #[schema(value_type = String, example = "2499611")]
    pub content_id: Option<ContentRef>,
    /// Star score from 1 to 5.
    #[serde(alias = "puntuacion")]
    pub score: Option<i64>,
    /// Free-text comment; `null` or blank clears a stored comment.
    #[serde(default, alias = "comentario", deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub comment: Option<Option<String>>,
}

/// Stored rating as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingBody {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub score: Option<u8>,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Rating> for RatingBody {
    fn from(value: Rating) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            content_id: value.content_id.to_string(),
            score: value.score.map(Score::get),
            comment: value.comment,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Result of `POST /ratings`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub message: String,
    pub rating: RatingBody,
    pub created: bool,
}

impl From<RatingUpsert> for RatingResponse {
    fn from(value: RatingUpsert) -> Self {
        Self {
            message: value.message().to_owned(),
            created: value.created,
            rating: value.rating.into(),
        }
    }
}

/// Rating with the rated content.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingEntryResponse {
    #[serde(flatten)]
    pub rating: RatingBody,
    pub content: ContentSummaryResponse,
}

impl From<RatingEntry> for RatingEntryResponse {
    fn from(value: RatingEntry) -> Self {
        Self {
            rating: value.rating.into(),
            content: value.content.into(),
        }
    }
}

fn parse_submission(payload: RatingRequest) -> Result<RatingSubmission, Error> {
    let raw = payload
        .content_id
        .ok_or_else(|| missing_field_error(CONTENT_ID))?
        .into_text();
    let content =
        ExternalContentId::new(raw).map_err(|err| map_content_validation(err, CONTENT_ID))?;
    let score = payload
        .score
        .map(Score::new)
        .transpose()
        .map_err(map_rating_validation)?;
    RatingSubmission::new(content, score, payload.comment).map_err(map_rating_validation)
}

/// Create or update the caller's rating for a content item.
#[utoipa::path(
    post,
    path = "/ratings",
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating stored", body = RatingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "upsertRating",
    security(("bearerAuth" = []))
)]
#[post("/ratings")]
pub async fn upsert_rating(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<RatingRequest>,
) -> ApiResult<web::Json<RatingResponse>> {
    let submission = parse_submission(payload.into_inner())?;
    let outcome = state.ratings.upsert(user.id(), submission).await?;
    Ok(web::Json(outcome.into()))
}

/// List the caller's ratings, newest update first.
#[utoipa::path(
    get,
    path = "/ratings/my-ratings",
    responses(
        (status = 200, description = "Caller ratings", body = [RatingEntryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "listMyRatings",
    security(("bearerAuth" = []))
)]
#[get("/ratings/my-ratings")]
pub async fn my_ratings(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<RatingEntryResponse>>> {
    let entries = state.ratings_query.list_for_user(user.id()).await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}
