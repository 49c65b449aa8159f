//! Favourite HTTP handlers.
//!
//! ```text
//! GET    /favorites/{userId}
//! GET    /favorites/{userId}/{contentId}
//! POST   /favorites {"userId":"…","contentId":"…"}
//! DELETE /favorites/{userId}/{contentId}
//! ```
//!
//! The user id in the path or body must be the caller's own.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ContentId, Error, Favorite, FavoriteEntry, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::MessageResponse;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::content::ContentSummaryResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_content_validation, map_user_validation, missing_field_error,
};

const USER_ID: FieldName = FieldName::new("userId");
const CONTENT_ID: FieldName = FieldName::new("contentId");

/// Add-favourite payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddFavoriteRequest {
    #[serde(alias = "id_usuario")]
    pub user_id: Option<String>,
    #[serde(alias = "id_contenido")]
    pub content_id: Option<String>,
}

/// Path parameters identifying one favourite.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePath {
    pub user_id: String,
    pub content_id: String,
}

/// Stored favourite.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub user_id: String,
    pub content_id: String,
    pub added_at: String,
}

impl From<Favorite> for FavoriteResponse {
    fn from(value: Favorite) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            content_id: value.content_id.to_string(),
            added_at: value.added_at.to_rfc3339(),
        }
    }
}

/// Favourite with the favourited content.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteEntryResponse {
    #[serde(flatten)]
    pub favorite: FavoriteResponse,
    pub content: ContentSummaryResponse,
}

impl From<FavoriteEntry> for FavoriteEntryResponse {
    fn from(value: FavoriteEntry) -> Self {
        Self {
            favorite: value.favorite.into(),
            content: value.content.into(),
        }
    }
}

/// Membership check result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsFavoriteResponse {
    pub is_favorite: bool,
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw.trim()).map_err(|err| map_user_validation(err, USER_ID))
}

fn parse_content_id(raw: &str) -> Result<ContentId, Error> {
    ContentId::new(raw).map_err(|err| map_content_validation(err, CONTENT_ID))
}

fn owned_pair(
    user: &AuthenticatedUser,
    raw_user: &str,
    raw_content: &str,
) -> Result<(UserId, ContentId), Error> {
    let user_id = parse_user_id(raw_user)?;
    user.ensure_is(&user_id)?;
    Ok((user_id, parse_content_id(raw_content)?))
}

/// List a user's favourites, most recently added first.
#[utoipa::path(
    get,
    path = "/favorites/{userId}",
    params(("userId" = String, Path, description = "Auth platform user id")),
    responses(
        (status = 200, description = "Favourites", body = [FavoriteEntryResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites",
    security(("bearerAuth" = []))
)]
#[get("/favorites/{userId}")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<FavoriteEntryResponse>>> {
    let user_id = parse_user_id(&path.into_inner())?;
    user.ensure_is(&user_id)?;
    let entries = state.favorites_query.list_for_user(&user_id).await?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}

/// Check whether a content item is favourited.
#[utoipa::path(
    get,
    path = "/favorites/{userId}/{contentId}",
    params(
        ("userId" = String, Path, description = "Auth platform user id"),
        ("contentId" = String, Path, description = "Internal content id")
    ),
    responses(
        (status = 200, description = "Membership", body = IsFavoriteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "checkFavorite",
    security(("bearerAuth" = []))
)]
#[get("/favorites/{userId}/{contentId}")]
pub async fn check_favorite(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<FavoritePath>,
) -> ApiResult<web::Json<IsFavoriteResponse>> {
    let (user_id, content_id) = owned_pair(&user, &path.user_id, &path.content_id)?;
    let is_favorite = state
        .favorites_query
        .is_favorite(&user_id, &content_id)
        .await?;
    Ok(web::Json(IsFavoriteResponse { is_favorite }))
}

/// Add a content item to the caller's favourites.
#[utoipa::path(
    post,
    path = "/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 201, description = "Favourite added", body = FavoriteResponse),
        (status = 400, description = "Invalid request or already favourited", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Content not found", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite",
    security(("bearerAuth" = []))
)]
#[post("/favorites")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AddFavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let AddFavoriteRequest {
        user_id,
        content_id,
    } = payload.into_inner();
    let raw_user = user_id.ok_or_else(|| missing_field_error(USER_ID))?;
    let raw_content = content_id.ok_or_else(|| missing_field_error(CONTENT_ID))?;
    let (user_id, content_id) = owned_pair(&user, &raw_user, &raw_content)?;
    let favorite = state.favorites.add(&user_id, &content_id).await?;
    Ok(HttpResponse::Created().json(FavoriteResponse::from(favorite)))
}

/// Remove a content item from the caller's favourites.
#[utoipa::path(
    delete,
    path = "/favorites/{userId}/{contentId}",
    params(
        ("userId" = String, Path, description = "Auth platform user id"),
        ("contentId" = String, Path, description = "Internal content id")
    ),
    responses(
        (status = 200, description = "Favourite removed", body = MessageResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite",
    security(("bearerAuth" = []))
)]
#[delete("/favorites/{userId}/{contentId}")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<FavoritePath>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (user_id, content_id) = owned_pair(&user, &path.user_id, &path.content_id)?;
    state.favorites.remove(&user_id, &content_id).await?;
    Ok(web::Json(MessageResponse::new("Removed from favorites")))
}
