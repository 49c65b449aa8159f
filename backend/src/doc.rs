//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response bodies they exchange, and the bearer token security
//! scheme. The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for the frontend's client generator.

use crate::inbound::http::accounts::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, ResetPasswordRequest, UpdateUserRequest, UserEnvelope, UserResponse,
};
use crate::inbound::http::content::ContentSummaryResponse;
use crate::inbound::http::favorites::{
    AddFavoriteRequest, FavoriteEntryResponse, FavoriteResponse, IsFavoriteResponse,
};
use crate::inbound::http::ratings::{
    RatingBody, RatingEntryResponse, RatingRequest, RatingResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::videos::VideoCardResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Reelmark API",
        description = "Accounts, ratings, favourites and video search for the Reelmark frontend.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::me,
        crate::inbound::http::accounts::update_user,
        crate::inbound::http::accounts::delete_user,
        crate::inbound::http::accounts::forgot_password,
        crate::inbound::http::accounts::reset_password,
        crate::inbound::http::ratings::upsert_rating,
        crate::inbound::http::ratings::my_ratings,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::check_favorite,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::videos::search_videos,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        UpdateUserRequest,
        ForgotPasswordRequest,
        ResetPasswordRequest,
        UserResponse,
        UserEnvelope,
        LoginResponse,
        MessageResponse,
        ForgotPasswordResponse,
        ContentSummaryResponse,
        RatingRequest,
        RatingBody,
        RatingResponse,
        RatingEntryResponse,
        AddFavoriteRequest,
        FavoriteResponse,
        FavoriteEntryResponse,
        IsFavoriteResponse,
        VideoCardResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and password reset"),
        (name = "users", description = "Profile of the signed-in user"),
        (name = "ratings", description = "Per-user content ratings"),
        (name = "favorites", description = "Per-user favourite content"),
        (name = "videos", description = "Stock video catalogue search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
