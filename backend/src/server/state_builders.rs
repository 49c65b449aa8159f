//! Builds the HTTP state from settings and the connection pool.
//!
//! Every driven port gets exactly one concrete adapter here; the services
//! receive them as `Arc`s and the handlers only see the driving ports.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use reelmark::config::AppSettings;
use reelmark::domain::{
    AccountService, AccountSettings, FavoritesService, PlatformIdentityResolver, RatingService,
    VideoCatalogService,
};
use reelmark::inbound::http::state::HttpState;
use reelmark::outbound::auth_platform::AuthPlatformClient;
use reelmark::outbound::email::mailer_from_settings;
use reelmark::outbound::persistence::{
    DbPool, DieselContentRepository, DieselFavoriteRepository, DieselPasswordResetRepository,
    DieselRatingRepository, DieselUserProfileRepository,
};
use reelmark::outbound::video::PexelsVideoSource;

/// Failure while constructing the outbound HTTP clients.
#[derive(Debug, thiserror::Error)]
#[error("failed to build {client} client: {source}")]
pub struct StateBuildError {
    client: &'static str,
    #[source]
    source: reqwest::Error,
}

fn client_error(client: &'static str) -> impl FnOnce(reqwest::Error) -> StateBuildError {
    move |source| StateBuildError { client, source }
}

/// Wire adapters and services into an [`HttpState`].
pub fn build_http_state(settings: &AppSettings, pool: &DbPool) -> Result<HttpState, StateBuildError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let timeout = settings.http_timeout;

    let identity = Arc::new(
        AuthPlatformClient::new(&settings.auth, timeout).map_err(client_error("auth platform"))?,
    );
    let mailer = mailer_from_settings(&settings.email, timeout).map_err(client_error("email"))?;
    let video_source = settings
        .video
        .api_key
        .as_deref()
        .map(|key| PexelsVideoSource::new(&settings.video.base_url, key, timeout).map(Arc::new))
        .transpose()
        .map_err(client_error("video"))?;

    let contents = Arc::new(DieselContentRepository::new(pool.clone()));
    let accounts = Arc::new(AccountService::new(
        identity.clone(),
        Arc::new(DieselUserProfileRepository::new(pool.clone())),
        Arc::new(DieselPasswordResetRepository::new(pool.clone())),
        mailer,
        clock.clone(),
        AccountSettings {
            frontend_url: settings.frontend_url.clone(),
            expose_reset_token: !settings.production,
        },
    ));
    let ratings = Arc::new(RatingService::new(
        contents.clone(),
        Arc::new(DieselRatingRepository::new(pool.clone())),
        clock.clone(),
    ));
    let favorites = Arc::new(FavoritesService::new(
        contents,
        Arc::new(DieselFavoriteRepository::new(pool.clone())),
        clock.clone(),
    ));
    let videos = Arc::new(VideoCatalogService::new(video_source, clock));

    info!(production = settings.production, "http state assembled");
    Ok(HttpState {
        identity: Arc::new(PlatformIdentityResolver::new(identity)),
        accounts: accounts.clone(),
        accounts_query: accounts,
        ratings: ratings.clone(),
        ratings_query: ratings,
        favorites: favorites.clone(),
        favorites_query: favorites,
        videos,
    })
}
