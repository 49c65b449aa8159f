//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

use crate::domain::Error;

pub mod accounts;
pub mod auth;
pub mod content;
pub mod error;
pub mod favorites;
pub mod health;
pub mod ratings;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod videos;

pub use error::ApiResult;

/// JSON extractor settings shared by every handler.
///
/// Malformed bodies and unknown fields become `invalid_request` errors so
/// they carry the usual JSON envelope and trace id.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request body: {err}")).into()
    })
}

/// Query-string extractor settings shared by every handler.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

/// Register every REST endpoint on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::me)
        .service(accounts::update_user)
        .service(accounts::delete_user)
        .service(accounts::forgot_password)
        .service(accounts::reset_password)
        .service(favorites::list_favorites)
        .service(favorites::check_favorite)
        .service(favorites::add_favorite)
        .service(favorites::remove_favorite)
        .service(ratings::upsert_rating)
        .service(ratings::my_ratings)
        .service(videos::search_videos)
        .service(health::ready)
        .service(health::live);
}
