//! Bearer token authentication for protected handlers.
//!
//! [`AuthenticatedUser`] is an extractor: adding it to a handler signature
//! makes the route protected. Missing or malformed `Authorization` headers
//! are rejected before the auth platform is contacted.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::domain::{AccessToken, Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "bearer ";

/// Caller identity resolved from the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// The caller's auth platform id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.0
    }

    /// Reject access to another user's resources.
    pub fn ensure_is(&self, user_id: &UserId) -> Result<(), Error> {
        if &self.0 == user_id {
            Ok(())
        } else {
            Err(Error::forbidden("cannot access another user's resources"))
        }
    }
}

/// Extract the bearer token from request headers.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<AccessToken, Error> {
    let raw = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let has_prefix = raw
        .get(..BEARER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX));
    if !has_prefix {
        return Err(Error::unauthorized("authorization must use the Bearer scheme"));
    }
    AccessToken::new(raw[BEARER_PREFIX.len()..].trim())
        .map_err(|_| Error::unauthorized("missing bearer token"))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let Some(state) = state else {
                error!("HttpState missing from app data");
                return Err(Error::internal("authentication is not configured").into());
            };
            let user_id = state.identity.resolve(&token).await?;
            Ok(Self(user_id))
        })
    }
}
