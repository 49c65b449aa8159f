//! Domain types, services and ports.
//!
//! Purpose: hold the transport-agnostic core of the service. Types validate
//! their invariants on construction; services implement the driving ports
//! over the driven ports in [`ports`].
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: failure payload shared by every use-case.
//! - Value types for users, content, ratings, favourites and videos.
//! - Services: [`AccountService`], [`RatingService`], [`FavoritesService`],
//!   [`VideoCatalogService`] and [`PlatformIdentityResolver`].

pub mod account_service;
pub mod auth;
pub mod content;
pub mod content_registrar;
pub mod email;
pub mod error;
pub mod favorite;
pub mod favorites_service;
pub mod identity_resolution;
pub mod password_reset;
pub mod ports;
pub mod rating;
pub mod rating_service;
pub mod trace_id;
pub mod user;
pub mod video;
pub mod video_catalog;

#[cfg(test)]
pub(crate) mod test_clock;

pub use self::account_service::{
    AccountService, AccountSettings, INVALID_LOGIN_MESSAGE, INVALID_RESET_TOKEN_MESSAGE,
};
pub use self::auth::{
    AccessToken, AuthValidationError, LoginCredentials, PASSWORD_MIN_LEN, Password,
    ProfileChanges, Registration,
};
pub use self::content::{
    Content, ContentId, ContentSummary, ContentValidationError, ExternalContentId,
};
pub use self::content_registrar::ContentRegistrar;
pub use self::email::EmailMessage;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::favorite::{Favorite, FavoriteEntry};
pub use self::favorites_service::FavoritesService;
pub use self::identity_resolution::PlatformIdentityResolver;
pub use self::password_reset::{PasswordResetTicket, ResetToken, TokenHash};
pub use self::rating::{
    Rating, RatingEntry, RatingSubmission, RatingUpsert, RatingValidationError, Score,
};
pub use self::rating_service::RatingService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, PersonName, UserId, UserProfile, UserValidationError};
pub use self::video::{SearchMode, VideoCard, VideoHit};
pub use self::video_catalog::VideoCatalogService;
