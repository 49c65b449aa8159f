//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, the auth platform, the mailer and the video
//! provider) are implemented by outbound adapters. Driving ports are the
//! use-cases HTTP handlers call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod content_repository;
mod favorite_repository;
mod favorites_command;
mod identity_provider;
mod identity_resolver;
mod mailer;
mod password_reset_repository;
mod rating_repository;
mod ratings_command;
mod user_profile_repository;
mod video_catalog_query;
mod video_search_source;

#[cfg(test)]
pub use account_command::{MockAccountCommand, MockAccountQuery};
pub use account_command::{AccountCommand, AccountQuery, LoginOutcome, PasswordResetRequested};
#[cfg(test)]
pub use content_repository::MockContentRepository;
pub use content_repository::{ContentRepository, ContentRepositoryError};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use favorites_command::{MockFavoritesCommand, MockFavoritesQuery};
pub use favorites_command::{FavoritesCommand, FavoritesQuery};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    CredentialUpdate, IdentityProvider, IdentityProviderError, PlatformSession, PlatformUser,
};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::IdentityResolver;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{Mailer, MailerError};
#[cfg(test)]
pub use password_reset_repository::MockPasswordResetRepository;
pub use password_reset_repository::{PasswordResetRepository, PasswordResetRepositoryError};
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
pub use rating_repository::{RatingRepository, RatingRepositoryError};
#[cfg(test)]
pub use ratings_command::{MockRatingsCommand, MockRatingsQuery};
pub use ratings_command::{RatingsCommand, RatingsQuery};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{UserProfileRepository, UserProfileRepositoryError};
#[cfg(test)]
pub use video_catalog_query::MockVideoCatalogQuery;
pub use video_catalog_query::VideoCatalogQuery;
#[cfg(test)]
pub use video_search_source::MockVideoSearchSource;
pub use video_search_source::{VideoSearchSource, VideoSearchSourceError};
