//! Auth platform adapter implementing [`crate::domain::ports::IdentityProvider`].

mod dto;
mod http_client;

pub use http_client::AuthPlatformClient;
