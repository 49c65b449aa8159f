//! Port for the stock video search provider.

use async_trait::async_trait;

use crate::domain::VideoHit;

use super::define_port_error;

define_port_error! {
    /// Errors raised by video search adapters.
    pub enum VideoSearchSourceError {
        /// Network failure or timeout.
        Transport { message: String } => "video provider unreachable: {message}",
        /// Provider answered with a non-success status.
        Status { status: u16, message: String } => "video provider returned {status}: {message}",
        /// Response body could not be decoded.
        Decode { message: String } => "video provider response invalid: {message}",
    }
}

/// Keyword search against the provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearchSource: Send + Sync {
    /// Return up to `per_page` hits for `term`.
    async fn search(&self, term: &str, per_page: u8) -> Result<Vec<VideoHit>, VideoSearchSourceError>;
}
