//! Port for password reset tickets.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PasswordResetTicket, TokenHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by reset ticket repository adapters.
    pub enum PasswordResetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reset token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reset token repository query failed: {message}",
    }
}

/// Reset ticket storage keyed by token fingerprint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Store a freshly issued ticket.
    async fn store(&self, ticket: &PasswordResetTicket) -> Result<(), PasswordResetRepositoryError>;

    /// Look up a ticket by fingerprint.
    async fn find(
        &self,
        token_hash: &TokenHash,
    ) -> Result<Option<PasswordResetTicket>, PasswordResetRepositoryError>;

    /// Mark a ticket as redeemed.
    async fn mark_used(
        &self,
        token_hash: &TokenHash,
        used_at: DateTime<Utc>,
    ) -> Result<(), PasswordResetRepositoryError>;
}
