//! Port for the transactional email provider.

use async_trait::async_trait;

use crate::domain::EmailMessage;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mailer adapters.
    pub enum MailerError {
        /// Network failure talking to the provider.
        Transport { message: String } => "email provider unreachable: {message}",
        /// Provider answered with a non-success status.
        Rejected { status: u16, message: String } => "email provider returned {status}: {message}",
    }
}

/// Sends rendered emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}
