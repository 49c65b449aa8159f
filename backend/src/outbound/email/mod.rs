//! Mailer adapters implementing [`crate::domain::ports::Mailer`].
//!
//! [`HttpMailer`] posts to a transactional email API. [`LogOnlyMailer`] is
//! used when no provider key is configured and only records what would have
//! been sent.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::info;

use crate::config::EmailSettings;
use crate::domain::EmailMessage;
use crate::domain::ports::{Mailer, MailerError};
use crate::outbound::http_body::upstream_message;

#[derive(Debug, Serialize)]
struct SendEmailDto<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Provider-backed mailer.
pub struct HttpMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// Build a mailer with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let payload = SendEmailDto {
            from: &self.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }
}

/// Mailer that only logs; selected when no provider key is set.
#[derive(Debug, Default)]
pub struct LogOnlyMailer;

#[async_trait]
impl Mailer for LogOnlyMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "email provider not configured; message not sent"
        );
        Ok(())
    }
}

/// Pick the provider mailer when a key is present, else [`LogOnlyMailer`].
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub fn mailer_from_settings(
    settings: &EmailSettings,
    timeout: Duration,
) -> Result<Arc<dyn Mailer>, reqwest::Error> {
    match settings.api_key.as_deref() {
        Some(key) => Ok(Arc::new(HttpMailer::new(
            settings.api_url.clone(),
            key,
            settings.from.as_str(),
            timeout,
        )?)),
        None => Ok(Arc::new(LogOnlyMailer)),
    }
}

fn map_transport_error(error: reqwest::Error) -> MailerError {
    if error.is_timeout() {
        MailerError::transport("email request timed out")
    } else {
        MailerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailerError {
    MailerError::rejected(status.as_u16(), upstream_message(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(api_key: Option<&str>) -> EmailSettings {
        EmailSettings {
            api_key: api_key.map(str::to_owned),
            api_url: Url::parse("https://mail.example.com/emails").expect("url"),
            from: "Reelmark <noreply@example.com>".into(),
        }
    }

    #[rstest]
    fn payload_wraps_recipient_in_a_list() {
        let payload = SendEmailDto {
            from: "a@example.com",
            to: ["b@example.com"],
            subject: "Hi",
            html: "<p>Hi</p>",
        };
        let json = serde_json::to_value(payload).expect("json");
        assert_eq!(json["to"], serde_json::json!(["b@example.com"]));
    }

    #[rstest]
    #[case(422, br#"{"message":"invalid from"}"#.as_slice(), "invalid from")]
    #[case(500, b"oops".as_slice(), "oops")]
    fn non_success_status_is_rejected(
        #[case] status: u16,
        #[case] body: &[u8],
        #[case] message: &str,
    ) {
        let status = StatusCode::from_u16(status).expect("status");
        assert_eq!(
            map_status_error(status, body),
            MailerError::rejected(status.as_u16(), message)
        );
    }

    #[tokio::test]
    async fn log_only_mailer_always_succeeds() {
        let message = EmailMessage::password_reset("ada@example.com", "https://app/reset?token=x");
        assert!(LogOnlyMailer.send(&message).await.is_ok());
    }

    #[tokio::test]
    async fn missing_key_selects_log_only_mailer() {
        let mailer = mailer_from_settings(&settings(None), Duration::from_secs(1)).expect("mailer");
        let message = EmailMessage::password_reset("ada@example.com", "https://app/reset?token=x");
        assert!(mailer.send(&message).await.is_ok());
    }

    #[rstest]
    fn configured_key_builds_http_mailer() {
        assert!(mailer_from_settings(&settings(Some("key")), Duration::from_secs(1)).is_ok());
    }
}
