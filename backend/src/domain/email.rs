//! Transactional email messages.

use super::user::UserProfile;

/// A rendered email ready for the mailer port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    /// Welcome message sent after registration.
    #[must_use]
    pub fn welcome(profile: &UserProfile) -> Self {
        Self {
            to: profile.email.clone(),
            subject: "Welcome to Reelmark".to_owned(),
            html: format!(
                "<h1>Welcome, {name}!</h1><p>Your account is ready. Start rating and saving your favourite videos.</p>",
                name = escape_html(&profile.name)
            ),
        }
    }

    /// Password reset link valid for one hour.
    #[must_use]
    pub fn password_reset(to: &str, reset_link: &str) -> Self {
        Self {
            to: to.to_owned(),
            subject: "Reset your Reelmark password".to_owned(),
            html: format!(
                "<p>We received a request to reset your password.</p>\
                 <p><a href=\"{link}\">Choose a new password</a></p>\
                 <p>The link expires in one hour. If you did not ask for this, ignore this email.</p>",
                link = escape_html(reset_link)
            ),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
