//! Password reset tokens.
//!
//! The raw token leaves the service only in the reset email (and in the
//! response outside production). Storage keeps its SHA-256 fingerprint.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::user::UserId;

/// Lifetime of a reset token.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

const TOKEN_BYTES: usize = 32;

/// Raw reset token handed to the user.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    /// Generate a random hex token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        bytes.zeroize();
        Self(token)
    }

    /// Wrap a token received from a client.
    #[must_use]
    pub fn from_client(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_owned())
    }

    /// Expose the raw token for emailing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Storage fingerprint of the token.
    ///
    /// # Examples
    /// ```
    /// use reelmark::domain::ResetToken;
    ///
    /// let token = ResetToken::from_client("abc");
    /// assert_eq!(token.hash(), ResetToken::from_client(" abc ").hash());
    /// ```
    #[must_use]
    pub fn hash(&self) -> TokenHash {
        TokenHash(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl Drop for ResetToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetToken(**redacted**)")
    }
}

/// Hex-encoded SHA-256 fingerprint of a reset token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// Wrap a stored fingerprint.
    #[must_use]
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetTicket {
    pub token_hash: TokenHash,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl PasswordResetTicket {
    /// Issue a ticket for `token`, valid for [`RESET_TOKEN_TTL_MINUTES`].
    #[must_use]
    pub fn issue(token: &ResetToken, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            token_hash: token.hash(),
            user_id,
            created_at: now,
            expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
            used_at: None,
        }
    }

    /// Whether the ticket can still be redeemed at `now`.
    #[must_use]
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && now < self.expires_at
    }
}
