//! User identity and profile model.
//!
//! Users are owned by the auth platform; this crate keeps a profile row keyed
//! by the platform's UUID. Deleting an account never removes the row: the
//! email is rewritten to a sentinel address instead.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length accepted for name and lastname.
pub const PERSON_NAME_MAX: usize = 100;
/// Maximum length accepted for an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors for user identifiers and profile fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },
}

/// Stable user identifier issued by the auth platform.
///
/// # Examples
/// ```
/// use reelmark::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised email address (trimmed, lowercased).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || trimmed.len() > EMAIL_MAX || trimmed.contains(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.contains('@') => {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }

    /// Sentinel address written over a deleted account's email.
    #[must_use]
    pub fn deleted_sentinel(user_id: &UserId) -> Self {
        Self(format!("deleted+{user_id}@invalid.local"))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trimmed, non-empty first name or lastname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name value; `field` names the offending input in errors.
    pub fn new(raw: impl AsRef<str>, field: &'static str) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName { field });
        }
        if trimmed.chars().count() > PERSON_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                field,
                max: PERSON_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Profile row kept alongside the auth platform account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Whether the profile was soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.email.starts_with("deleted+") && self.email.ends_with("@invalid.local")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn user_id_deserialises_from_string() {
        let id: UserId =
            serde_json::from_str("\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"").expect("user id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case("  Ada@Example.COM ", "ada@example.com")]
    #[case("x@y.io", "x@y.io")]
    fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(EmailAddress::new(raw).expect("email").as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign.com")]
    #[case("@example.com")]
    #[case("ada@localhost")]
    #[case("ada lovelace@example.com")]
    #[case("a@b@example.com")]
    fn email_rejects_invalid_input(#[case] raw: &str) {
        assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    fn person_name_trims_and_limits_length() {
        assert_eq!(PersonName::new("  Ada ", "name").expect("name").as_str(), "Ada");
        let long = "a".repeat(PERSON_NAME_MAX + 1);
        assert_eq!(
            PersonName::new(long, "lastname"),
            Err(UserValidationError::NameTooLong {
                field: "lastname",
                max: PERSON_NAME_MAX
            })
        );
        assert_eq!(
            PersonName::new("   ", "name"),
            Err(UserValidationError::EmptyName { field: "name" })
        );
    }

    #[rstest]
    fn sentinel_marks_profile_deleted() {
        let id = UserId::random();
        let now = Utc::now();
        let profile = UserProfile {
            id,
            name: "Ada".into(),
            lastname: "Lovelace".into(),
            email: EmailAddress::deleted_sentinel(&id).to_string(),
            birth_date: None,
            created_at: now,
            updated_at: now,
        };
        assert!(profile.is_deleted());
    }
}
