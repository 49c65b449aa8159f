//! Authentication primitives: credentials, registration details and tokens.
//!
//! Secrets are zeroised on drop and never printed by `Debug`.

use std::fmt;

use chrono::NaiveDate;
use zeroize::Zeroize;

use super::user::{EmailAddress, PersonName, UserValidationError};

/// Minimum password length accepted by the auth platform.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Validation errors for authentication inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("token must not be empty")]
    EmptyToken,
    #[error("at least one field must be provided")]
    EmptyChanges,
    #[error(transparent)]
    User(#[from] UserValidationError),
}

/// Plain-text password held only for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate the minimum length.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let mut raw = raw.into();
        if raw.chars().count() < PASSWORD_MIN_LEN {
            raw.zeroize();
            return Err(AuthValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self(raw))
    }

    /// Expose the secret to an outbound adapter.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Opaque bearer token issued by the auth platform.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a non-empty token.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AuthValidationError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// Expose the token to an outbound adapter or a response body.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

/// Email and password pair used to sign in.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Validate raw credentials.
    ///
    /// # Examples
    /// ```
    /// use reelmark::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts("ada@example.com", "secret1").expect("valid");
    /// assert_eq!(creds.email().as_str(), "ada@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Email used to sign in.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password used to sign in.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Details required to create an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: EmailAddress,
    pub password: Password,
    pub name: PersonName,
    pub lastname: PersonName,
    pub birth_date: Option<NaiveDate>,
}

impl Registration {
    /// Validate every registration field.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
        lastname: &str,
        birth_date: Option<NaiveDate>,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
            name: PersonName::new(name, "name")?,
            lastname: PersonName::new(lastname, "lastname")?,
            birth_date,
        })
    }
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<PersonName>,
    pub lastname: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub birth_date: Option<NaiveDate>,
}

impl ProfileChanges {
    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.birth_date.is_none()
    }

    /// Whether the change must go through the auth platform.
    #[must_use]
    pub fn touches_credentials(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12345", false)]
    #[case("123456", true)]
    fn password_enforces_minimum_length(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Password::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn secrets_are_redacted_in_debug() {
        let password = Password::new("hunter22").expect("password");
        let token = AccessToken::new("eyJhbGciOi").expect("token");
        assert!(!format!("{password:?}").contains("hunter22"));
        assert!(!format!("{token:?}").contains("eyJhbGciOi"));
    }

    #[rstest]
    fn access_token_rejects_blank_values() {
        assert_eq!(AccessToken::new("  "), Err(AuthValidationError::EmptyToken));
    }

    #[rstest]
    fn registration_reports_the_failing_field() {
        let result = Registration::try_from_parts("ada@example.com", "secret1", "Ada", " ", None);
        assert!(matches!(
            result,
            Err(AuthValidationError::User(UserValidationError::EmptyName { field: "lastname" }))
        ));
    }

    #[rstest]
    fn profile_changes_detect_credential_updates() {
        let mut changes = ProfileChanges::default();
        assert!(changes.is_empty());
        changes.name = Some(PersonName::new("Ada", "name").expect("name"));
        assert!(!changes.touches_credentials());
        changes.password = Some(Password::new("secret1").expect("password"));
        assert!(changes.touches_credentials());
    }
}
