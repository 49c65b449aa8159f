//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure is an `invalid_request` error whose details name
//! the offending field and a stable machine-readable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    AuthValidationError, ContentValidationError, Error, RatingValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidEmail,
    InvalidValue,
    TooShort,
    TooLong,
    OutOfRange,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidValue => "invalid_value",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            ValidationCode::InvalidUuid,
            format!("{name} must be a valid UUID"),
        )
    })
}

pub(crate) fn map_user_validation(err: UserValidationError, email_field: FieldName) -> Error {
    match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => field_error(
            FieldName::new("userId"),
            ValidationCode::InvalidUuid,
            err.to_string(),
        ),
        UserValidationError::InvalidEmail => {
            field_error(email_field, ValidationCode::InvalidEmail, err.to_string())
        }
        UserValidationError::EmptyName { field } => {
            field_error(FieldName::new(field), ValidationCode::MissingField, err.to_string())
        }
        UserValidationError::NameTooLong { field, .. } => {
            field_error(FieldName::new(field), ValidationCode::TooLong, err.to_string())
        }
    }
}

pub(crate) fn map_auth_validation(err: AuthValidationError, password_field: FieldName) -> Error {
    match err {
        AuthValidationError::PasswordTooShort { .. } => {
            field_error(password_field, ValidationCode::TooShort, err.to_string())
        }
        AuthValidationError::EmptyToken => field_error(
            FieldName::new("token"),
            ValidationCode::MissingField,
            err.to_string(),
        ),
        AuthValidationError::EmptyChanges => Error::invalid_request(err.to_string()),
        AuthValidationError::User(inner) => map_user_validation(inner, FieldName::new("email")),
    }
}

pub(crate) fn map_content_validation(err: ContentValidationError, field: FieldName) -> Error {
    let code = match err {
        ContentValidationError::EmptyExternalId => ValidationCode::MissingField,
        ContentValidationError::ExternalIdTooLong { .. } => ValidationCode::TooLong,
        ContentValidationError::InvalidId => ValidationCode::InvalidUuid,
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_rating_validation(err: RatingValidationError) -> Error {
    match err {
        RatingValidationError::ScoreOutOfRange { .. } => field_error(
            FieldName::new("score"),
            ValidationCode::OutOfRange,
            err.to_string(),
        ),
        RatingValidationError::MissingScoreAndComment => field_error(
            FieldName::new("score"),
            ValidationCode::InvalidValue,
            err.to_string(),
        ),
    }
}
