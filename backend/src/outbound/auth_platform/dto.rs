//! Wire types for the auth platform's REST API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::PlatformUser;

#[derive(Debug, Serialize)]
pub(super) struct SignUpRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) data: UserMetadataDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserMetadataDto<'a> {
    pub(super) name: &'a str,
    pub(super) lastname: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) birth_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Default, Serialize)]
pub(super) struct AdminUpdateDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) password: Option<&'a str>,
    /// Skip the confirmation round-trip for admin email changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) email_confirm: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlatformUserDto {
    pub(super) id: String,
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) user_metadata: StoredMetadataDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct StoredMetadataDto {
    pub(super) name: Option<String>,
    pub(super) lastname: Option<String>,
}

/// Sign-up answers with a session when auto-confirm is on, else the user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SignUpResponseDto {
    Session { user: PlatformUserDto },
    User(PlatformUserDto),
}

impl SignUpResponseDto {
    pub(super) fn into_user(self) -> PlatformUserDto {
        match self {
            Self::Session { user } | Self::User(user) => user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    pub(super) access_token: String,
    pub(super) user: PlatformUserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdminUserPageDto {
    #[serde(default)]
    pub(super) users: Vec<PlatformUserDto>,
}

impl PlatformUserDto {
    pub(super) fn into_domain(self) -> Result<PlatformUser, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("user id '{}': {err}", self.id))?;
        Ok(PlatformUser {
            id,
            email: self.email,
            name: self.user_metadata.name,
            lastname: self.user_metadata.lastname,
        })
    }
}
