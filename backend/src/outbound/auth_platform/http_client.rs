//! Reqwest-backed auth platform adapter.
//!
//! Public calls authenticate with the anon key; admin calls (credential
//! updates and the user listing) use the service-role key. Upstream statuses
//! are folded into the closed [`IdentityProviderError`] kinds here so no
//! caller inspects message text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    AdminUpdateDto, AdminUserPageDto, PasswordGrantDto, PlatformUserDto, SessionDto,
    SignUpRequestDto, SignUpResponseDto, UserMetadataDto,
};
use crate::config::AuthSettings;
use crate::domain::ports::{
    CredentialUpdate, IdentityProvider, IdentityProviderError, PlatformSession, PlatformUser,
};
use crate::domain::{AccessToken, EmailAddress, LoginCredentials, Registration, UserId};
use crate::outbound::http_body::upstream_message;

const ADMIN_PAGE_SIZE: u32 = 200;

/// Which operation produced a failing status; decides how 401/403 map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    SignUp,
    PasswordGrant,
    TokenLookup,
    Admin,
}

/// HTTP client for the auth platform's `/auth/v1` API.
pub struct AuthPlatformClient {
    client: Client,
    base_url: Url,
    anon_key: String,
    service_role_key: String,
}

impl AuthPlatformClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: &AuthSettings, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            anon_key: settings.anon_key.clone(),
            service_role_key: settings.service_role_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        let joined = format!("{}/auth/v1/{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&joined)
            .map_err(|err| IdentityProviderError::transport(format!("invalid endpoint: {err}")))
    }

    fn public(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.service_role_key.as_str())
            .bearer_auth(&self.service_role_key)
    }

    async fn execute<T: DeserializeOwned>(
        request: RequestBuilder,
        call: Call,
    ) -> Result<T, IdentityProviderError> {
        let body = Self::execute_raw(request, call).await?;
        decode(&body)
    }

    async fn execute_raw(
        request: RequestBuilder,
        call: Call,
    ) -> Result<Vec<u8>, IdentityProviderError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            debug!(%status, ?call, "auth platform returned an error status");
            return Err(map_status_error(call, status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl IdentityProvider for AuthPlatformClient {
    async fn sign_up(&self, registration: &Registration) -> Result<PlatformUser, IdentityProviderError> {
        let payload = SignUpRequestDto {
            email: registration.email.as_str(),
            password: registration.password.expose(),
            data: UserMetadataDto {
                name: registration.name.as_str(),
                lastname: registration.lastname.as_str(),
                birth_date: registration.birth_date,
            },
        };
        let request = self
            .public(self.client.post(self.endpoint("signup")?), &self.anon_key)
            .json(&payload);
        let response: SignUpResponseDto = Self::execute(request, Call::SignUp).await?;
        into_platform_user(response.into_user())
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PlatformSession, IdentityProviderError> {
        let payload = PasswordGrantDto {
            email: credentials.email().as_str(),
            password: credentials.password().expose(),
        };
        let request = self
            .public(
                self.client
                    .post(self.endpoint("token")?)
                    .query(&[("grant_type", "password")]),
                &self.anon_key,
            )
            .json(&payload);
        let session: SessionDto = Self::execute(request, Call::PasswordGrant).await?;
        let access_token = AccessToken::new(session.access_token)
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(PlatformSession {
            access_token,
            user: into_platform_user(session.user)?,
        })
    }

    async fn user_for_token(&self, token: &AccessToken) -> Result<PlatformUser, IdentityProviderError> {
        let request = self.public(self.client.get(self.endpoint("user")?), token.expose());
        let user: PlatformUserDto = Self::execute(request, Call::TokenLookup).await?;
        into_platform_user(user)
    }

    async fn update_credentials(
        &self,
        user_id: &UserId,
        update: &CredentialUpdate,
    ) -> Result<(), IdentityProviderError> {
        let payload = AdminUpdateDto {
            email: update.email.as_ref().map(EmailAddress::as_str),
            password: update.password.as_ref().map(|password| password.expose()),
            email_confirm: update.email.as_ref().map(|_| true),
        };
        let endpoint = self.endpoint(&format!("admin/users/{user_id}"))?;
        let request = self.admin(self.client.put(endpoint)).json(&payload);
        Self::execute_raw(request, Call::Admin).await?;
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlatformUser>, IdentityProviderError> {
        let endpoint = self.endpoint("admin/users")?;
        let mut page = 1_u32;
        loop {
            let request = self.admin(self.client.get(endpoint.clone()).query(&[
                ("page", page.to_string()),
                ("per_page", ADMIN_PAGE_SIZE.to_string()),
            ]));
            let listing: AdminUserPageDto = Self::execute(request, Call::Admin).await?;
            let fetched = listing.users.len();
            if let Some(found) = listing
                .users
                .into_iter()
                .find(|user| email_matches(user.email.as_deref(), email))
            {
                return into_platform_user(found).map(Some);
            }
            if fetched < ADMIN_PAGE_SIZE as usize {
                return Ok(None);
            }
            page += 1;
        }
    }
}

fn email_matches(candidate: Option<&str>, wanted: &EmailAddress) -> bool {
    candidate.is_some_and(|candidate| candidate.eq_ignore_ascii_case(wanted.as_str()))
}

fn into_platform_user(dto: PlatformUserDto) -> Result<PlatformUser, IdentityProviderError> {
    dto.into_domain().map_err(IdentityProviderError::decode)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, IdentityProviderError> {
    serde_json::from_slice(body).map_err(|err| {
        IdentityProviderError::decode(format!("invalid auth platform JSON payload: {err}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::transport("auth platform request timed out")
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

fn map_status_error(call: Call, status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match (call, status) {
        (Call::PasswordGrant, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
            IdentityProviderError::invalid_credentials()
        }
        (Call::TokenLookup, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            IdentityProviderError::invalid_token()
        }
        (Call::SignUp | Call::Admin, status) if status.is_client_error() => {
            IdentityProviderError::rejected(upstream_message(body))
        }
        (_, status) => IdentityProviderError::transport(format!(
            "status {}: {}",
            status.as_u16(),
            upstream_message(body)
        )),
    }
}
