//! Account HTTP handlers.
//!
//! ```text
//! POST   /register
//! POST   /login
//! GET    /me
//! PUT    /update-user
//! DELETE /delete-user
//! POST   /forgot-password
//! POST   /reset-password
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EmailAddress, Error, LoginCredentials, Password, PersonName, ProfileChanges,
    Registration, ResetToken, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ValidationCode, field_error, map_auth_validation, map_user_validation,
    missing_field_error,
};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const NEW_PASSWORD: FieldName = FieldName::new("newPassword");
const BIRTH_DATE: FieldName = FieldName::new("birthDate");

/// Message returned by `POST /forgot-password` regardless of the outcome.
pub const RESET_REQUESTED_MESSAGE: &str =
    "If the email exists, a password reset link has been sent";

/// Registration payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub birth_date: Option<String>,
}

/// Login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial profile update; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birth_date: Option<String>,
}

/// Forgot-password payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Reset-password payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

/// Public view of a user profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub birth_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserProfile> for UserResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            lastname: value.lastname,
            email: value.email,
            birth_date: value.birth_date.map(|date| date.to_string()),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Envelope for endpoints returning one user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Forgot-password acknowledgement; `token` only outside production.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err| map_user_validation(err, EMAIL))
}

fn parse_password(raw: String, field: FieldName) -> Result<Password, Error> {
    Password::new(raw).map_err(|err| map_auth_validation(err, field))
}

fn parse_birth_date(raw: Option<String>) -> Result<Option<NaiveDate>, Error> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
            field_error(
                BIRTH_DATE,
                ValidationCode::InvalidValue,
                "birthDate must be a YYYY-MM-DD date",
            )
        })
    })
    .transpose()
}

fn parse_registration(payload: RegisterRequest) -> Result<Registration, Error> {
    let email = required(payload.email, EMAIL)?;
    let password = required(payload.password, PASSWORD)?;
    let name = required(payload.name, FieldName::new("name"))?;
    let lastname = required(payload.lastname, FieldName::new("lastname"))?;
    let birth_date = parse_birth_date(payload.birth_date)?;
    Registration::try_from_parts(&email, &password, &name, &lastname, birth_date)
        .map_err(|err| map_auth_validation(err, PASSWORD))
}

fn parse_login(payload: LoginRequest) -> Result<LoginCredentials, Error> {
    let email = required(payload.email, EMAIL)?;
    let password = required(payload.password, PASSWORD)?;
    LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| map_auth_validation(err, PASSWORD))
}

fn parse_name(raw: Option<String>, field: &'static str) -> Result<Option<PersonName>, Error> {
    raw.map(|value| PersonName::new(value, field))
        .transpose()
        .map_err(|err| map_user_validation(err, EMAIL))
}

fn parse_changes(payload: UpdateUserRequest) -> Result<ProfileChanges, Error> {
    Ok(ProfileChanges {
        name: parse_name(payload.name, "name")?,
        lastname: parse_name(payload.lastname, "lastname")?,
        email: payload.email.as_deref().map(parse_email).transpose()?,
        password: payload
            .password
            .map(|raw| parse_password(raw, PASSWORD))
            .transpose()?,
        birth_date: parse_birth_date(payload.birth_date)?,
    })
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(payload.into_inner())?;
    let profile = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserEnvelope {
        user: profile.into(),
    }))
}

/// Sign in and receive a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = parse_login(payload.into_inner())?;
    let outcome = state.accounts.login(credentials).await?;
    Ok(web::Json(LoginResponse {
        token: outcome.token.expose().to_owned(),
        user: outcome.profile.into(),
    }))
}

/// Fetch the caller's profile.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Caller profile", body = UserEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "me",
    security(("bearerAuth" = []))
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserEnvelope>> {
    let profile = state.accounts_query.profile(user.id()).await?;
    Ok(web::Json(UserEnvelope {
        user: profile.into(),
    }))
}

/// Update any subset of the caller's profile fields.
#[utoipa::path(
    put,
    path = "/update-user",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "updateUser",
    security(("bearerAuth" = []))
)]
#[put("/update-user")]
pub async fn update_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let changes = parse_changes(payload.into_inner())?;
    let profile = state.accounts.update_profile(user.id(), changes).await?;
    Ok(web::Json(UserEnvelope {
        user: profile.into(),
    }))
}

/// Soft-delete the caller's account.
#[utoipa::path(
    delete,
    path = "/delete-user",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Profile not found", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "deleteUser",
    security(("bearerAuth" = []))
)]
#[delete("/delete-user")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<MessageResponse>> {
    state.accounts.delete_account(user.id()).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}

/// Request a password reset email.
#[utoipa::path(
    post,
    path = "/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Request accepted", body = ForgotPasswordResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<ForgotPasswordRequest>,
) -> ApiResult<web::Json<ForgotPasswordResponse>> {
    let email = required(payload.into_inner().email, EMAIL)?;
    let email = parse_email(&email)?;
    let requested = state.accounts.request_password_reset(email).await?;
    Ok(web::Json(ForgotPasswordResponse {
        message: RESET_REQUESTED_MESSAGE.to_owned(),
        token: requested.debug_token,
    }))
}

/// Redeem a reset token.
#[utoipa::path(
    post,
    path = "/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ResetPasswordRequest {
        token,
        new_password,
    } = payload.into_inner();
    let token = required(token, FieldName::new("token"))?;
    let new_password = parse_password(required(new_password, NEW_PASSWORD)?, NEW_PASSWORD)?;
    state
        .accounts
        .reset_password(ResetToken::from_client(token), new_password)
        .await?;
    Ok(web::Json(MessageResponse::new("Password updated successfully")))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
