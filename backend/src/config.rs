//! Application settings read from the environment.
//!
//! Settings are read once at startup through [`mockable::Env`] so tests can
//! inject a `MockEnv` instead of mutating the process environment. Required
//! values are fatal when absent; optional integrations fall back to a
//! degraded mode with a warning.

use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const AUTH_URL_ENV: &str = "AUTH_URL";
pub const AUTH_ANON_KEY_ENV: &str = "AUTH_ANON_KEY";
pub const AUTH_SERVICE_ROLE_KEY_ENV: &str = "AUTH_SERVICE_ROLE_KEY";
pub const EMAIL_API_KEY_ENV: &str = "EMAIL_API_KEY";
pub const EMAIL_API_URL_ENV: &str = "EMAIL_API_URL";
pub const EMAIL_FROM_ENV: &str = "EMAIL_FROM";
pub const VIDEO_API_KEY_ENV: &str = "VIDEO_API_KEY";
pub const VIDEO_API_URL_ENV: &str = "VIDEO_API_URL";
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";
pub const APP_ENV_ENV: &str = "APP_ENV";
pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const RUN_MIGRATIONS_ENV: &str = "RUN_MIGRATIONS";

const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_EMAIL_FROM: &str = "no-reply@reelmark.local";
const DEFAULT_VIDEO_API_URL: &str = "https://api.pexels.com";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const PRODUCTION: &str = "production";
const HTTP_URL_EXPECTED: &str = "an http(s) URL";
const TIMEOUT_EXPECTED: &str = "a positive number of seconds";
const BOOL_EXPECTED: &str = "1|0|true|false";

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Auth platform endpoint and keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    pub base_url: Url,
    pub anon_key: String,
    pub service_role_key: String,
}

/// Transactional email provider; absent key means log-only delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub api_key: Option<String>,
    pub api_url: Url,
    pub from: String,
}

/// Stock video provider; absent key disables search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSettings {
    pub api_key: Option<String>,
    pub base_url: Url,
}

/// Everything the binary needs to wire adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub database_url: String,
    pub auth: AuthSettings,
    pub email: EmailSettings,
    pub video: VideoSettings,
    pub frontend_url: String,
    pub production: bool,
    pub http_timeout: Duration,
    pub run_migrations: bool,
}

/// Read [`AppSettings`] from `env`.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use reelmark::config::app_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/reelmark".into()),
///     "AUTH_URL" => Some("https://auth.example".into()),
///     "AUTH_ANON_KEY" => Some("anon".into()),
///     "AUTH_SERVICE_ROLE_KEY" => Some("service".into()),
///     _ => None,
/// });
///
/// let settings = app_settings_from_env(&env).expect("valid settings");
/// assert!(!settings.production);
/// assert!(settings.video.api_key.is_none());
/// ```
pub fn app_settings_from_env<E: Env>(env: &E) -> Result<AppSettings, ConfigError> {
    let database_url = required(env, DATABASE_URL_ENV)?;
    let auth = AuthSettings {
        base_url: http_url(AUTH_URL_ENV, required(env, AUTH_URL_ENV)?)?,
        anon_key: required(env, AUTH_ANON_KEY_ENV)?,
        service_role_key: required(env, AUTH_SERVICE_ROLE_KEY_ENV)?,
    };

    let email_key = optional(env, EMAIL_API_KEY_ENV);
    if email_key.is_none() {
        warn!("{EMAIL_API_KEY_ENV} not set; emails will only be logged");
    }
    let from = optional(env, EMAIL_FROM_ENV).unwrap_or_else(|| {
        warn!("{EMAIL_FROM_ENV} not set; using {DEFAULT_EMAIL_FROM}");
        DEFAULT_EMAIL_FROM.to_owned()
    });
    let email = EmailSettings {
        api_key: email_key,
        api_url: url_or_default(env, EMAIL_API_URL_ENV, DEFAULT_EMAIL_API_URL)?,
        from,
    };

    let video_key = optional(env, VIDEO_API_KEY_ENV);
    if video_key.is_none() {
        warn!("{VIDEO_API_KEY_ENV} not set; video search is disabled");
    }
    let video = VideoSettings {
        api_key: video_key,
        base_url: url_or_default(env, VIDEO_API_URL_ENV, DEFAULT_VIDEO_API_URL)?,
    };

    let frontend_url = optional(env, FRONTEND_URL_ENV).unwrap_or_else(|| {
        warn!("{FRONTEND_URL_ENV} not set; reset links use {DEFAULT_FRONTEND_URL}");
        DEFAULT_FRONTEND_URL.to_owned()
    });
    let production = optional(env, APP_ENV_ENV)
        .is_some_and(|value| value.eq_ignore_ascii_case(PRODUCTION));

    Ok(AppSettings {
        database_url,
        auth,
        email,
        video,
        frontend_url,
        production,
        http_timeout: http_timeout(env)?,
        run_migrations: run_migrations(env)?,
    })
}

fn optional<E: Env>(env: &E, name: &'static str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    optional(env, name).ok_or(ConfigError::MissingEnv { name })
}

fn http_url(name: &'static str, value: String) -> Result<Url, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value,
            expected: HTTP_URL_EXPECTED,
        }),
    }
}

fn url_or_default<E: Env>(env: &E, name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let value = optional(env, name).unwrap_or_else(|| default.to_owned());
    http_url(name, value)
}

fn http_timeout<E: Env>(env: &E) -> Result<Duration, ConfigError> {
    let Some(value) = optional(env, HTTP_TIMEOUT_SECS_ENV) else {
        return Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    };
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidEnv {
            name: HTTP_TIMEOUT_SECS_ENV,
            value,
            expected: TIMEOUT_EXPECTED,
        }),
    }
}

fn run_migrations<E: Env>(env: &E) -> Result<bool, ConfigError> {
    let Some(value) = optional(env, RUN_MIGRATIONS_ENV) else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name: RUN_MIGRATIONS_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}
