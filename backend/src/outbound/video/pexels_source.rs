//! Reqwest-backed Pexels search adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::SearchResponseDto;
use crate::domain::VideoHit;
use crate::domain::ports::{VideoSearchSource, VideoSearchSourceError};
use crate::outbound::http_body::body_preview;

/// Video search over `GET {base}/videos/search`.
pub struct PexelsVideoSource {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl PexelsVideoSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: search_endpoint(base_url),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl VideoSearchSource for PexelsVideoSource {
    async fn search(&self, term: &str, per_page: u8) -> Result<Vec<VideoHit>, VideoSearchSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::AUTHORIZATION, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("query", term), ("per_page", &per_page.to_string())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_hits(body.as_ref())
    }
}

fn search_endpoint(base_url: &Url) -> Url {
    let mut endpoint = base_url.clone();
    let path = format!("{}/videos/search", base_url.path().trim_end_matches('/'));
    endpoint.set_path(&path);
    endpoint
}

fn parse_hits(body: &[u8]) -> Result<Vec<VideoHit>, VideoSearchSourceError> {
    let decoded: SearchResponseDto = serde_json::from_slice(body).map_err(|error| {
        VideoSearchSourceError::decode(format!("invalid video search JSON payload: {error}"))
    })?;
    Ok(decoded.into_hits())
}

fn map_transport_error(error: reqwest::Error) -> VideoSearchSourceError {
    if error.is_timeout() {
        VideoSearchSourceError::transport("video search request timed out")
    } else {
        VideoSearchSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> VideoSearchSourceError {
    VideoSearchSourceError::status(status.as_u16(), body_preview(body))
}
