use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, FetchError, OEmbedResponse};

pub const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(Debug, Clone)]
pub struct OEmbedSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for OEmbedSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OEMBED_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 256 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, video_url: &str) -> Result<OEmbedResponse, FetchError>;
}

/// Single GET against the oEmbed endpoint; no retries.
#[derive(Debug, Clone)]
pub struct ReqwestOEmbedFetcher {
    settings: OEmbedSettings,
}

impl ReqwestOEmbedFetcher {
    pub fn new(settings: OEmbedSettings) -> Self {
        Self { settings }
    }

    /// `{endpoint}?format=json&url={video_url}` with the video url form-encoded.
    pub fn request_url(&self, video_url: &str) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &self.settings.endpoint,
            &[("format", "json"), ("url", video_url)],
        )
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for ReqwestOEmbedFetcher {
    async fn fetch(&self, video_url: &str) -> Result<OEmbedResponse, FetchError> {
        let request_url = self.request_url(video_url)?;
        let client = self.build_client()?;

        let response = client
            .get(request_url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
