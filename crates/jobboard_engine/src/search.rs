use std::time::Duration;

use board_logging::board_debug;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use url::Url;

use crate::types::RawSearchPage;
use crate::{FailureKind, SearchError, SearchPage, SearchRequest};

const SEARCH_PATH: [&str; 3] = ["api", "jobs", "search"];

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub auth_token: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
            auth_token: None,
        }
    }
}

/// The backend's job search endpoint.
#[async_trait::async_trait]
pub trait JobSearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobSearch {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestJobSearch {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Full search URL for `request`, relative to the configured base.
    pub fn endpoint(&self, request: &SearchRequest) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| SearchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| SearchError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
            .pop_if_empty()
            .extend(SEARCH_PATH);
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl JobSearchService for ReqwestJobSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let url = self.endpoint(request)?;
        board_debug!("GET {}", url);

        let mut builder = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.settings.auth_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(SearchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        let raw: RawSearchPage = serde_json::from_slice(&body)
            .map_err(|err| SearchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(SearchPage::from(raw))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
