//! Web and video search collaborators (SerpAPI wire format)
//!
//! The pipeline acquires raw material through two search seams: page
//! search (URLs to extract article text from) and video search (candidate
//! videos with durations). Both are modeled as traits so the assembler can
//! be exercised against in-process fakes; [`SerpClient`] is the production
//! implementation speaking the SerpAPI JSON shape.

pub mod videos;

pub use videos::{parse_duration, select_videos, VideoCandidate};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from the search collaborators
///
/// These stop at the assembler boundary: acquisition failures degrade to
/// placeholder content and never abort a generation batch.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request error
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the search endpoint
    #[error("Search endpoint returned status {0}")]
    Status(u16),

    /// Response body did not match the expected shape
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// Configuration for the search client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search API endpoint (default: https://serpapi.com/search)
    pub endpoint: String,

    /// API key for the search service
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search".to_string(),
            api_key: String::new(),
            timeout_secs: 20,
        }
    }
}

impl SearchConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("SERPAPI_ENDPOINT")
                .unwrap_or_else(|_| "https://serpapi.com/search".to_string()),
            api_key: std::env::var("SERPAPI_KEY").unwrap_or_default(),
            timeout_secs: std::env::var("SERPAPI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
        }
    }
}

/// Page search seam: topic query to ordered article URLs
#[async_trait]
pub trait PageSearch: Send + Sync {
    /// Search for pages matching a query, returning URLs in relevance order
    async fn search_pages(&self, query: &str, max_results: usize)
        -> Result<Vec<String>, SearchError>;
}

/// Video search seam: topic query to candidate videos in relevance order
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for videos matching a query
    async fn search_videos(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, SearchError>;
}

/// Google organic search result (only the link is consumed)
#[derive(Debug, Deserialize)]
struct OrganicResult {
    link: Option<String>,
}

/// Page search response
#[derive(Debug, Deserialize)]
struct PageSearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

/// YouTube search result
#[derive(Debug, Deserialize)]
struct VideoResult {
    title: Option<String>,
    link: Option<String>,
    /// Duration string, e.g. "12:34" or "1:02:03"
    length: Option<String>,
}

/// Video search response
#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    video_results: Vec<VideoResult>,
}

/// SerpAPI search client
pub struct SerpClient {
    client: Client,
    config: SearchConfig,
}

impl SerpClient {
    /// Create a new search client
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self, SearchError> {
        Self::new(SearchConfig::from_env())
    }

    /// Issue a GET to the search endpoint and deserialize the body
    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl PageSearch for SerpClient {
    async fn search_pages(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, SearchError> {
        let num = max_results.to_string();
        let params = [
            ("q", query),
            ("api_key", self.config.api_key.as_str()),
            ("engine", "google"),
            ("num", num.as_str()),
        ];

        let body: PageSearchResponse = self.query(&params).await?;

        let links: Vec<String> = body
            .organic_results
            .into_iter()
            .filter_map(|r| r.link)
            .take(max_results)
            .collect();

        tracing::debug!(query = %query, count = links.len(), "Page search completed");
        Ok(links)
    }
}

#[async_trait]
impl VideoSearch for SerpClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoCandidate>, SearchError> {
        let params = [
            ("engine", "youtube"),
            ("search_query", query),
            ("api_key", self.config.api_key.as_str()),
        ];

        let body: VideoSearchResponse = self.query(&params).await?;

        // Candidates missing title, link or length carry nothing renderable
        let candidates: Vec<VideoCandidate> = body
            .video_results
            .into_iter()
            .take(max_results)
            .filter_map(|v| match (v.title, v.link, v.length) {
                (Some(title), Some(link), Some(duration)) => Some(VideoCandidate {
                    title,
                    link,
                    duration,
                }),
                _ => None,
            })
            .collect();

        tracing::debug!(query = %query, count = candidates.len(), "Video search completed");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "https://serpapi.com/search");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_page_response_tolerates_missing_fields() {
        let body = r#"{"organic_results": [{"link": "https://a.example"}, {"title": "no link"}]}"#;
        let parsed: PageSearchResponse = serde_json::from_str(body).unwrap();
        let links: Vec<_> = parsed
            .organic_results
            .into_iter()
            .filter_map(|r| r.link)
            .collect();
        assert_eq!(links, vec!["https://a.example"]);
    }

    #[test]
    fn test_video_response_empty_when_absent() {
        let parsed: VideoSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.video_results.is_empty());
    }
}
