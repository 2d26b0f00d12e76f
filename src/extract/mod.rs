//! Article plaintext extraction
//!
//! Fetches candidate pages found by the page search and strips them down
//! to readable prose. Extraction is best-effort: a page without usable
//! article text yields an empty string, which is a normal outcome and not
//! an error. Outbound fetches are rate limited and carry a realistic
//! browser User-Agent.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use rand::seq::SliceRandom;
use reqwest::{header::USER_AGENT, Client};
use scraper::{Html, Selector};
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

/// Pool of realistic User-Agent strings for rotation
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Errors that can occur while fetching a page for extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// HTTP request error
    #[error("Page fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the page server
    #[error("Page returned status {0}")]
    Status(u16),
}

/// Text extraction seam: URL to readable plaintext
#[async_trait]
pub trait TextExtract: Send + Sync {
    /// Fetch a page and extract its readable text; empty means the page
    /// carried no usable prose
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError>;
}

/// Rate-limited page fetcher with scraper-based prose extraction
pub struct Extractor {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Rate limiter to control request frequency
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl Extractor {
    /// Create a new extractor
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Maximum outbound fetches per second
    /// * `timeout` - Per-request timeout
    pub fn new(requests_per_second: u32, timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::new(1).unwrap());
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch a page body as text
    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        self.rate_limiter.until_ready().await;

        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TextExtract for Extractor {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError> {
        let body = self.fetch(url).await?;
        // Html is !Send; keep parsing fully synchronous between awaits
        let text = extract_from_html(&body);
        tracing::debug!(url = %url, chars = text.len(), "Extracted article text");
        Ok(text)
    }
}

/// Extract readable prose from an HTML document
///
/// Prefers paragraphs inside `<article>`, then `<main>`, then any `<p>` in
/// document order. Paragraphs shorter than a few words are treated as
/// navigation noise and dropped.
pub fn extract_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    // Selectors are compile-time constants; parse failures are programmer error
    let scopes = ["article p", "main p", "p"];

    for scope in scopes {
        let selector = Selector::parse(scope).expect("static selector");
        let paragraphs: Vec<String> = document
            .select(&selector)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|t| t.split_whitespace().count() >= 5)
            .collect();

        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }

    String::new()
}

/// Collapse runs of whitespace into single spaces
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Combine extracted texts into one raw blob
///
/// Non-empty texts are joined in result order with a blank line. All-empty
/// input yields an empty blob; the assembler substitutes the placeholder.
pub fn combine(texts: &[String]) -> String {
    texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_article_scope() {
        let html = r#"
            <html><body>
            <nav><p>Home About Contact Sitemap Login</p></nav>
            <article>
                <p>The quick brown fox jumps over the lazy dog repeatedly.</p>
                <p>A second paragraph with enough words to count as prose.</p>
            </article>
            </body></html>
        "#;
        let text = extract_from_html(html);
        assert!(text.starts_with("The quick brown fox"));
        assert!(text.contains("\n\n"));
        assert!(!text.contains("Sitemap"));
    }

    #[test]
    fn test_extract_falls_back_to_bare_paragraphs() {
        let html = "<html><body><p>Plain page paragraph with sufficient word count here.</p></body></html>";
        let text = extract_from_html(html);
        assert!(text.contains("Plain page paragraph"));
    }

    #[test]
    fn test_extract_empty_for_no_prose() {
        let html = "<html><body><div>no paragraphs</div></body></html>";
        assert!(extract_from_html(html).is_empty());
    }

    #[test]
    fn test_extract_drops_short_noise() {
        let html = "<html><body><p>Menu</p><p>OK</p></body></html>";
        assert!(extract_from_html(html).is_empty());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n  b\t c  "), "a b c");
    }

    #[test]
    fn test_combine_skips_empty_texts() {
        let texts = vec![
            "first article".to_string(),
            String::new(),
            "   ".to_string(),
            "second article".to_string(),
        ];
        assert_eq!(combine(&texts), "first article\n\nsecond article");
    }

    #[test]
    fn test_combine_all_empty_is_empty() {
        let texts = vec![String::new(), "  ".to_string()];
        assert!(combine(&texts).is_empty());
    }
}
