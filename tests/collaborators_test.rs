//! Integration tests for the HTTP collaborators using wiremock
//!
//! Validates the SerpAPI search client, the article extractor and the
//! Ollama structuring client against mock servers.

use baeum::extract::{Extractor, TextExtract};
use baeum::llm::{LlmClient, LlmConfig, SectionWriter};
use baeum::models::FeedbackAction;
use baeum::search::{PageSearch, SearchConfig, SerpClient, VideoSearch};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn serp_client(server: &MockServer) -> SerpClient {
    SerpClient::new(SearchConfig {
        endpoint: format!("{}/search", server.uri()),
        api_key: "test-key".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

// ============================================================================
// Page search
// ============================================================================

#[tokio::test]
async fn test_page_search_returns_links_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "ai ethics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [
                {"link": "https://a.example/article"},
                {"title": "no link on this one"},
                {"link": "https://b.example/post"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = serp_client(&mock_server);
    let links = client.search_pages("ai ethics", 2).await.unwrap();

    assert_eq!(
        links,
        vec!["https://a.example/article", "https://b.example/post"]
    );
}

#[tokio::test]
async fn test_page_search_propagates_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = serp_client(&mock_server);
    let result = client.search_pages("ai ethics", 2).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_page_search_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = serp_client(&mock_server);
    let links = client.search_pages("ai ethics", 2).await.unwrap();
    assert!(links.is_empty());
}

// ============================================================================
// Video search
// ============================================================================

#[tokio::test]
async fn test_video_search_skips_incomplete_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("engine", "youtube"))
        .and(query_param("search_query", "ai ethics part 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video_results": [
                {"title": "Complete", "link": "https://y.example/1", "length": "12:34"},
                {"title": "Missing length", "link": "https://y.example/2"},
                {"link": "https://y.example/3", "length": "5:00"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = serp_client(&mock_server);
    let candidates = client.search_videos("ai ethics part 1", 10).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Complete");
    assert_eq!(candidates[0].duration, "12:34");
}

// ============================================================================
// Extraction
// ============================================================================

#[tokio::test]
async fn test_extractor_pulls_article_prose() {
    let mock_server = MockServer::start().await;
    let html = r#"<!DOCTYPE html>
<html>
<body>
<nav><p>Home About Contact Careers Privacy</p></nav>
<article>
<p>Artificial intelligence raises questions society has never faced before.</p>
<p>Governance frameworks are emerging across several jurisdictions worldwide.</p>
</article>
</body>
</html>"#;

    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&mock_server)
        .await;

    let extractor = Extractor::new(10, Duration::from_secs(5)).unwrap();
    let text = extractor
        .extract_text(&format!("{}/story", mock_server.uri()))
        .await
        .unwrap();

    assert!(text.starts_with("Artificial intelligence raises"));
    assert!(text.contains("Governance frameworks"));
    assert!(!text.contains("Careers"));
}

#[tokio::test]
async fn test_extractor_empty_for_pages_without_prose() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><div>nothing</div></body></html>"))
        .mount(&mock_server)
        .await;

    let extractor = Extractor::new(10, Duration::from_secs(5)).unwrap();
    let text = extractor
        .extract_text(&format!("{}/empty", mock_server.uri()))
        .await
        .unwrap();

    assert!(text.is_empty());
}

#[tokio::test]
async fn test_extractor_error_on_server_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let extractor = Extractor::new(10, Duration::from_secs(5)).unwrap();
    let result = extractor
        .extract_text(&format!("{}/gone", mock_server.uri()))
        .await;

    assert!(result.is_err());
}

// ============================================================================
// LLM structuring
// ============================================================================

fn llm_client(server: &MockServer) -> LlmClient {
    LlmClient::new(LlmConfig {
        endpoint: server.uri(),
        model: "test-model".to_string(),
        timeout_secs: 5,
        max_tokens: 512,
        temperature: 0.7,
    })
    .unwrap()
}

#[tokio::test]
async fn test_structure_sections_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "### Section 1: Introduction\nBody.\n\n### Section 2: Depth\nMore body.",
            "done": true
        })))
        .mount(&mock_server)
        .await;

    let client = llm_client(&mock_server);
    let structured = client
        .structure_sections(
            "raw article text",
            "ai ethics",
            1,
            120,
            FeedbackAction::Harder,
        )
        .await
        .unwrap();

    assert!(structured.contains("### Section 1: Introduction"));

    // Verify the prompt embedded the style directive and the raw text
    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("raw article text"));
    assert!(prompt.contains("ai ethics"));
    assert!(prompt.contains("deeper into technical details"));
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["stream"], false);
}

#[tokio::test]
async fn test_structure_sections_error_on_server_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&mock_server)
        .await;

    let client = llm_client(&mock_server);
    let result = client
        .structure_sections("raw", "topic", 1, 60, FeedbackAction::Great)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_structure_sections_rejects_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "   ",
            "done": true
        })))
        .mount(&mock_server)
        .await;

    let client = llm_client(&mock_server);
    let result = client
        .structure_sections("raw", "topic", 1, 60, FeedbackAction::Great)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_is_available_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&mock_server)
        .await;

    let client = llm_client(&mock_server);
    assert!(client.is_available().await);
}
