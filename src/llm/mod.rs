//! LLM client for structuring learning content
//!
//! This module provides LLM integration using Ollama to transform raw
//! article text into a fixed number of progressively harder learning
//! sections, with a style directive derived from the learner's latest
//! feedback action.

use crate::models::FeedbackAction;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Marker prefixed to every section heading in generated output
///
/// The structuring prompt instructs the model to emit this marker, and the
/// assembler splits the structured text on it.
pub const SECTION_MARKER: &str = "### ";

/// Number of progressive sections a structured unit carries
pub const SECTION_COUNT: usize = 5;

/// Errors from the generation collaborator
///
/// These stop at the assembler boundary: a failed generation degrades that
/// unit to placeholder content and is never cached.
#[derive(Error, Debug)]
pub enum LlmError {
    /// HTTP request error
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the generation endpoint
    #[error("LLM endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The model returned an empty response
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// Caller passed empty raw text; the generation call must be bypassed
    #[error("Refusing to structure empty raw text")]
    EmptyInput,
}

/// Configuration for LLM client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama endpoint URL (default: http://localhost:11434)
    pub endpoint: String,

    /// Model name to use
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for generation (0.0 - 1.0)
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "qwen2.5:7b".to_string(),
            timeout_secs: 120,
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("OLLAMA_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "qwen2.5:7b".to_string()),
            timeout_secs: std::env::var("OLLAMA_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
            max_tokens: std::env::var("OLLAMA_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4096),
            temperature: std::env::var("OLLAMA_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.7),
        }
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

/// Ollama generation options
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Structuring seam: raw text to section-marked learning content
///
/// Implemented by [`LlmClient`]; tests inject in-process fakes.
#[async_trait]
pub trait SectionWriter: Send + Sync {
    /// Transform raw acquired text into structured, section-marked
    /// learning content for one unit
    async fn structure_sections(
        &self,
        raw_text: &str,
        topic: &str,
        unit_index: u32,
        target_minutes: u32,
        feedback: FeedbackAction,
    ) -> Result<String, LlmError>;
}

/// LLM client for content structuring
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client with custom config
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env())
    }

    /// Check if the generation endpoint is reachable
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.endpoint);
        self.client.get(&url).send().await.is_ok()
    }

    /// Build the tutor prompt for one unit
    ///
    /// Embeds the raw text, topic, time framing and the feedback-derived
    /// style directive, with explicit formatting instructions so the output
    /// splits cleanly on [`SECTION_MARKER`].
    fn build_tutor_prompt(
        &self,
        raw_text: &str,
        topic: &str,
        target_minutes: u32,
        feedback: FeedbackAction,
    ) -> String {
        let estimated_time = if target_minutes >= 90 {
            "two hours"
        } else {
            "one hour"
        };

        let style_instruction = style_directive(feedback);

        format!(
            r#"You are an experienced academic tutor creating structured learning content for self-study.

Your task is to turn the following article excerpts into a complete learning unit on "{topic}" that will take a learner approximately {estimated_time} to study.

{style_instruction}

Split the content into **{SECTION_COUNT} progressive sections**, starting with an introduction and moving toward more advanced, detailed analysis. Each section must begin with a heading line of the form `{SECTION_MARKER}Section N: [Title]` and contain **3-5 paragraphs**.

Use accessible but intelligent language - the tone should resemble a university-level textbook chapter.

=== CONTENT TO SUMMARIZE AND STRUCTURE ===
{raw_text}

=== OUTPUT FORMAT ===
{SECTION_MARKER}Section 1: [Title]
[3-5 paragraphs]

{SECTION_MARKER}Section 2: [Title]
[3-5 paragraphs]

... up to Section {SECTION_COUNT}"#,
        )
    }

    /// Generate text using Ollama
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.endpoint);

        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            crate::metrics::inc_llm_request("error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ollama_response: OllamaResponse = response.json().await?;
        crate::metrics::inc_llm_request("ok");

        let text = ollama_response.response.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl SectionWriter for LlmClient {
    async fn structure_sections(
        &self,
        raw_text: &str,
        topic: &str,
        unit_index: u32,
        target_minutes: u32,
        feedback: FeedbackAction,
    ) -> Result<String, LlmError> {
        if raw_text.trim().is_empty() {
            debug_assert!(false, "callers must bypass structuring for empty raw text");
            return Err(LlmError::EmptyInput);
        }

        let prompt = self.build_tutor_prompt(raw_text, topic, target_minutes, feedback);

        tracing::debug!(
            topic = %topic,
            unit = unit_index,
            feedback = %feedback,
            prompt_chars = prompt.len(),
            "Requesting structured sections"
        );

        self.generate(&prompt).await
    }
}

/// Style directive derived from the latest feedback action
///
/// `Refine` is an upstream control signal and should never reach shaping;
/// if it does, it is treated as `Great`.
fn style_directive(feedback: FeedbackAction) -> &'static str {
    match feedback {
        FeedbackAction::Harder => {
            "Go deeper into technical details, edge cases, or emerging challenges."
        }
        FeedbackAction::Easier => {
            "Use simpler explanations, analogies, and real-world examples to clarify complex points."
        }
        FeedbackAction::Great => "",
        FeedbackAction::Refine => {
            tracing::debug!("Refine action reached the section writer, treating as great");
            ""
        }
    }
}

/// Split structured text into non-empty trimmed sections
///
/// Splits on [`SECTION_MARKER`], dropping empty fragments. Text without any
/// marker comes back as a single section.
pub fn split_sections(structured: &str) -> Vec<String> {
    structured
        .split(SECTION_MARKER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
