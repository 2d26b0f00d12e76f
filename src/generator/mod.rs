//! Unit assembly pipeline
//!
//! Orchestrates the scheduler, search, extraction, cache and the section
//! writer into an ordered list of learning units for a plan. Every external
//! failure degrades to placeholder content for the affected unit; nothing
//! aborts the batch. Unit indices fan out with bounded concurrency and are
//! reassembled in index order.

use crate::cache::{Fingerprint, OptionalCache};
use crate::config::{Config, GeneratorConfig};
use crate::extract::{self, Extractor, TextExtract};
use crate::llm::{self, LlmClient, SectionWriter};
use crate::models::{FeedbackAction, Medium, Plan, Unit};
use crate::scheduler;
use crate::search::{select_videos, PageSearch, SerpClient, VideoCandidate, VideoSearch};
use futures::stream::{self, StreamExt};

/// Section substituted when no article text could be extracted
pub const NO_ARTICLES_PLACEHOLDER: &str = "No useful articles could be extracted.";

/// Section substituted when no videos fit the target duration
pub const NO_VIDEOS_PLACEHOLDER: &str =
    "<p><em>No high-quality videos were found for this topic. Try another search.</em></p>";

/// Section substituted when the video search collaborator failed
pub const VIDEO_ERROR_PLACEHOLDER: &str =
    "<p><em>Video search is temporarily unavailable. Try again later.</em></p>";

/// Section substituted when content generation failed
///
/// Never written to the cache; the next regeneration retries.
pub const GENERATION_FAILED_PLACEHOLDER: &str =
    "Content generation is temporarily unavailable for this unit.";

/// Unit assembler over the pipeline's collaborator seams
///
/// Generic over the search, extraction and structuring collaborators so
/// tests can drive the full pipeline with in-process fakes.
pub struct UnitGenerator<S, E, W>
where
    S: PageSearch + VideoSearch,
    E: TextExtract,
    W: SectionWriter,
{
    searcher: S,
    extractor: E,
    writer: W,
    cache: OptionalCache,
    config: GeneratorConfig,
}

impl UnitGenerator<SerpClient, Extractor, LlmClient> {
    /// Build the production pipeline from configuration
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let searcher = SerpClient::new(config.search.clone())?;
        let extractor = Extractor::new(config.generator.extract_rps, config.extract_timeout())?;
        let writer = LlmClient::new(config.llm.clone())?;
        let cache = OptionalCache::open(&config.cache.dir).await;

        Ok(Self::new(
            searcher,
            extractor,
            writer,
            cache,
            config.generator.clone(),
        ))
    }
}

impl<S, E, W> UnitGenerator<S, E, W>
where
    S: PageSearch + VideoSearch,
    E: TextExtract,
    W: SectionWriter,
{
    /// Assemble a generator from explicit collaborators
    pub fn new(
        searcher: S,
        extractor: E,
        writer: W,
        cache: OptionalCache,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            searcher,
            extractor,
            writer,
            cache,
            config,
        }
    }

    /// Generate the full ordered unit list for a plan
    ///
    /// Length always equals the scheduled unit count; failures inside a
    /// unit degrade that unit to placeholder content.
    pub async fn generate(&self, plan: &Plan, feedback: FeedbackAction) -> Vec<Unit> {
        // Refine is an upstream control signal and never shapes content
        let feedback = if feedback.is_shaping() {
            feedback
        } else {
            tracing::debug!("Non-shaping feedback action received, treating as great");
            FeedbackAction::Great
        };

        let count = scheduler::unit_count(plan.level, plan.capacity, plan.duration);

        tracing::info!(
            topic = %plan.topic,
            medium = %plan.medium,
            feedback = %feedback,
            units = count,
            concurrency = self.config.concurrency,
            "Generating learning units"
        );

        stream::iter((1..=count).map(|index| self.build_unit(plan, index, feedback)))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }

    /// Build one unit; never fails, degrades to placeholders instead
    async fn build_unit(&self, plan: &Plan, index: u32, feedback: FeedbackAction) -> Unit {
        let sections = match plan.medium {
            Medium::Video => self.video_sections(&plan.topic, index).await,
            Medium::Text => self.text_sections(plan, index, feedback).await,
        };

        Unit::new(index, plan.topic.clone(), sections)
    }

    /// Video medium: search per-part candidates and render one link section
    async fn video_sections(&self, topic: &str, index: u32) -> Vec<String> {
        let query = format!("{topic} part {index}");

        let candidates = match self
            .searcher
            .search_videos(&query, self.config.videos_per_unit)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(unit = index, error = %e, "Video search failed");
                crate::metrics::inc_placeholder("video_error");
                return vec![VIDEO_ERROR_PLACEHOLDER.to_string()];
            }
        };

        let selected = select_videos(candidates, self.config.video_target_secs);
        if selected.is_empty() {
            tracing::warn!(unit = index, query = %query, "No videos fit the target duration");
            crate::metrics::inc_placeholder("no_videos");
            return vec![NO_VIDEOS_PLACEHOLDER.to_string()];
        }

        vec![render_video_section(&selected)]
    }

    /// Text medium: search, extract, cache-or-structure, split
    async fn text_sections(&self, plan: &Plan, index: u32, feedback: FeedbackAction) -> Vec<String> {
        let urls = match self
            .searcher
            .search_pages(&plan.topic, self.config.pages_per_unit)
            .await
        {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(unit = index, error = %e, "Page search failed");
                Vec::new()
            }
        };

        let mut texts = Vec::with_capacity(urls.len());
        for url in &urls {
            match self.extractor.extract_text(url).await {
                Ok(text) => texts.push(text),
                Err(e) => {
                    tracing::warn!(unit = index, url = %url, error = %e, "Extraction failed");
                }
            }
        }

        let combined = extract::combine(&texts);
        if combined.is_empty() {
            tracing::warn!(unit = index, topic = %plan.topic, "No article text extracted");
            crate::metrics::inc_placeholder("no_articles");
            return vec![NO_ARTICLES_PLACEHOLDER.to_string()];
        }

        // Medium tag keeps text and video plans for the same topic apart
        let topic_tag = format!("{}-{}", plan.topic, plan.medium);
        let key = Fingerprint::compute(&topic_tag, index, &combined);

        let structured = match self.cache.get(&key).await {
            Some(cached) => cached,
            None => {
                match self
                    .writer
                    .structure_sections(
                        &combined,
                        &plan.topic,
                        index,
                        self.config.target_minutes,
                        feedback,
                    )
                    .await
                {
                    Ok(structured) => {
                        // Only real content is cached; placeholders never are
                        self.cache.put(&key, &structured).await;
                        structured
                    }
                    Err(e) => {
                        tracing::warn!(unit = index, error = %e, "Content generation failed");
                        crate::metrics::inc_placeholder("generation_failed");
                        return vec![GENERATION_FAILED_PLACEHOLDER.to_string()];
                    }
                }
            }
        };

        let sections = llm::split_sections(&structured);
        if sections.is_empty() {
            crate::metrics::inc_placeholder("generation_failed");
            return vec![GENERATION_FAILED_PLACEHOLDER.to_string()];
        }
        sections
    }
}

/// Render selected videos as one HTML content section
fn render_video_section(videos: &[VideoCandidate]) -> String {
    let mut section = String::from("<h3>Take a close look at these videos:</h3>");

    for video in videos {
        let link = html_escape::encode_double_quoted_attribute(&video.link);
        let title = html_escape::encode_text(&video.title);
        let duration = html_escape::encode_text(&video.duration);

        section.push_str(&format!(
            "<div class=\"video-entry\"><a href=\"{link}\" target=\"_blank\">{title} \u{2013} {duration}</a></div>"
        ));
    }

    section
}
