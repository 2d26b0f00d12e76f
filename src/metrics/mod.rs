//! Prometheus metrics for the content pipeline
//!
//! Tracks the silent-fallback points the pipeline deliberately hides from
//! callers (scheduler defaults, placeholder substitutions) plus cache and
//! LLM traffic.
//!
//! Call [`init_metrics`] once at application startup. If initialization is
//! skipped or fails, all metric operations are no-ops.

use prometheus::{
    register_counter, register_counter_vec, Counter, CounterVec, Encoder, TextEncoder,
};
use std::sync::OnceLock;

/// Container for all pipeline metrics
struct PipelineMetrics {
    scheduler_fallbacks: Counter,
    cache_hits: Counter,
    cache_misses: Counter,
    llm_requests: CounterVec,
    placeholders: CounterVec,
}

/// Global storage for pipeline metrics
static PIPELINE_METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Initialize all Prometheus metrics
///
/// Registration failures are returned but non-fatal; the application can
/// continue with metrics disabled.
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = PipelineMetrics {
        scheduler_fallbacks: register_counter!(
            "baeum_scheduler_fallbacks_total",
            "Unit-count lookups that resolved to the default"
        )?,
        cache_hits: register_counter!(
            "baeum_cache_hits_total",
            "Content cache fingerprint hits"
        )?,
        cache_misses: register_counter!(
            "baeum_cache_misses_total",
            "Content cache fingerprint misses"
        )?,
        llm_requests: register_counter_vec!(
            "baeum_llm_requests_total",
            "Generation requests by outcome",
            &["outcome"]
        )?,
        placeholders: register_counter_vec!(
            "baeum_placeholders_total",
            "Placeholder sections substituted, by reason",
            &["reason"]
        )?,
    };

    PIPELINE_METRICS
        .set(metrics)
        .map_err(|_| "metrics already initialized")?;

    Ok(())
}

/// Record a scheduler table miss resolved by the default count
pub fn inc_scheduler_fallback() {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.scheduler_fallbacks.inc();
    }
}

/// Record a content cache hit
pub fn inc_cache_hit() {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.cache_hits.inc();
    }
}

/// Record a content cache miss
pub fn inc_cache_miss() {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.cache_misses.inc();
    }
}

/// Record a generation request outcome ("ok" or "error")
pub fn inc_llm_request(outcome: &str) {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.llm_requests.with_label_values(&[outcome]).inc();
    }
}

/// Record a placeholder substitution
///
/// Reasons: "no_articles", "no_videos", "video_error", "generation_failed".
pub fn inc_placeholder(reason: &str) {
    if let Some(m) = PIPELINE_METRICS.get() {
        m.placeholders.with_label_values(&[reason]).inc();
    }
}

/// Gather all registered metrics in Prometheus text exposition format
pub fn gather() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_metrics_are_noops() {
        // Must not panic before init_metrics() is called
        inc_scheduler_fallback();
        inc_cache_hit();
        inc_cache_miss();
        inc_llm_request("ok");
        inc_placeholder("no_articles");
    }

    #[test]
    fn test_init_is_idempotent() {
        let first = init_metrics();
        let second = init_metrics();
        assert!(first.is_ok() || second.is_ok());
    }
}
