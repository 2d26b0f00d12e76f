//! Lightweight text segmentation
//!
//! Alternate path to the LLM structurer: splits arbitrary text into a
//! bounded number of sections along sentence boundaries, with no external
//! collaborator involved.

use regex::Regex;
use std::sync::OnceLock;

/// Sentence-terminal punctuation followed by whitespace
fn boundary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("static regex"))
}

/// Split text into sentence-like units
///
/// A sentence ends at terminal punctuation followed by whitespace. Text
/// without terminal punctuation is a single sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in boundary_regex().find_iter(text) {
        // Keep the terminal punctuation with its sentence
        let end = m.start() + 1;
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Split text into at most `max_sections` sections
///
/// Sentences are grouped into uniform chunks of `max(1, n / max_sections)`
/// consecutive sentences; the result is truncated to `max_sections`, so
/// trailing sentences beyond the last kept chunk are dropped rather than
/// merged. Never empty for non-empty input.
pub fn split_into_sections(text: &str, max_sections: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return vec![text.to_string()];
    }

    let chunk_size = std::cmp::max(1, sentences.len() / max_sections.max(1));

    sentences
        .chunks(chunk_size)
        .take(max_sections)
        .map(|chunk| chunk.join(" "))
        .collect()
}
