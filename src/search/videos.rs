//! Video candidate selection against a target viewing duration
//!
//! Candidates arrive in relevance order and are packed greedily: a video
//! is accepted only if it individually fits the target and keeps the
//! running total under the target. Videos are never reordered or trimmed.

use serde::{Deserialize, Serialize};

/// One candidate video from the video search collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    /// Video title
    pub title: String,

    /// Watch URL
    pub link: String,

    /// Duration as reported by the source ("H:MM:SS", "MM:SS" or seconds)
    pub duration: String,
}

impl VideoCandidate {
    /// Parsed duration in seconds, if the duration string is well-formed
    pub fn duration_secs(&self) -> Option<u64> {
        parse_duration(&self.duration)
    }
}

/// Parse a colon-separated duration into seconds
///
/// Supports "H:MM:SS", "MM:SS" and bare seconds. Returns `None` for
/// anything else (more than three components, empty or non-numeric parts)
/// and for values that would overflow the second count. Duration strings
/// come from external search responses and are not trusted.
pub fn parse_duration(duration: &str) -> Option<u64> {
    let parts: Vec<u64> = duration
        .split(':')
        .map(|p| p.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s),
        [m, s] => m.checked_mul(60)?.checked_add(*s),
        [s] => Some(*s),
        _ => None,
    }
}

/// Select candidate videos up to a target total duration
///
/// Iterates in relevance order; skips any candidate with an unparseable
/// duration, any single video longer than the target, and any video that
/// would push the running total over the target (skip, not abort). Stops
/// early once the running total reaches the target. All-or-nothing per
/// video; the result may be empty.
pub fn select_videos(candidates: Vec<VideoCandidate>, target_secs: u64) -> Vec<VideoCandidate> {
    let mut selected = Vec::new();
    let mut total = 0u64;

    for candidate in candidates {
        let Some(secs) = candidate.duration_secs() else {
            tracing::debug!(title = %candidate.title, duration = %candidate.duration,
                "Skipping video with unparseable duration");
            continue;
        };

        if secs > target_secs {
            continue;
        }

        let Some(next_total) = total.checked_add(secs) else {
            continue;
        };
        if next_total > target_secs {
            continue;
        }

        total = next_total;
        selected.push(candidate);

        if total >= target_secs {
            break;
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, duration: &str) -> VideoCandidate {
        VideoCandidate {
            title: title.to_string(),
            link: format!("https://youtube.example/watch?v={title}"),
            duration: duration.to_string(),
        }
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("1:02:03"), Some(3723));
        assert_eq!(parse_duration("12:34"), Some(754));
        assert_eq!(parse_duration("45"), Some(45));
        assert_eq!(parse_duration("0:59"), Some(59));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("12:xx"), None);
    }

    #[test]
    fn test_parse_duration_rejects_overflowing_values() {
        // Hour counts large enough to overflow u64 seconds must be
        // rejected, not wrapped into a small accepted duration.
        assert_eq!(parse_duration("9000000000000000000:00:00"), None);
        assert_eq!(parse_duration(&format!("{}:00", u64::MAX)), None);
        assert_eq!(parse_duration(&format!("{}", u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn test_selection_skips_overflowing_duration() {
        let videos = vec![
            candidate("bogus", "9000000000000000000:00:00"),
            candidate("short", "15:00"),
        ];
        let selected = select_videos(videos, 3600);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "short");
    }

    #[test]
    fn test_selection_respects_target() {
        let videos = vec![
            candidate("a", "20:00"),  // 1200
            candidate("b", "30:00"),  // 1800
            candidate("c", "25:00"),  // 1500, would overflow 3600 -> skipped
            candidate("d", "10:00"),  // 600, fits
        ];
        let selected = select_videos(videos, 3600);
        let titles: Vec<_> = selected.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "d"]);

        let total: u64 = selected.iter().map(|v| v.duration_secs().unwrap()).sum();
        assert!(total <= 3600);
    }

    #[test]
    fn test_selection_skips_oversized_single_video() {
        let videos = vec![
            candidate("feature-film", "2:00:00"), // longer than target
            candidate("short", "15:00"),
        ];
        let selected = select_videos(videos, 3600);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "short");
    }

    #[test]
    fn test_selection_stops_once_target_reached() {
        let videos = vec![
            candidate("a", "1:00:00"), // exactly the target
            candidate("b", "5:00"),
        ];
        let selected = select_videos(videos, 3600);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "a");
    }

    #[test]
    fn test_selection_preserves_relevance_order() {
        let videos = vec![
            candidate("first", "5:00"),
            candidate("second", "5:00"),
            candidate("third", "5:00"),
        ];
        let selected = select_videos(videos, 3600);
        let titles: Vec<_> = selected.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_selection_may_be_empty() {
        let videos = vec![candidate("long", "3:00:00")];
        assert!(select_videos(videos, 3600).is_empty());
        assert!(select_videos(Vec::new(), 3600).is_empty());
    }
}
