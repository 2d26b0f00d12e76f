// Core data structures for the baeum learning planner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing a plan enum from an unknown token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct PlanParseError {
    /// Which field failed to parse
    pub field: &'static str,
    /// The offending input
    pub value: String,
}

impl PlanParseError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Learner's declared prior knowledge of the topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeLevel {
    Basic,
    Broader,
    Profound,
}

impl KnowledgeLevel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Broader => "broader",
            Self::Profound => "profound",
        }
    }

    /// Get all levels
    pub fn all() -> Vec<Self> {
        vec![Self::Basic, Self::Broader, Self::Profound]
    }
}

impl FromStr for KnowledgeLevel {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "broader" => Ok(Self::Broader),
            "profound" => Ok(Self::Profound),
            _ => Err(PlanParseError::new("knowledge level", s)),
        }
    }
}

impl fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hours per day the learner can commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DailyCapacity {
    /// "1-2 hours" per day
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(rename = "full-time")]
    FullTime,
}

impl DailyCapacity {
    /// Get string representation (matches the wizard's form values)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToTwoHours => "1-2 hours",
            Self::PartTime => "part-time",
            Self::FullTime => "full-time",
        }
    }

    /// Get all capacities
    pub fn all() -> Vec<Self> {
        vec![Self::OneToTwoHours, Self::PartTime, Self::FullTime]
    }
}

impl FromStr for DailyCapacity {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1-2 hours" | "1-2hours" => Ok(Self::OneToTwoHours),
            "part-time" | "parttime" => Ok(Self::PartTime),
            "full-time" | "fulltime" => Ok(Self::FullTime),
            _ => Err(PlanParseError::new("daily capacity", s)),
        }
    }
}

impl fmt::Display for DailyCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Total program duration chosen by the learner
///
/// Only the calendar durations (one week / one month / three months) are
/// present in the scheduling table; the relative durations are accepted
/// input and resolve through the scheduler's default fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanDuration {
    #[serde(rename = "one-week")]
    OneWeek,
    #[serde(rename = "one-month")]
    OneMonth,
    #[serde(rename = "three-months")]
    ThreeMonths,
    #[serde(rename = "short-term")]
    ShortTerm,
    #[serde(rename = "medium-term")]
    MediumTerm,
    #[serde(rename = "long-term")]
    LongTerm,
}

impl PlanDuration {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneWeek => "one-week",
            Self::OneMonth => "one-month",
            Self::ThreeMonths => "three-months",
            Self::ShortTerm => "short-term",
            Self::MediumTerm => "medium-term",
            Self::LongTerm => "long-term",
        }
    }

    /// Get all durations
    pub fn all() -> Vec<Self> {
        vec![
            Self::OneWeek,
            Self::OneMonth,
            Self::ThreeMonths,
            Self::ShortTerm,
            Self::MediumTerm,
            Self::LongTerm,
        ]
    }
}

impl FromStr for PlanDuration {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-week" => Ok(Self::OneWeek),
            "one-month" => Ok(Self::OneMonth),
            "three-months" => Ok(Self::ThreeMonths),
            "short-term" => Ok(Self::ShortTerm),
            "medium-term" => Ok(Self::MediumTerm),
            "long-term" => Ok(Self::LongTerm),
            _ => Err(PlanParseError::new("duration", s)),
        }
    }
}

impl fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content medium the learner prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Text,
    Video,
}

impl Medium {
    /// Get string representation (used in cache fingerprints)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
        }
    }
}

impl FromStr for Medium {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            // The wizard historically submitted "videos"
            "video" | "videos" => Ok(Self::Video),
            _ => Err(PlanParseError::new("medium", s)),
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Learner's post-unit signal steering the style of subsequent generation
///
/// `Refine` is a control signal ("restart topic selection") handled by the
/// presentation layer; only `Great`, `Harder` and `Easier` shape content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    #[default]
    Great,
    Harder,
    Easier,
    Refine,
}

impl FeedbackAction {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Harder => "harder",
            Self::Easier => "easier",
            Self::Refine => "refine",
        }
    }

    /// Whether this action shapes content generation (as opposed to being
    /// an upstream control signal)
    pub fn is_shaping(&self) -> bool {
        !matches!(self, Self::Refine)
    }
}

impl FromStr for FeedbackAction {
    type Err = PlanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "great" => Ok(Self::Great),
            "harder" => Ok(Self::Harder),
            "easier" => Ok(Self::Easier),
            "refine" => Ok(Self::Refine),
            _ => Err(PlanParseError::new("feedback action", s)),
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed tuple of learner choices driving generation
///
/// Immutable once the wizard session fixes it; the pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Free-text learning topic
    pub topic: String,

    /// Declared prior knowledge
    pub level: KnowledgeLevel,

    /// Daily time budget
    pub capacity: DailyCapacity,

    /// Program duration
    pub duration: PlanDuration,

    /// Preferred content medium
    pub medium: Medium,
}

impl Plan {
    /// Create a new plan
    pub fn new(
        topic: impl Into<String>,
        level: KnowledgeLevel,
        capacity: DailyCapacity,
        duration: PlanDuration,
        medium: Medium,
    ) -> Self {
        Self {
            topic: topic.into(),
            level,
            capacity,
            duration,
            medium,
        }
    }
}

/// One scheduled block of learning content
///
/// Units are numbered 1..=N contiguously for a given plan and are never
/// mutated after creation; feedback triggers regeneration of a fresh list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// 1-based unit index
    pub unit_number: u32,

    /// Unit title (the plan topic in the primary path)
    pub title: String,

    /// Navigable content sections, never empty (placeholder substituted)
    pub sections: Vec<String>,
}

impl Unit {
    /// Create a unit
    pub fn new(unit_number: u32, title: impl Into<String>, sections: Vec<String>) -> Self {
        debug_assert!(unit_number >= 1, "unit numbers are 1-based");
        debug_assert!(!sections.is_empty(), "sections must carry a placeholder");
        Self {
            unit_number,
            title: title.into(),
            sections,
        }
    }
}
