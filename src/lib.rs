//! baeum - Self-study learning unit planner
//!
//! Plans and generates a sequence of learning units for a topic, sized to
//! a learner's knowledge level, daily time budget and program duration,
//! then assembles each unit from acquired web content (text or video)
//! with feedback-driven style adaptation.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`scheduler`] - Table-driven unit-count sizing
//! - [`search`] - Page and video search collaborators
//! - [`extract`] - Article plaintext extraction
//! - [`cache`] - Content-addressed cache for structured text
//! - [`llm`] - LLM structuring of raw content into sections
//! - [`segment`] - Lightweight sentence-based segmentation
//! - [`generator`] - Unit assembly pipeline
//! - [`metrics`] - Prometheus counters for pipeline fallbacks
//!
//! # Example
//!
//! ```no_run
//! use baeum::config::Config;
//! use baeum::generator::UnitGenerator;
//! use baeum::models::{
//!     DailyCapacity, FeedbackAction, KnowledgeLevel, Medium, Plan, PlanDuration,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let generator = UnitGenerator::from_config(&config).await?;
//!
//!     let plan = Plan::new(
//!         "AI ethics",
//!         KnowledgeLevel::Basic,
//!         DailyCapacity::OneToTwoHours,
//!         PlanDuration::OneWeek,
//!         Medium::Text,
//!     );
//!     let units = generator.generate(&plan, FeedbackAction::Great).await;
//!     assert_eq!(units.len(), 7);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod llm;
pub mod metrics;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod segment;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{BlobCache, Fingerprint, OptionalCache};
    pub use crate::config::Config;
    pub use crate::error::{BaeumErrorTrait, Error, ErrorCategory, Result};
    pub use crate::generator::UnitGenerator;
    pub use crate::models::{
        DailyCapacity, FeedbackAction, KnowledgeLevel, Medium, Plan, PlanDuration, Unit,
    };
}

// Direct re-exports for convenience
pub use models::{FeedbackAction, Plan, Unit};
