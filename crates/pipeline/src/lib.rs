//! Preference scoring for movie recommendations.
//!
//! This crate provides:
//! - `PreferenceConfig`: what each mood, tone, runtime and extra option means
//! - `AlignmentAxis` trait and the four standard axes
//! - `AlignmentPipeline` for composing axes into a mood-alignment value
//! - Scoring functions (similarity, normalized rating, composite score)
//! - `Ranker` for scoring, explaining and sorting candidates
//!
//! ## Architecture
//! Every candidate goes through three signals:
//! 1. Similarity between the taste profile and the title (25%)
//! 2. Mood alignment with the selected filters (55%), where any mandatory
//!    axis may reject the title outright
//! 3. The title's external rating (20%)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{PreferenceConfig, Ranker};
//! use sources::build_profile;
//! use std::sync::Arc;
//!
//! let ranker = Ranker::new(Arc::new(PreferenceConfig::default()));
//! let profile = build_profile(&rated_titles);
//!
//! let results = ranker.rank(candidates, &profile, &filters);
//! for result in results.iter().take(10) {
//!     println!("{} {}%: {}", result.title.title, result.match_score, result.match_reason);
//! }
//! ```

pub mod alignment_pipeline;
pub mod config;
pub mod error;
pub mod filters;
pub mod ranker;
pub mod reason;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use alignment_pipeline::{Alignment, AlignmentPipeline};
pub use config::{OptionItem, PreferenceConfig, PreferenceWeight, RuntimeConstraint, WizardOptions};
pub use error::{ConfigError, Result};
pub use ranker::{MatchResult, Ranker};
pub use traits::{AlignmentAxis, AxisOutcome};
