//! Ranking: score and explain every candidate, best first.

use crate::alignment_pipeline::{Alignment, AlignmentPipeline};
use crate::config::PreferenceConfig;
use crate::reason;
use crate::scoring::{composite_score, normalized_rating, similarity};
use catalog::{Filters, Title};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sources::UserPreferences;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A scored, explained candidate ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub title: Title,
    /// 0-100
    pub match_score: u8,
    pub match_reason: String,
}

/// Scores candidates against a taste profile and the selected filters.
///
/// Cheap to clone; the option table and axis pipeline are shared.
#[derive(Clone)]
pub struct Ranker {
    config: Arc<PreferenceConfig>,
    pipeline: Arc<AlignmentPipeline>,
}

impl Ranker {
    /// Create a ranker with the standard alignment axes
    pub fn new(config: Arc<PreferenceConfig>) -> Self {
        Self {
            config,
            pipeline: Arc::new(AlignmentPipeline::standard()),
        }
    }

    /// Replace the alignment axes
    pub fn with_pipeline(mut self, pipeline: AlignmentPipeline) -> Self {
        self.pipeline = Arc::new(pipeline);
        self
    }

    pub fn config(&self) -> &PreferenceConfig {
        &self.config
    }

    pub fn alignment(&self, title: &Title, filters: &Filters) -> Alignment {
        self.pipeline.evaluate(title, filters, &self.config)
    }

    /// Match score in [0, 100]; 0 for titles failing a mandatory filter
    pub fn score(&self, title: &Title, profile: &UserPreferences, filters: &Filters) -> u8 {
        let alignment = self.alignment(title, filters);
        if alignment.is_rejected() {
            return 0;
        }
        composite_score(similarity(profile, title), alignment, normalized_rating(title))
    }

    pub fn explain(
        &self,
        title: &Title,
        profile: &UserPreferences,
        filters: &Filters,
        score: u8,
    ) -> String {
        reason::explain(title, profile, filters, &self.config, score)
    }

    /// Score and explain every title, then sort by score descending.
    ///
    /// Scoring runs in parallel; equal scores keep their input order.
    #[instrument(skip_all, fields(candidates = titles.len()))]
    pub fn rank(
        &self,
        titles: Vec<Title>,
        profile: &UserPreferences,
        filters: &Filters,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = titles
            .into_par_iter()
            .map(|title| {
                let match_score = self.score(&title, profile, filters);
                let match_reason = self.explain(&title, profile, filters, match_score);
                MatchResult {
                    title,
                    match_score,
                    match_reason,
                }
            })
            .collect();

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        debug!(
            "Ranked {} titles ({} rejected)",
            results.len(),
            results.iter().filter(|r| r.match_score == 0).count()
        );
        results
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Arc::new(PreferenceConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{AlignmentAxis, AxisOutcome};

    #[test]
    fn test_rank_empty() {
        let ranker = Ranker::default();
        assert!(ranker.rank(Vec::new(), &UserPreferences::new(), &Filters::new()).is_empty());
    }

    #[test]
    fn test_rank_is_sorted_and_stable() {
        let ranker = Ranker::default();
        let titles = vec![
            Title::new("low", "Low").with_rating(2.0),
            Title::new("tie1", "Tie 1").with_rating(7.0),
            Title::new("high", "High").with_rating(9.5),
            Title::new("tie2", "Tie 2").with_rating(7.0),
        ];

        let results = ranker.rank(titles, &UserPreferences::new(), &Filters::new());
        let ids: Vec<&str> = results.iter().map(|r| r.title.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "tie1", "tie2", "low"]);
        assert_eq!(results[0].match_score, 19);
    }

    #[test]
    fn test_custom_pipeline() {
        struct RejectAll;

        impl AlignmentAxis for RejectAll {
            fn name(&self) -> &str {
                "RejectAll"
            }

            fn evaluate(&self, _: &Title, _: &Filters, _: &PreferenceConfig) -> AxisOutcome {
                AxisOutcome::Reject
            }
        }

        let ranker = Ranker::default().with_pipeline(AlignmentPipeline::new().add_axis(RejectAll));
        let title = Title::new("a", "A").with_rating(9.9);
        assert_eq!(ranker.score(&title, &UserPreferences::new(), &Filters::new()), 0);
    }

    #[test]
    fn test_match_result_json_is_flat() {
        let result = MatchResult {
            title: Title::new("tt1", "Flat").with_rating(7.0),
            match_score: 42,
            match_reason: "Good match based on your preferences.".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["id"], "tt1");
        assert_eq!(json["matchScore"], 42);
        assert_eq!(json["matchReason"], "Good match based on your preferences.");
    }
}
