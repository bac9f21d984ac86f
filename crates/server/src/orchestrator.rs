//! # Recommendation Orchestrator
//!
//! This module coordinates a recommendation request end to end:
//! 1. Check the session is ready (services selected, enough ratings)
//! 2. Build the taste profile and source candidates in parallel
//! 3. Drop titles the user dismissed
//! 4. Score, explain and rank on a blocking thread
//! 5. Return the top N matches
//!
//! Scoring is CPU-bound, so every heavy step runs under
//! `tokio::task::spawn_blocking` and the async side only coordinates.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{info, warn};

use catalog::{Title, TitleIndex};
use pipeline::{MatchResult, PreferenceConfig, Ranker};
use sources::{build_profile, CatalogSource, UserPreferences};

use crate::session::SessionState;

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    title_index: Arc<TitleIndex>,
    source: CatalogSource,
    ranker: Ranker,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a loaded catalog and preference table
    pub fn new(title_index: Arc<TitleIndex>, config: Arc<PreferenceConfig>) -> Self {
        let source = CatalogSource::new(title_index.clone());
        let ranker = Ranker::new(config);
        Self {
            title_index,
            source,
            ranker,
        }
    }

    /// Replace the candidate source (e.g. with different pool limits)
    pub fn with_source(mut self, source: CatalogSource) -> Self {
        self.source = source;
        self
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn title_index(&self) -> &TitleIndex {
        &self.title_index
    }

    /// Main entry point: recommendations for a wizard session
    ///
    /// # Arguments
    /// * `session` - The user's services, ratings and filters
    /// * `limit` - Number of matches to return
    ///
    /// # Returns
    /// Matches sorted by score (highest first), dismissed titles excluded
    pub async fn get_recommendations(
        &self,
        session: &SessionState,
        limit: usize,
    ) -> Result<Vec<MatchResult>> {
        let start_time = Instant::now();

        session
            .ensure_ready()
            .context("Session is not ready for recommendations")?;

        let (profile, candidates) = self.prepare(session).await?;
        info!(
            "Built profile from {} ratings and sourced {} candidates",
            session.rating_count(),
            candidates.len()
        );

        let candidates = self.remove_dismissed(candidates, session);

        let mut matches = self.rank(candidates, profile, session).await?;
        matches.truncate(limit);
        info!("Selected top {} matches", matches.len());

        if matches.first().is_some_and(|m| m.match_score == 0) {
            warn!("No candidate passed the selected filters");
        }

        info!(
            "Total time to get recommendations: {:.2?}",
            start_time.elapsed()
        );
        Ok(matches)
    }

    /// Build the taste profile and the candidate pool in parallel
    async fn prepare(&self, session: &SessionState) -> Result<(UserPreferences, Vec<Title>)> {
        let (profile_result, candidates_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let ratings = session.ratings.clone();
                move || build_profile(&ratings)
            }),
            tokio::task::spawn_blocking({
                let source = self.source.clone();
                let seeds = session.seed_ids();
                let filters = session.filters.clone();
                let services = session.services.clone();
                move || source.get_candidates(&seeds, &filters, &services)
            })
        );

        let profile = profile_result.context("Profile task panicked")?;
        let candidates = candidates_result.context("Candidate task panicked")?;
        Ok((profile, candidates))
    }

    fn remove_dismissed(&self, candidates: Vec<Title>, session: &SessionState) -> Vec<Title> {
        if session.dismissed.is_empty() {
            return candidates;
        }

        let before = candidates.len();
        let kept: Vec<Title> = candidates
            .into_iter()
            .filter(|title| !session.is_dismissed(&title.id))
            .collect();
        info!("Removed {} dismissed titles", before - kept.len());
        kept
    }

    /// Score and sort on a blocking thread
    async fn rank(
        &self,
        candidates: Vec<Title>,
        profile: UserPreferences,
        session: &SessionState,
    ) -> Result<Vec<MatchResult>> {
        let ranker = self.ranker.clone();
        let filters = session.filters.clone();

        tokio::task::spawn_blocking(move || ranker.rank(candidates, &profile, &filters))
            .await
            .context("Ranking task panicked")
    }

    /// The taste profile a session currently implies
    pub fn profile(&self, session: &SessionState) -> UserPreferences {
        build_profile(&session.ratings)
    }

    /// A shuffled set of titles to rate during calibration
    pub fn calibration_titles(&self, count: usize) -> Vec<Title> {
        self.calibration_titles_with(count, &mut rand::rng())
    }

    /// Calibration titles drawn with a caller-supplied RNG
    pub fn calibration_titles_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Title> {
        self.source.calibration_titles(count, rng)
    }

    /// Catalog titles whose name contains `query` (case-insensitive)
    pub fn search(&self, query: &str, limit: usize) -> Vec<Title> {
        self.title_index
            .search(query)
            .into_iter()
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Filters;
    use std::collections::HashSet;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_title_index() -> Arc<TitleIndex> {
        let titles = vec![
            Title::new("tt1", "Paddington 2")
                .with_genres(&["Comedy", "Family", "Adventure"])
                .with_rating(7.8)
                .with_runtime(103)
                .with_actors(&["Ben Whishaw", "Hugh Grant"])
                .with_directors(&["Paul King"]),
            Title::new("tt2", "Heat")
                .with_genres(&["Crime", "Drama", "Thriller"])
                .with_rating(8.3)
                .with_runtime(170)
                .with_actors(&["Al Pacino", "Robert De Niro"])
                .with_directors(&["Michael Mann"]),
            Title::new("tt3", "Groundhog Day")
                .with_genres(&["Comedy", "Romance"])
                .with_rating(8.0)
                .with_runtime(101)
                .with_actors(&["Bill Murray", "Andie MacDowell"])
                .with_directors(&["Harold Ramis"]),
            Title::new("tt4", "Hereditary")
                .with_genres(&["Horror", "Drama"])
                .with_rating(7.3)
                .with_runtime(127),
            Title::new("tt5", "Toy Story")
                .with_genres(&["Animation", "Comedy", "Family"])
                .with_rating(8.3)
                .with_runtime(81),
            Title::new("tt6", "Wonka")
                .with_genres(&["Comedy", "Family"])
                .with_rating(7.0)
                .with_runtime(116)
                .with_actors(&["Timothee Chalamet", "Hugh Grant"]),
        ];
        Arc::new(TitleIndex::from_titles(titles, Vec::new()).unwrap())
    }

    fn build_test_orchestrator() -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(build_test_title_index(), Arc::new(PreferenceConfig::default()))
    }

    fn ready_session(orchestrator: &RecommendationOrchestrator, filters: Filters) -> SessionState {
        let index = orchestrator.title_index();
        let mut session = SessionState::new()
            .with_services(&["Netflix"])
            .with_filters(filters);
        session.rate(index.get_title("tt1").unwrap().clone(), 5).unwrap();
        session.rate(index.get_title("tt3").unwrap().clone(), 4).unwrap();
        session.rate(index.get_title("tt4").unwrap().clone(), 0).unwrap();
        session
    }

    // ============================================================================
    // get_recommendations
    // ============================================================================

    #[tokio::test]
    async fn test_recommendations_sorted_and_limited() {
        let orchestrator = build_test_orchestrator();
        let session = ready_session(&orchestrator, Filters::new());

        let matches = orchestrator.get_recommendations(&session, 3).await.unwrap();
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        assert!(matches.iter().all(|m| m.title.streaming_services == vec!["Netflix"]));
    }

    #[tokio::test]
    async fn test_mood_filter_rejects_non_matching_titles() {
        let orchestrator = build_test_orchestrator();
        let session = ready_session(&orchestrator, Filters::new().with_moods(&["Cozy"]));

        let matches = orchestrator.get_recommendations(&session, 10).await.unwrap();
        assert!(!matches.is_empty());
        for m in &matches {
            let cozy = m.title.shares_genre_with(&["Comedy".to_string(), "Romance".to_string(), "Family".to_string()]);
            assert_eq!(cozy, m.match_score > 0, "{}", m.title.title);
        }
    }

    #[tokio::test]
    async fn test_dismissed_titles_are_hidden() {
        let orchestrator = build_test_orchestrator();
        let mut session = ready_session(&orchestrator, Filters::new());

        let matches = orchestrator.get_recommendations(&session, 10).await.unwrap();
        let top = matches[0].title.id.clone();

        session.dismiss(top.clone());
        let matches = orchestrator.get_recommendations(&session, 10).await.unwrap();
        assert!(matches.iter().all(|m| m.title.id != top));
    }

    #[tokio::test]
    async fn test_session_not_ready() {
        let orchestrator = build_test_orchestrator();

        let mut session = SessionState::new().with_services(&["Netflix"]);
        session.rate(Title::new("tt1", "Paddington 2"), 5).unwrap();

        let err = orchestrator.get_recommendations(&session, 10).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Rate at least 3 titles"));
    }

    #[tokio::test]
    async fn test_recommendations_are_deterministic() {
        let orchestrator = build_test_orchestrator();
        let session = ready_session(&orchestrator, Filters::new().with_extras(&["Award-winning"]));

        let first = orchestrator.get_recommendations(&session, 10).await.unwrap();
        let second = orchestrator.get_recommendations(&session, 10).await.unwrap();
        assert_eq!(first, second);
    }

    // ============================================================================
    // Calibration, search and profile
    // ============================================================================

    #[test]
    fn test_calibration_titles_are_unique() {
        let orchestrator = build_test_orchestrator();

        let picks = orchestrator.calibration_titles(4);
        assert_eq!(picks.len(), 4);
        let ids: HashSet<&str> = picks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_seeded_calibration_is_reproducible() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let orchestrator = build_test_orchestrator();
        let first = orchestrator.calibration_titles_with(3, &mut StdRng::seed_from_u64(7));
        let second = orchestrator.calibration_titles_with(3, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_search() {
        let orchestrator = build_test_orchestrator();

        let results = orchestrator.search("HEAT", 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Heat");
        assert!(orchestrator.search("zzz", 5).is_empty());
    }

    #[test]
    fn test_profile_ignores_never_seen() {
        let orchestrator = build_test_orchestrator();
        let session = ready_session(&orchestrator, Filters::new());

        let profile = orchestrator.profile(&session);
        assert_eq!(profile.genre_affinity("Horror"), 0.0);
        assert_eq!(profile.talent_affinity("Paul King"), 1.0);
        assert!((profile.avg_rating - 4.5).abs() < 1e-9);
    }
}
