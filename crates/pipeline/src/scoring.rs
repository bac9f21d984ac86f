//! Scoring functions: similarity, mood alignment and the composite score.
//!
//! ## Composite
//! `score = 0.25 * similarity * 100 + 0.55 * alignment + 0.20 * rating * 100`
//! rounded and clamped to [0, 100]. A rejected alignment short-circuits the
//! whole score to 0, so similarity and rating never rescue a title that
//! fails a mandatory filter.

use crate::alignment_pipeline::{Alignment, AlignmentPipeline};
use crate::config::PreferenceConfig;
use catalog::{Filters, Title};
use sources::UserPreferences;
use std::sync::LazyLock;

/// Cap on the genre term (also its nominal maximum)
pub const GENRE_CAP: f64 = 40.0;
pub const GENRE_SCALE: f64 = 10.0;

/// Scale of the runtime term; the term itself is not capped
pub const RUNTIME_SCALE: f64 = 20.0;

/// Cap on the talent term
pub const TALENT_CAP: f64 = 20.0;
pub const TALENT_SCALE: f64 = 20.0;
/// Talent affinity is averaged over this many slots
pub const TALENT_DIVISOR: f64 = 4.0;

/// Divisor turning the summed terms into a 0-1 ratio
pub const SIMILARITY_SCALE: f64 = 60.0;

pub const SIMILARITY_WEIGHT: f64 = 0.25;
pub const ALIGNMENT_WEIGHT: f64 = 0.55;
pub const RATING_WEIGHT: f64 = 0.20;

/// Normalized rating used when a title has no external rating
pub const NEUTRAL_RATING: f64 = 0.5;

static STANDARD_PIPELINE: LazyLock<AlignmentPipeline> = LazyLock::new(AlignmentPipeline::standard);

/// Profile-to-title similarity in [0, 1]
///
/// - Genre term: `min(10 * Σ genre affinity, 40)`
/// - Runtime term: `20 * affinity of the title's runtime bucket`, 0 when
///   the runtime is unknown
/// - Talent term: `min(20 * Σ talent affinity / 4, 20)` over the three
///   lead actors and every director
pub fn similarity(profile: &UserPreferences, title: &Title) -> f64 {
    let genre_sum: f64 = title
        .genres
        .iter()
        .map(|genre| profile.genre_affinity(genre))
        .sum();
    let genre = (genre_sum * GENRE_SCALE).min(GENRE_CAP);

    let runtime = title
        .runtime_bucket()
        .map_or(0.0, |bucket| profile.runtimes.get(bucket) * RUNTIME_SCALE);

    let talent_sum: f64 = title
        .talent()
        .map(|person| profile.talent_affinity(person))
        .sum();
    let talent = (talent_sum / TALENT_DIVISOR * TALENT_SCALE).min(TALENT_CAP);

    ((genre + runtime + talent) / SIMILARITY_SCALE).clamp(0.0, 1.0)
}

/// External rating mapped to [0, 1]; unknown ratings are neutral
pub fn normalized_rating(title: &Title) -> f64 {
    title
        .known_rating()
        .map_or(NEUTRAL_RATING, |rating| (rating / 10.0).clamp(0.0, 1.0))
}

/// Mood alignment with the standard axes (mood, tone, runtime, extras)
pub fn mood_alignment(title: &Title, filters: &Filters, config: &PreferenceConfig) -> Alignment {
    STANDARD_PIPELINE.evaluate(title, filters, config)
}

/// Combine the three signals into an integer score in [0, 100]
pub fn composite_score(similarity: f64, alignment: Alignment, normalized_rating: f64) -> u8 {
    let Alignment::Score(alignment) = alignment else {
        return 0;
    };

    let score = SIMILARITY_WEIGHT * similarity * 100.0
        + ALIGNMENT_WEIGHT * alignment
        + RATING_WEIGHT * normalized_rating * 100.0;

    // NaN saturates to 0 in the cast
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::RatedTitle;
    use sources::build_profile;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_similarity_terms() {
        let rated = vec![RatedTitle::new(
            Title::new("seed", "Seed")
                .with_genres(&["Comedy"])
                .with_runtime(95)
                .with_actors(&["Lead"])
                .with_directors(&["Director"]),
            5,
        )];
        let profile = build_profile(&rated);

        // genre 10, runtime 20, talent 20 * 2 / 4 = 10
        let candidate = Title::new("c", "C")
            .with_genres(&["Comedy", "Romance"])
            .with_runtime(80)
            .with_actors(&["Lead"])
            .with_directors(&["Director"]);
        assert!(approx(similarity(&profile, &candidate), 40.0 / 60.0));

        // Medium runtime has no affinity
        let candidate = Title::new("d", "D").with_genres(&["Comedy"]).with_runtime(120);
        assert!(approx(similarity(&profile, &candidate), 10.0 / 60.0));
    }

    #[test]
    fn test_similarity_is_clamped() {
        let mut profile = UserPreferences::new();
        profile.genres.insert("Drama".to_string(), 9.0);
        profile.runtimes.long = 4.0;
        profile.talents.insert("Star".to_string(), 9.0);

        let title = Title::new("t", "T")
            .with_genres(&["Drama"])
            .with_runtime(180)
            .with_actors(&["Star"]);
        assert_eq!(similarity(&profile, &title), 1.0);
    }

    #[test]
    fn test_similarity_of_bare_title_is_zero() {
        let profile = UserPreferences::new();
        assert_eq!(similarity(&profile, &Title::new("t", "T")), 0.0);
    }

    #[test]
    fn test_normalized_rating() {
        assert!(approx(normalized_rating(&Title::new("a", "A").with_rating(7.2)), 0.72));
        assert_eq!(normalized_rating(&Title::new("b", "B")), NEUTRAL_RATING);
        assert_eq!(normalized_rating(&Title::new("c", "C").with_rating(0.0)), NEUTRAL_RATING);
        assert_eq!(normalized_rating(&Title::new("d", "D").with_rating(10.0)), 1.0);
    }

    #[test]
    fn test_composite_score() {
        // 0.25 * 100 + 0.55 * 100 + 0.2 * 100
        assert_eq!(composite_score(1.0, Alignment::Score(100.0), 1.0), 100);
        // Only the neutral rating contributes
        assert_eq!(composite_score(0.0, Alignment::Score(0.0), NEUTRAL_RATING), 10);
        assert_eq!(composite_score(1.0, Alignment::Rejected, 1.0), 0);
        assert_eq!(composite_score(f64::NAN, Alignment::Score(0.0), 0.0), 0);
    }

    #[test]
    fn test_mood_alignment_uses_standard_axes() {
        let config = PreferenceConfig::default();
        let horror = Title::new("h", "Scary").with_genres(&["Horror"]);

        let alignment = mood_alignment(&horror, &Filters::new().with_moods(&["Cozy"]), &config);
        assert!(alignment.is_rejected());

        let alignment = mood_alignment(&horror, &Filters::new(), &config);
        assert_eq!(alignment, Alignment::Score(0.0));
    }
}
