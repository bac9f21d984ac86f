//! Human-readable match explanations.

use crate::config::PreferenceConfig;
use catalog::{Filters, Title};
use sources::UserPreferences;

/// Genre affinity above which a genre is called out
pub const LOVED_GENRE_THRESHOLD: f64 = 0.5;

/// Talent affinity above which a person is called out
pub const KNOWN_TALENT_THRESHOLD: f64 = 0.3;

/// External rating at which a title counts as highly rated
pub const HIGH_RATING: f64 = 8.0;

/// Runtime framing thresholds, independent of the profile buckets
pub const QUICK_WATCH_MINUTES: u32 = 90;
pub const EPIC_MINUTES: u32 = 150;

const MAX_CLAUSES: usize = 3;
const FALLBACK: &str = "Good match based on your preferences";

/// Explain why a title was recommended.
///
/// Clauses are considered in priority order and the first three kept:
/// 1. Up to two of the title's genres the user loves
/// 2. The first selected mood whose genres the title shares
/// 3. Runtime framing, only while a runtime filter is active
/// 4. A high external rating
/// 5. The first lead (of two) or director the user likes
///
/// The score does not influence the text.
pub fn explain(
    title: &Title,
    profile: &UserPreferences,
    filters: &Filters,
    config: &PreferenceConfig,
    _score: u8,
) -> String {
    let mut reasons: Vec<String> = Vec::new();

    let loved: Vec<&str> = title
        .genres
        .iter()
        .filter(|genre| profile.genre_affinity(genre) > LOVED_GENRE_THRESHOLD)
        .take(2)
        .map(String::as_str)
        .collect();
    if !loved.is_empty() {
        reasons.push(format!("Matches your love for {}", loved.join(" and ")));
    }

    let matched_mood = filters.moods.iter().find(|mood| {
        config
            .mood(mood)
            .is_some_and(|entry| entry.matches_genres(title))
    });
    if let Some(mood) = matched_mood {
        reasons.push(format!("Perfect for a {} mood", mood.to_lowercase()));
    }

    if !filters.runtimes.is_empty() {
        match title.known_runtime() {
            Some(minutes) if minutes < QUICK_WATCH_MINUTES => {
                reasons.push(format!("Quick watch under {} minutes", QUICK_WATCH_MINUTES));
            }
            Some(minutes) if minutes > EPIC_MINUTES => {
                reasons.push("Epic runtime for deep immersion".to_string());
            }
            _ => {}
        }
    }

    if let Some(rating) = title.known_rating().filter(|r| *r >= HIGH_RATING) {
        reasons.push(format!("Highly rated ({}/10 on IMDb)", rating));
    }

    let known_talent = title
        .actors
        .iter()
        .take(2)
        .chain(title.directors.iter())
        .find(|person| profile.talent_affinity(person) > KNOWN_TALENT_THRESHOLD);
    if let Some(person) = known_talent {
        reasons.push(format!("Features {}", person));
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK.to_string());
    }

    reasons.truncate(MAX_CLAUSES);
    format!("{}.", reasons.join(". "))
}
