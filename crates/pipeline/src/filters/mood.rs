//! Mood axis: a mandatory genre match plus weighted points per mood.

use super::{any_genre_match, selected_entries};
use crate::config::PreferenceConfig;
use crate::traits::{AlignmentAxis, AxisOutcome};
use catalog::{Filters, Title};

/// Points per selected mood, before the mood's weight
pub const MOOD_POINTS: f64 = 25.0;

/// Bonus when the title's rating reaches the mood's minimum
pub const MOOD_RATING_BONUS: f64 = 5.0;

/// Rejects titles that match none of the selected moods.
///
/// ## Algorithm
/// 1. At least one selected mood with configured genres must share a
///    genre with the title, otherwise reject
/// 2. Each configured selected mood adds `25 * weight`
/// 3. Each of those also adds 5 when the title's rating meets the mood's
///    minimum
pub struct MoodAxis;

impl AlignmentAxis for MoodAxis {
    fn name(&self) -> &str {
        "MoodAxis"
    }

    fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> AxisOutcome {
        if filters.moods.is_empty() {
            return AxisOutcome::Inactive;
        }

        if !any_genre_match(&config.moods, &filters.moods, title) {
            return AxisOutcome::Reject;
        }

        let score = selected_entries(&config.moods, &filters.moods)
            .map(|mood| {
                let bonus = if mood.meets_rating(title) { MOOD_RATING_BONUS } else { 0.0 };
                MOOD_POINTS * mood.effective_weight() + bonus
            })
            .sum();

        AxisOutcome::Score(score)
    }
}
