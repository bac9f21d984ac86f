//! Tone axis: a mandatory genre match plus weighted points per tone.

use super::{any_genre_match, selected_entries};
use crate::config::PreferenceConfig;
use crate::traits::{AlignmentAxis, AxisOutcome};
use catalog::{Filters, Title};

/// Points per selected tone, before the tone's weight
pub const TONE_POINTS: f64 = 15.0;

/// Rejects titles that match none of the selected tones; otherwise adds
/// `15 * weight` for every configured selected tone.
pub struct ToneAxis;

impl AlignmentAxis for ToneAxis {
    fn name(&self) -> &str {
        "ToneAxis"
    }

    fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> AxisOutcome {
        if filters.tones.is_empty() {
            return AxisOutcome::Inactive;
        }

        if !any_genre_match(&config.tones, &filters.tones, title) {
            return AxisOutcome::Reject;
        }

        let score = selected_entries(&config.tones, &filters.tones)
            .map(|tone| TONE_POINTS * tone.effective_weight())
            .sum();

        AxisOutcome::Score(score)
    }
}
