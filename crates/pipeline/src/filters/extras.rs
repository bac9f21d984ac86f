//! Extras axis: purely additive rating-based bonuses.

use super::selected_entries;
use crate::config::PreferenceConfig;
use crate::traits::{AlignmentAxis, AxisOutcome};
use catalog::{Filters, Title};

/// Points per qualifying extra, before the extra's weight
pub const EXTRA_POINTS: f64 = 10.0;

/// Adds `10 * weight` for every selected extra whose rating minimum the
/// title meets. Never rejects.
pub struct ExtrasAxis;

impl AlignmentAxis for ExtrasAxis {
    fn name(&self) -> &str {
        "ExtrasAxis"
    }

    fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> AxisOutcome {
        if filters.extras.is_empty() {
            return AxisOutcome::Inactive;
        }

        let score = selected_entries(&config.extras, &filters.extras)
            .filter(|extra| extra.meets_rating(title))
            .map(|extra| EXTRA_POINTS * extra.effective_weight())
            .sum();

        AxisOutcome::Score(score)
    }
}
