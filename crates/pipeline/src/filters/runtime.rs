//! Runtime axis: the title must fit at least one selected runtime option.

use crate::config::PreferenceConfig;
use crate::traits::{AlignmentAxis, AxisOutcome};
use catalog::{Filters, Title};

/// Flat points for fitting the runtime selection
pub const RUNTIME_POINTS: f64 = 10.0;

/// Rejects titles outside every selected runtime option.
///
/// A title with unknown runtime always fits. Unknown runtime ids fit
/// nothing. Passing adds a flat 10 however many options fit.
pub struct RuntimeAxis;

impl AlignmentAxis for RuntimeAxis {
    fn name(&self) -> &str {
        "RuntimeAxis"
    }

    fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> AxisOutcome {
        if filters.runtimes.is_empty() {
            return AxisOutcome::Inactive;
        }

        let fits = match title.known_runtime() {
            None => true,
            Some(minutes) => filters
                .runtimes
                .iter()
                .filter_map(|id| config.runtime(id))
                .any(|constraint| constraint.allows(minutes)),
        };

        if fits {
            AxisOutcome::Score(RUNTIME_POINTS)
        } else {
            AxisOutcome::Reject
        }
    }
}
