//! Alignment axis implementations.
//!
//! This module contains the concrete axes that make up the standard
//! `AlignmentPipeline`, in evaluation order: mood, tone, runtime, extras.

pub mod extras;
pub mod mood;
pub mod runtime;
pub mod tone;

// Re-export for convenience
pub use extras::ExtrasAxis;
pub use mood::MoodAxis;
pub use runtime::RuntimeAxis;
pub use tone::ToneAxis;

use crate::config::PreferenceWeight;
use catalog::Title;
use std::collections::HashMap;

/// Configured entries for the selected ids, skipping unknown ids
fn selected_entries<'a>(
    table: &'a HashMap<String, PreferenceWeight>,
    selected: &'a [String],
) -> impl Iterator<Item = &'a PreferenceWeight> {
    selected.iter().filter_map(|id| table.get(id))
}

/// True if any selected, configured option shares a genre with the title
fn any_genre_match(
    table: &HashMap<String, PreferenceWeight>,
    selected: &[String],
    title: &Title,
) -> bool {
    selected_entries(table, selected).any(|entry| entry.matches_genres(title))
}
