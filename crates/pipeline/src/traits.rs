//! Core traits for the alignment pipeline.
//!
//! Each filter axis (mood, tone, runtime, extras) is an `AlignmentAxis`
//! that inspects a title against the user's selections on that axis.

use crate::config::PreferenceConfig;
use catalog::{Filters, Title};

/// What a single axis concluded about a title
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisOutcome {
    /// Nothing selected on this axis
    Inactive,
    /// The title fails a mandatory selection
    Reject,
    /// Points added to the alignment score
    Score(f64),
}

/// Core trait for one axis of mood alignment.
///
/// ## Design Note
/// - `Send + Sync` lets a pipeline be shared across rayon workers
/// - Axes are stateless; the option table is passed in on every call so
///   one pipeline can serve any configuration
pub trait AlignmentAxis: Send + Sync {
    /// Returns the name of this axis (for logging/debugging)
    fn name(&self) -> &str;

    /// Evaluate a title against the selections on this axis.
    ///
    /// Unknown option ids contribute nothing and never match.
    fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> AxisOutcome;
}
