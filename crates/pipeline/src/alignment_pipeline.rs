//! The AlignmentPipeline orchestrates the filter axes.
//!
//! This module provides the AlignmentPipeline struct that chains the
//! axes together using the builder pattern and folds their outcomes into
//! a single mood-alignment value.

use crate::config::PreferenceConfig;
use crate::filters::{ExtrasAxis, MoodAxis, RuntimeAxis, ToneAxis};
use crate::traits::{AlignmentAxis, AxisOutcome};
use catalog::{Filters, Title};
use tracing::trace;

/// Upper bound on the summed alignment points
pub const MAX_ALIGNMENT: f64 = 100.0;

/// Result of mood alignment for one title
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Failed a mandatory axis; the composite score is forced to 0
    Rejected,
    /// Summed axis points, in [0, 100]
    Score(f64),
}

impl Alignment {
    /// Numeric form used on the wire, with -1 standing for a reject
    pub const REJECT_SENTINEL: f64 = -1.0;

    pub fn value(&self) -> f64 {
        match self {
            Self::Rejected => Self::REJECT_SENTINEL,
            Self::Score(score) => *score,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Chains alignment axes together.
///
/// ## Usage
/// ```ignore
/// let pipeline = AlignmentPipeline::new()
///     .add_axis(MoodAxis)
///     .add_axis(ToneAxis)
///     .add_axis(RuntimeAxis)
///     .add_axis(ExtrasAxis);
///
/// let alignment = pipeline.evaluate(&title, &filters, &config);
/// ```
pub struct AlignmentPipeline {
    axes: Vec<Box<dyn AlignmentAxis>>,
}

impl AlignmentPipeline {
    /// Create a new empty AlignmentPipeline.
    pub fn new() -> Self {
        Self { axes: Vec::new() }
    }

    /// The standard axis order: mood, tone, runtime, extras
    pub fn standard() -> Self {
        Self::new()
            .add_axis(MoodAxis)
            .add_axis(ToneAxis)
            .add_axis(RuntimeAxis)
            .add_axis(ExtrasAxis)
    }

    /// Add an axis to the pipeline (builder pattern).
    pub fn add_axis(mut self, axis: impl AlignmentAxis + 'static) -> Self {
        self.axes.push(Box::new(axis));
        self
    }

    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|axis| axis.name()).collect()
    }

    /// Evaluate every axis in order.
    ///
    /// ## Algorithm
    /// 1. Start from 0 points
    /// 2. For each axis in order:
    ///    a. Inactive: skip
    ///    b. Reject: stop immediately with `Alignment::Rejected`
    ///    c. Score: add the points
    /// 3. Cap the total at 100
    pub fn evaluate(&self, title: &Title, filters: &Filters, config: &PreferenceConfig) -> Alignment {
        let mut total: f64 = 0.0;
        for axis in &self.axes {
            match axis.evaluate(title, filters, config) {
                AxisOutcome::Inactive => {}
                AxisOutcome::Reject => {
                    trace!("{} rejected {}", axis.name(), title.id);
                    return Alignment::Rejected;
                }
                AxisOutcome::Score(points) => total += points,
            }
        }
        Alignment::Score(total.min(MAX_ALIGNMENT))
    }
}

impl Default for AlignmentPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
