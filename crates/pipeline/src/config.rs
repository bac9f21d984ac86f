//! Preference configuration: what each wizard option means for scoring.
//!
//! Every mood, tone and extra maps to a `PreferenceWeight` (qualifying
//! genres, a minimum external rating and a weight multiplier). Runtime
//! options map to inclusive minute bounds. The table is built once, either
//! from the built-in defaults or from a JSON file, and shared read-only.
//!
//! ## JSON layout
//! ```json
//! {
//!   "moods": { "Cozy": { "genres": ["Comedy"], "imdbMin": 6.5, "weight": 1.2 } },
//!   "runtimes": { "<90": { "max": 90 } }
//! }
//! ```
//! Axes missing from the file keep their built-in entries.

use crate::error::{ConfigError, Result};
use catalog::Title;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

// =============================================================================
// Option Entries
// =============================================================================

/// Scoring semantics of one mood, tone or extra option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceWeight {
    /// Genres that qualify a title for this option
    #[serde(default)]
    pub genres: Vec<String>,

    /// Descriptive only, never scored
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,

    /// Minimum external rating (0-10) for the rating bonus
    #[serde(default, alias = "imdbMin", skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<f64>,

    /// Multiplier, treated as 1 when absent or zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PreferenceWeight {
    pub fn new(genres: &[&str]) -> Self {
        Self {
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_certifications(mut self, certifications: &[&str]) -> Self {
        self.certifications = certifications.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_rating_min(mut self, rating_min: f64) -> Self {
        self.rating_min = Some(rating_min);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The multiplier actually applied
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w != 0.0 && !w.is_nan() => w,
            _ => 1.0,
        }
    }

    /// True if the title shares a genre with this option.
    /// An option without genres never matches.
    pub fn matches_genres(&self, title: &Title) -> bool {
        title.shares_genre_with(&self.genres)
    }

    /// True if the option has a (non-zero) minimum and the title's known
    /// external rating reaches it
    pub fn meets_rating(&self, title: &Title) -> bool {
        let threshold = self.rating_min.filter(|min| *min != 0.0);
        match (threshold, title.known_rating()) {
            (Some(min), Some(rating)) => rating >= min,
            _ => false,
        }
    }
}

/// Inclusive runtime bounds in minutes. A missing or zero bound is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl RuntimeConstraint {
    pub fn at_most(max: u32) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub fn at_least(min: u32) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn allows(&self, minutes: u32) -> bool {
        let meets_min = self.min.filter(|&m| m > 0).is_none_or(|m| minutes >= m);
        let meets_max = self.max.filter(|&m| m > 0).is_none_or(|m| minutes <= m);
        meets_min && meets_max
    }
}

/// A selectable wizard option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Option lists shown by the wizard, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardOptions {
    pub streaming_services: Vec<OptionItem>,
    pub moods: Vec<OptionItem>,
    pub tones: Vec<OptionItem>,
    pub runtimes: Vec<OptionItem>,
    pub extras: Vec<OptionItem>,
}

impl Default for WizardOptions {
    fn default() -> Self {
        fn items(pairs: &[(&str, &str)]) -> Vec<OptionItem> {
            pairs.iter().map(|(id, label)| OptionItem::new(id, label)).collect()
        }

        Self {
            streaming_services: items(&[
                ("Netflix", "Netflix"),
                ("Hulu", "Hulu"),
                ("Prime Video", "Prime Video"),
                ("Disney+", "Disney+"),
                ("HBO Max", "HBO Max"),
                ("Apple TV+", "Apple TV+"),
            ]),
            moods: items(&[
                ("Cozy", "Cozy"),
                ("Thrilling", "Thrilling"),
                ("Dark Comedy", "Dark Comedy"),
                ("Romance", "Romance"),
                ("Family-Friendly", "Family-Friendly"),
                ("Mind-Bending", "Mind-Bending"),
            ]),
            tones: items(&[
                ("Light-Hearted", "Light-Hearted"),
                ("Emotional", "Emotional"),
                ("Gritty", "Gritty"),
            ]),
            runtimes: items(&[
                ("<90", "<90 min"),
                ("<120", "<120 min"),
                (">150", "Epic (>150)"),
            ]),
            extras: items(&[
                ("Award-winning", "Award-winning"),
                ("Underrated", "Underrated Gems"),
            ]),
        }
    }
}

// =============================================================================
// PreferenceConfig
// =============================================================================

/// The full option table, keyed by option id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceConfig {
    pub moods: HashMap<String, PreferenceWeight>,
    pub tones: HashMap<String, PreferenceWeight>,
    pub runtimes: HashMap<String, RuntimeConstraint>,
    pub extras: HashMap<String, PreferenceWeight>,
    pub options: WizardOptions,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        let moods = HashMap::from([
            (
                "Cozy".to_string(),
                PreferenceWeight::new(&["Comedy", "Romance", "Family"])
                    .with_certifications(&["G", "PG", "PG-13"])
                    .with_rating_min(6.5)
                    .with_weight(1.2),
            ),
            (
                "Thrilling".to_string(),
                PreferenceWeight::new(&["Thriller", "Action", "Mystery"])
                    .with_rating_min(6.0)
                    .with_weight(1.3),
            ),
            (
                "Dark Comedy".to_string(),
                PreferenceWeight::new(&["Comedy", "Crime", "Drama"])
                    .with_rating_min(6.5)
                    .with_weight(1.1),
            ),
            (
                "Romance".to_string(),
                PreferenceWeight::new(&["Romance", "Drama"])
                    .with_rating_min(6.0)
                    .with_weight(1.0),
            ),
            (
                "Family-Friendly".to_string(),
                PreferenceWeight::new(&["Family", "Animation", "Adventure"])
                    .with_certifications(&["G", "PG"])
                    .with_rating_min(6.5)
                    .with_weight(1.2),
            ),
            (
                "Mind-Bending".to_string(),
                PreferenceWeight::new(&["Sci-Fi", "Thriller", "Mystery"])
                    .with_rating_min(7.0)
                    .with_weight(1.4),
            ),
        ]);

        let tones = HashMap::from([
            (
                "Light-Hearted".to_string(),
                PreferenceWeight::new(&["Comedy", "Family", "Animation"]).with_weight(1.0),
            ),
            (
                "Emotional".to_string(),
                PreferenceWeight::new(&["Drama", "Romance"]).with_weight(1.1),
            ),
            (
                "Gritty".to_string(),
                PreferenceWeight::new(&["Crime", "Thriller", "Drama"])
                    .with_certifications(&["R"])
                    .with_weight(1.2),
            ),
        ]);

        let runtimes = HashMap::from([
            ("<90".to_string(), RuntimeConstraint::at_most(90)),
            ("<120".to_string(), RuntimeConstraint::at_most(120)),
            (">150".to_string(), RuntimeConstraint::at_least(150)),
        ]);

        let extras = HashMap::from([
            (
                "Award-winning".to_string(),
                PreferenceWeight::new(&[]).with_rating_min(7.5).with_weight(1.3),
            ),
            (
                "Underrated".to_string(),
                PreferenceWeight::new(&[]).with_rating_min(6.8).with_weight(1.1),
            ),
        ]);

        Self {
            moods,
            tones,
            runtimes,
            extras,
            options: WizardOptions::default(),
        }
    }
}

impl PreferenceConfig {
    pub fn mood(&self, id: &str) -> Option<&PreferenceWeight> {
        self.moods.get(id)
    }

    pub fn tone(&self, id: &str) -> Option<&PreferenceWeight> {
        self.tones.get(id)
    }

    pub fn runtime(&self, id: &str) -> Option<&RuntimeConstraint> {
        self.runtimes.get(id)
    }

    pub fn extra(&self, id: &str) -> Option<&PreferenceWeight> {
        self.extras.get(id)
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading preference config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError(e),
        })?;

        Self::from_json_str(&path.display().to_string(), &content)
    }

    /// Parse a table from JSON text. `file` is only used in error messages.
    pub fn from_json_str(file: &str, content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|source| ConfigError::ParseError {
                file: file.to_string(),
                source,
            })?;
        config.validate()?;

        debug!(
            "Preference config: {} moods, {} tones, {} runtimes, {} extras",
            config.moods.len(),
            config.tones.len(),
            config.runtimes.len(),
            config.extras.len()
        );
        Ok(config)
    }

    /// Check weights, rating minimums and runtime bounds
    pub fn validate(&self) -> Result<()> {
        let weighted = [
            ("mood", &self.moods),
            ("tone", &self.tones),
            ("extra", &self.extras),
        ];

        for (axis, table) in weighted {
            for (id, entry) in table {
                if let Some(weight) = entry.weight {
                    if !weight.is_finite() || weight < 0.0 {
                        return Err(invalid(axis, id, format!("weight {} is not a non-negative number", weight)));
                    }
                }
                if let Some(min) = entry.rating_min {
                    if !(0.0..=10.0).contains(&min) {
                        return Err(invalid(axis, id, format!("rating minimum {} is outside 0-10", min)));
                    }
                }
            }
        }

        for (id, constraint) in &self.runtimes {
            if let (Some(min), Some(max)) = (constraint.min, constraint.max) {
                if max > 0 && min > max {
                    return Err(invalid("runtime", id, format!("min {} exceeds max {}", min, max)));
                }
            }
        }

        Ok(())
    }
}

fn invalid(axis: &str, id: &str, reason: String) -> ConfigError {
    ConfigError::InvalidOption {
        axis: axis.to_string(),
        id: id.to_string(),
        reason,
    }
}
