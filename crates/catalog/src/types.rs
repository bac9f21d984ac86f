//! Core domain types for the title catalog.
//!
//! This module defines the data structures shared by every stage of the
//! recommendation wizard:
//! - `Title` and `RatedTitle` describe catalog entries and the user's ratings
//! - `RuntimeBucket` is the short/medium/long split used for taste tracking
//! - `Filters` carries the mood/tone/runtime/extra selections
//! - `TitleIndex` is the in-memory catalog with secondary lookups
//!
//! JSON uses camelCase field names (`userRating`, `streamingServices`) so
//! payloads produced by the wizard front end load without translation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier for a title (e.g. "tt1375666")
pub type TitleId = String;

/// Number of billed actors considered "lead" for taste tracking
pub const LEAD_ACTOR_COUNT: usize = 3;

/// Highest star rating a user can give; 0 means "never seen"
pub const MAX_USER_RATING: u8 = 5;

// =============================================================================
// Title Types
// =============================================================================

/// A movie from the external catalog.
///
/// All descriptive fields are optional. List fields default to empty so a
/// sparse catalog entry still deserializes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: TitleId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// External rating on a 0-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Runtime in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    /// Billing order matters: only the first three are treated as leads
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    #[serde(default)]
    pub streaming_services: Vec<String>,
}

impl Title {
    /// Create a bare title with only an id and a name
    pub fn new(id: impl Into<TitleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_runtime(mut self, minutes: u32) -> Self {
        self.runtime = Some(minutes);
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_actors(mut self, actors: &[&str]) -> Self {
        self.actors = actors.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_directors(mut self, directors: &[&str]) -> Self {
        self.directors = directors.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Runtime in minutes, treating a zero runtime as unknown
    pub fn known_runtime(&self) -> Option<u32> {
        self.runtime.filter(|&minutes| minutes > 0)
    }

    /// External rating, treating zero or non-finite values as unknown
    pub fn known_rating(&self) -> Option<f64> {
        self.rating.filter(|r| r.is_finite() && *r != 0.0)
    }

    /// Runtime bucket for taste tracking, if the runtime is known
    pub fn runtime_bucket(&self) -> Option<RuntimeBucket> {
        self.known_runtime().map(RuntimeBucket::from_minutes)
    }

    /// The first three billed actors
    pub fn lead_actors(&self) -> &[String] {
        let end = self.actors.len().min(LEAD_ACTOR_COUNT);
        &self.actors[..end]
    }

    /// Lead actors followed by every director, in listed order
    pub fn talent(&self) -> impl Iterator<Item = &String> {
        self.lead_actors().iter().chain(self.directors.iter())
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// True if any of this title's genres appears in `genres`
    pub fn shares_genre_with(&self, genres: &[String]) -> bool {
        self.genres.iter().any(|g| genres.contains(g))
    }
}

/// A title together with the user's star rating.
///
/// `user_rating` is 0 for "never seen", otherwise 1-5. Zero ratings carry no
/// taste signal but still count toward the wizard's minimum-ratings threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedTitle {
    #[serde(flatten)]
    pub title: Title,
    pub user_rating: u8,
}

impl RatedTitle {
    pub fn new(title: Title, user_rating: u8) -> Self {
        Self { title, user_rating }
    }

    /// Whether the user has actually seen this title
    pub fn is_seen(&self) -> bool {
        self.user_rating > 0
    }
}

// =============================================================================
// Runtime Buckets
// =============================================================================

/// Coarse runtime category used by the taste profile.
///
/// - `Short`: under 100 minutes
/// - `Medium`: 100 to 130 minutes inclusive
/// - `Long`: over 130 minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeBucket {
    Short,
    Medium,
    Long,
}

impl RuntimeBucket {
    pub const ALL: [RuntimeBucket; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn from_minutes(minutes: u32) -> Self {
        if minutes < 100 {
            Self::Short
        } else if minutes <= 130 {
            Self::Medium
        } else {
            Self::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Selected option identifiers on each filter axis.
///
/// An empty list means the axis imposes no constraint. Lists keep selection
/// order, which only matters for explanation text ("first selected mood").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub moods: Vec<String>,
    pub tones: Vec<String>,
    pub runtimes: Vec<String>,
    pub extras: Vec<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_moods(mut self, moods: &[&str]) -> Self {
        self.moods = moods.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_tones(mut self, tones: &[&str]) -> Self {
        self.tones = tones.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_runtimes(mut self, runtimes: &[&str]) -> Self {
        self.runtimes = runtimes.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_extras(mut self, extras: &[&str]) -> Self {
        self.extras = extras.iter().map(|e| e.to_string()).collect();
        self
    }

    /// True when no mandatory axis (mood, tone, runtime) has a selection
    pub fn has_no_mandatory_axis(&self) -> bool {
        self.moods.is_empty() && self.tones.is_empty() && self.runtimes.is_empty()
    }
}

// =============================================================================
// TitleIndex - In-Memory Catalog
// =============================================================================

/// In-memory catalog holding every known title plus secondary indices.
///
/// Titles are kept in insertion order so that every listing the index
/// produces is deterministic.
#[derive(Debug, Default)]
pub struct TitleIndex {
    pub(crate) titles: HashMap<TitleId, Title>,
    /// Insertion order of title ids
    pub(crate) order: Vec<TitleId>,

    /// Titles grouped by genre, best rated first (built by `build_secondary_indices`)
    pub(crate) genre_index: HashMap<String, Vec<TitleId>>,
    /// All titles with a known rating, best rated first
    pub(crate) rating_order: Vec<TitleId>,

    /// Fallback titles offered during taste calibration
    pub(crate) calibration_samples: Vec<Title>,
}

impl TitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_title(&self, id: &str) -> Option<&Title> {
        self.titles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.titles.contains_key(id)
    }

    /// All titles in insertion order
    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.order.iter().filter_map(|id| self.titles.get(id))
    }

    /// Title ids for a genre, best rated first. Empty slice for unknown genres.
    pub fn get_titles_by_genre(&self, genre: &str) -> &[TitleId] {
        self.genre_index
            .get(genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Up to `limit` titles with the highest external rating
    pub fn top_rated(&self, limit: usize) -> Vec<&Title> {
        self.rating_order
            .iter()
            .take(limit)
            .filter_map(|id| self.titles.get(id))
            .collect()
    }

    pub fn calibration_samples(&self) -> &[Title] {
        &self.calibration_samples
    }

    /// Insert a title, replacing any existing title with the same id.
    ///
    /// Secondary indices are not updated; call `build_secondary_indices`
    /// after a batch of inserts.
    pub fn insert_title(&mut self, title: Title) {
        if !self.titles.contains_key(&title.id) {
            self.order.push(title.id.clone());
        }
        self.titles.insert(title.id.clone(), title);
    }

    pub fn set_calibration_samples(&mut self, samples: Vec<Title>) {
        self.calibration_samples = samples;
    }

    /// Number of catalog titles and calibration samples
    pub fn counts(&self) -> (usize, usize) {
        (self.titles.len(), self.calibration_samples.len())
    }
}
