//! Taste profile types.
//!
//! `UserPreferences` is the accumulated taste signal derived from explicit
//! ratings. It is rebuilt from the full rating list on every request and
//! never updated in place.

use catalog::RuntimeBucket;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Accumulated affinity per runtime bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeAffinity {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl RuntimeAffinity {
    pub fn get(&self, bucket: RuntimeBucket) -> f64 {
        match bucket {
            RuntimeBucket::Short => self.short,
            RuntimeBucket::Medium => self.medium,
            RuntimeBucket::Long => self.long,
        }
    }

    pub fn add(&mut self, bucket: RuntimeBucket, weight: f64) {
        match bucket {
            RuntimeBucket::Short => self.short += weight,
            RuntimeBucket::Medium => self.medium += weight,
            RuntimeBucket::Long => self.long += weight,
        }
    }
}

/// A user's taste profile.
///
/// Genre and talent maps hold non-negative accumulated weights with no
/// upper bound. `avg_rating` is the mean of the non-zero star ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub genres: HashMap<String, f64>,
    pub runtimes: RuntimeAffinity,
    /// Actors and directors share one namespace
    pub talents: HashMap<String, f64>,
    pub avg_rating: f64,
}

impl UserPreferences {
    /// The all-zero profile
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre_affinity(&self, genre: &str) -> f64 {
        self.genres.get(genre).copied().unwrap_or(0.0)
    }

    pub fn talent_affinity(&self, person: &str) -> f64 {
        self.talents.get(person).copied().unwrap_or(0.0)
    }

    /// True when no rating contributed anything
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.talents.is_empty()
            && self.runtimes == RuntimeAffinity::default()
            && self.avg_rating == 0.0
    }

    /// Get top N genres by affinity (ties broken alphabetically)
    pub fn top_genres(&self, n: usize) -> Vec<(&str, f64)> {
        let mut genres: Vec<(&str, f64)> = self
            .genres
            .iter()
            .map(|(genre, &weight)| (genre.as_str(), weight))
            .collect();
        genres.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        genres.truncate(n);
        genres
    }

    /// Get top N people by affinity (ties broken alphabetically)
    pub fn top_talents(&self, n: usize) -> Vec<(&str, f64)> {
        let mut talents: Vec<(&str, f64)> = self
            .talents
            .iter()
            .map(|(person, &weight)| (person.as_str(), weight))
            .collect();
        talents.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        talents.truncate(n);
        talents
    }
}
