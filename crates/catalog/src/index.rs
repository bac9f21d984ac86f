//! TitleIndex loading and indexing logic.
//!
//! Builds the in-memory catalog from a directory of JSON files:
//! - `titles.json` (required): the candidate catalog
//! - `calibration.json` (optional): fallback titles for taste calibration
//!
//! After loading, the genre and rating indices are built and the catalog
//! is validated.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// File holding the title catalog
pub const TITLES_FILE: &str = "titles.json";

/// Optional file holding calibration fallback titles
pub const CALIBRATION_FILE: &str = "calibration.json";

impl TitleIndex {
    /// Load a catalog from a directory
    ///
    /// Steps:
    /// 1. Parse the titles and calibration files in parallel
    /// 2. Reject duplicate ids
    /// 3. Build secondary indices (genre, rating order)
    /// 4. Validate
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading title catalog from {:?}", data_dir);

        let titles_path = data_dir.join(TITLES_FILE);
        let calibration_path = data_dir.join(CALIBRATION_FILE);

        let (titles, samples) = rayon::join(
            || parser::parse_titles(&titles_path),
            || {
                if calibration_path.exists() {
                    parser::parse_titles(&calibration_path)
                } else {
                    Ok(Vec::new())
                }
            },
        );
        let titles = titles?;
        let samples = samples?;

        let index = Self::from_titles(titles, samples)?;

        let (title_count, sample_count) = index.counts();
        info!(
            "Loaded {} titles and {} calibration samples",
            title_count, sample_count
        );
        Ok(index)
    }

    /// Build an index from already-parsed titles
    pub fn from_titles(titles: Vec<Title>, calibration_samples: Vec<Title>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for title in &titles {
            if !seen.insert(title.id.as_str()) {
                return Err(CatalogError::DuplicateTitle {
                    id: title.id.clone(),
                });
            }
        }

        let mut index = TitleIndex::new();
        for title in titles {
            index.insert_title(title);
        }
        index.set_calibration_samples(calibration_samples);

        index.build_secondary_indices();
        index.validate()?;
        Ok(index)
    }

    /// Rebuild the genre index and the global rating order
    ///
    /// Both lists are sorted best rated first; titles without a rating sort
    /// last, and ties keep catalog insertion order.
    pub fn build_secondary_indices(&mut self) {
        self.genre_index.clear();
        for id in &self.order {
            if let Some(title) = self.titles.get(id) {
                for genre in &title.genres {
                    let entry = self.genre_index.entry(genre.clone()).or_default();
                    if !entry.contains(id) {
                        entry.push(id.clone());
                    }
                }
            }
        }

        let titles = &self.titles;
        let by_rating = |a: &TitleId, b: &TitleId| {
            let ra = titles.get(a).and_then(|t| t.known_rating());
            let rb = titles.get(b).and_then(|t| t.known_rating());
            compare_ratings_desc(ra, rb)
        };

        for ids in self.genre_index.values_mut() {
            ids.sort_by(by_rating);
        }

        self.rating_order = self
            .order
            .iter()
            .filter(|id| titles.get(*id).and_then(|t| t.known_rating()).is_some())
            .cloned()
            .collect();
        self.rating_order.sort_by(by_rating);

        debug!(
            "Indexed {} genres, {} rated titles",
            self.genre_index.len(),
            self.rating_order.len()
        );
    }

    /// Validate data integrity
    ///
    /// Checks that every indexed id resolves to a title and that external
    /// ratings are within 0-10.
    pub fn validate(&self) -> Result<()> {
        for id in self.genre_index.values().flatten().chain(&self.rating_order) {
            if !self.titles.contains_key(id) {
                return Err(CatalogError::MissingReference {
                    entity: "Title".to_string(),
                    id: id.clone(),
                });
            }
        }

        for title in self.titles.values().chain(&self.calibration_samples) {
            if let Some(rating) = title.rating {
                if !(0.0..=10.0).contains(&rating) {
                    return Err(CatalogError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.to_string(),
                    });
                }
            }
        }

        if self.order.len() != self.titles.len() {
            return Err(CatalogError::ValidationError(format!(
                "insertion order tracks {} ids but catalog holds {} titles",
                self.order.len(),
                self.titles.len()
            )));
        }
        Ok(())
    }

    /// Case-insensitive title search: exact matches first, then substring
    /// matches, each group best rated first
    pub fn search(&self, query: &str) -> Vec<&Title> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Title)> = self
            .titles()
            .filter_map(|title| {
                let name = title.title.to_lowercase();
                if name == needle {
                    Some((0, title))
                } else if name.contains(&needle) {
                    Some((1, title))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| compare_ratings_desc(a.1.known_rating(), b.1.known_rating()))
        });
        matches.into_iter().map(|(_, title)| title).collect()
    }
}

/// Order two optional ratings best first, unknown last
fn compare_ratings_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
