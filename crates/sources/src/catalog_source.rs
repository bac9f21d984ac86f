//! Catalog Source - candidate and calibration titles from the local catalog
//!
//! Generates the candidate pool the ranker scores:
//! - Seed-based: genres of the titles the user rated, expanded to the best
//!   rated catalog titles in each genre
//! - Top-rated: when there are no seeds yet, the best rated titles overall
//! - Mood-based: titles in the genres associated with each selected mood
//!
//! ## Algorithm
//! 1. Look up at most 5 seed titles and collect their genres in encounter
//!    order (at most 5 distinct genres)
//! 2. Take up to 40 titles per genre, or the top 50 titles without seeds
//! 3. Add up to 40 titles per mood genre when moods are selected
//! 4. Deduplicate by id (first occurrence wins) and cap the pool at 120
//! 5. Attach streaming availability and keep titles available on at least
//!    one selected service, falling back to the whole pool if none are

use crate::availability::streaming_availability;
use catalog::{Filters, Title, TitleId, TitleIndex};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Genres sampled for taste calibration
pub const CALIBRATION_GENRES: [&str; 6] = ["Action", "Comedy", "Drama", "Sci-Fi", "Thriller", "Romance"];

/// Titles taken from each calibration genre
pub const CALIBRATION_PER_GENRE: usize = 3;

/// Calibration titles offered when the caller doesn't ask for a count
pub const DEFAULT_CALIBRATION_COUNT: usize = 9;

/// Genres searched for each mood when building the candidate pool
pub fn default_mood_genres() -> HashMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 6] = [
        ("Cozy", &["Comedy", "Romance", "Family"]),
        ("Thrilling", &["Thriller", "Action", "Mystery"]),
        ("Dark Comedy", &["Comedy", "Crime"]),
        ("Romance", &["Romance", "Drama"]),
        ("Family-Friendly", &["Family", "Animation", "Adventure"]),
        ("Mind-Bending", &["Sci-Fi", "Thriller", "Mystery"]),
    ];

    table
        .into_iter()
        .map(|(mood, genres)| {
            (
                mood.to_string(),
                genres.iter().map(|g| g.to_string()).collect(),
            )
        })
        .collect()
}

/// Builds candidate and calibration title sets from a shared catalog
#[derive(Clone)]
pub struct CatalogSource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    index: Arc<TitleIndex>,

    /// Seed titles looked up for genre expansion
    max_seeds: usize,

    /// Distinct seed genres expanded
    max_seed_genres: usize,

    /// Titles taken per expanded genre
    per_genre_limit: usize,

    /// Titles taken when there are no seeds
    top_rated_limit: usize,

    /// Size cap on the deduplicated pool
    max_candidates: usize,

    mood_genres: HashMap<String, Vec<String>>,
}

impl CatalogSource {
    /// Create a new catalog source with the default limits
    pub fn new(index: Arc<TitleIndex>) -> Self {
        Self {
            index,
            max_seeds: 5,
            max_seed_genres: 5,
            per_genre_limit: 40,
            top_rated_limit: 50,
            max_candidates: 120,
            mood_genres: default_mood_genres(),
        }
    }

    /// Configure how many seed titles are looked up (default: 5)
    pub fn with_max_seeds(mut self, max: usize) -> Self {
        self.max_seeds = max;
        self
    }

    /// Configure titles taken per genre (default: 40)
    pub fn with_per_genre_limit(mut self, limit: usize) -> Self {
        self.per_genre_limit = limit;
        self
    }

    /// Configure the size cap on the candidate pool (default: 120)
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Replace the mood-to-genre search table
    pub fn with_mood_genres(mut self, mood_genres: HashMap<String, Vec<String>>) -> Self {
        self.mood_genres = mood_genres;
        self
    }

    /// Generate the candidate pool for a recommendation request
    ///
    /// `seeds` are the ids of titles the user actually rated (non-zero).
    /// Returned titles carry their streaming availability.
    #[instrument(skip_all, fields(seeds = seeds.len(), moods = filters.moods.len()))]
    pub fn get_candidates(
        &self,
        seeds: &[TitleId],
        filters: &Filters,
        services: &[String],
    ) -> Vec<Title> {
        let mut pool: Vec<&Title> = if seeds.is_empty() {
            self.index.top_rated(self.top_rated_limit)
        } else {
            self.get_seed_based(seeds)
        };
        debug!("Base pool: {} titles", pool.len());

        if !filters.moods.is_empty() {
            let mood_titles = self.get_mood_based(&filters.moods);
            debug!("Mood pool: {} titles", mood_titles.len());
            pool.extend(mood_titles);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        pool.retain(|title| seen.insert(title.id.as_str()));
        pool.truncate(self.max_candidates);

        let with_streaming: Vec<Title> = pool
            .par_iter()
            .map(|title| {
                let mut title = (*title).clone();
                title.streaming_services = streaming_availability(&title, services);
                title
            })
            .collect();

        let available: Vec<Title> = with_streaming
            .iter()
            .filter(|title| !title.streaming_services.is_empty())
            .cloned()
            .collect();

        debug!(
            "Generated {} candidates ({} available on selected services)",
            with_streaming.len(),
            available.len()
        );

        if available.is_empty() {
            with_streaming
        } else {
            available
        }
    }

    /// Seed-based discovery: best rated titles in the seeds' genres
    fn get_seed_based(&self, seeds: &[TitleId]) -> Vec<&Title> {
        let mut genres: Vec<&str> = Vec::new();
        for seed in seeds.iter().take(self.max_seeds) {
            let Some(title) = self.index.get_title(seed) else {
                debug!("Seed {} not in catalog", seed);
                continue;
            };
            for genre in &title.genres {
                if !genres.contains(&genre.as_str()) {
                    genres.push(genre);
                }
            }
        }
        genres.truncate(self.max_seed_genres);

        genres
            .into_iter()
            .flat_map(|genre| self.titles_in_genre(genre))
            .collect()
    }

    /// Mood-based discovery: best rated titles in each mood's genres
    fn get_mood_based(&self, moods: &[String]) -> Vec<&Title> {
        let mut genres: Vec<&str> = Vec::new();
        for mood in moods {
            for genre in self.mood_genres.get(mood).into_iter().flatten() {
                if !genres.contains(&genre.as_str()) {
                    genres.push(genre);
                }
            }
        }

        genres
            .into_iter()
            .flat_map(|genre| self.titles_in_genre(genre))
            .collect()
    }

    fn titles_in_genre(&self, genre: &str) -> Vec<&Title> {
        self.index
            .get_titles_by_genre(genre)
            .iter()
            .take(self.per_genre_limit)
            .filter_map(|id| self.index.get_title(id))
            .collect()
    }

    /// Pick a shuffled set of titles for taste calibration
    ///
    /// Takes the top titles from each calibration genre. When the catalog
    /// yields fewer than `count`, the pool is blended with the catalog's
    /// calibration samples before sampling.
    pub fn calibration_titles<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Title> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut picks: Vec<&Title> = CALIBRATION_GENRES
            .iter()
            .flat_map(|genre| {
                self.index
                    .get_titles_by_genre(genre)
                    .iter()
                    .take(CALIBRATION_PER_GENRE)
                    .filter_map(|id| self.index.get_title(id))
            })
            .filter(|title| seen.insert(title.id.as_str()))
            .collect();

        if picks.len() < count {
            debug!(
                "Only {} calibration titles in catalog, blending {} samples",
                picks.len(),
                self.index.calibration_samples().len()
            );
            picks.extend(
                self.index
                    .calibration_samples()
                    .iter()
                    .filter(|title| seen.insert(title.id.as_str())),
            );
        }

        picks.shuffle(rng);
        picks.truncate(count);
        picks.into_iter().cloned().collect()
    }
}
