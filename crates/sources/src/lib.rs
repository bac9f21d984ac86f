//! # Sources Crate
//!
//! Taste profiling and candidate generation for the recommendation wizard.
//!
//! ## Components
//!
//! ### Profile
//! `build_profile` folds the user's star ratings into a `UserPreferences`
//! taste profile: genre affinities, runtime bucket affinities and talent
//! (lead actor and director) affinities.
//!
//! ### Catalog Source
//! `CatalogSource` builds the pool of titles the ranker scores:
//! - Seed-based: best rated titles in the genres of what the user rated
//! - Top-rated: when the user hasn't rated anything yet
//! - Mood-based: best rated titles in each selected mood's genres
//!
//! It also picks the shuffled titles shown during taste calibration.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Filters, TitleIndex};
//! use sources::{build_profile, CatalogSource};
//! use std::sync::Arc;
//!
//! let index = Arc::new(TitleIndex::load_from_files(Path::new("data/catalog"))?);
//! let source = CatalogSource::new(index.clone());
//!
//! let profile = build_profile(&rated_titles);
//! let candidates = source.get_candidates(&seed_ids, &Filters::new(), &services);
//! ```

// Public modules
pub mod availability;
pub mod catalog_source;
pub mod profile;
pub mod types;

// Re-export commonly used types
pub use availability::streaming_availability;
pub use catalog_source::{CatalogSource, DEFAULT_CALIBRATION_COUNT};
pub use profile::build_profile;
pub use types::{RuntimeAffinity, UserPreferences};
