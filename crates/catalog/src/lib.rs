//! # Catalog Crate
//!
//! Domain types and the in-memory title catalog for the recommendation wizard.
//!
//! ## Main Components
//!
//! - **types**: `Title`, `RatedTitle`, `Filters`, `RuntimeBucket`, `TitleIndex`
//! - **parser**: Parse catalog and rating JSON files into Rust structs
//! - **index**: Load a catalog directory and build genre/rating indices
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::TitleIndex;
//! use std::path::Path;
//!
//! let index = TitleIndex::load_from_files(Path::new("data/catalog"))?;
//!
//! let comedies = index.get_titles_by_genre("Comedy");
//! let best = index.top_rated(10);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    TitleId,
    // Core types
    Title,
    RatedTitle,
    Filters,
    RuntimeBucket,
    TitleIndex,
    // Constants
    LEAD_ACTOR_COUNT,
    MAX_USER_RATING,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_index_creation() {
        let index = TitleIndex::new();
        assert_eq!(index.counts(), (0, 0));
        assert!(index.get_title("tt0000001").is_none());
        assert!(index.get_titles_by_genre("Drama").is_empty());
        assert!(index.top_rated(5).is_empty());
    }

    #[test]
    fn test_insert_title_keeps_order_and_replaces() {
        let mut index = TitleIndex::new();
        index.insert_title(Title::new("tt2", "Second"));
        index.insert_title(Title::new("tt1", "First"));
        index.insert_title(Title::new("tt2", "Second (Director's Cut)"));

        let names: Vec<&str> = index.titles().map(|t| t.title.as_str()).collect();
        assert_eq!(names, vec!["Second (Director's Cut)", "First"]);
    }

    #[test]
    fn test_runtime_buckets() {
        assert_eq!(RuntimeBucket::from_minutes(99), RuntimeBucket::Short);
        assert_eq!(RuntimeBucket::from_minutes(100), RuntimeBucket::Medium);
        assert_eq!(RuntimeBucket::from_minutes(130), RuntimeBucket::Medium);
        assert_eq!(RuntimeBucket::from_minutes(131), RuntimeBucket::Long);
    }

    #[test]
    fn test_zero_runtime_and_rating_are_unknown() {
        let title = Title::new("tt1", "Blank").with_runtime(0).with_rating(0.0);
        assert_eq!(title.known_runtime(), None);
        assert_eq!(title.runtime_bucket(), None);
        assert_eq!(title.known_rating(), None);
    }

    #[test]
    fn test_talent_is_three_leads_then_directors() {
        let title = Title::new("tt1", "Ensemble")
            .with_actors(&["A", "B", "C", "D"])
            .with_directors(&["X", "Y"]);

        let talent: Vec<&str> = title.talent().map(|p| p.as_str()).collect();
        assert_eq!(talent, vec!["A", "B", "C", "X", "Y"]);
    }

    #[test]
    fn test_filters_mandatory_axes() {
        assert!(Filters::new().has_no_mandatory_axis());
        assert!(Filters::new().with_extras(&["Underrated"]).has_no_mandatory_axis());
        assert!(!Filters::new().with_runtimes(&["<90"]).has_no_mandatory_axis());
    }

    #[test]
    fn test_rated_title_json_shape() {
        let rated = RatedTitle::new(Title::new("tt1", "Seen").with_genres(&["Comedy"]), 4);
        let json = serde_json::to_value(&rated).unwrap();

        assert_eq!(json["id"], "tt1");
        assert_eq!(json["userRating"], 4);
        assert!(json.get("streamingServices").is_some());
        assert!(json.get("runtime").is_none());
    }
}
