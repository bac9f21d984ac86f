//! Parser for catalog JSON files.
//!
//! Two layouts are accepted for a title file:
//! - a bare array: `[{ "id": "tt0111161", "title": "...", ... }, ...]`
//! - a search response envelope: `{ "results": [ ... ] }`
//!
//! Each parsed title is normalized (genre/person labels trimmed, blank
//! entries dropped) and checked for out-of-range values.

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Either layout of a title file
#[derive(Deserialize)]
#[serde(untagged)]
enum TitleFile {
    List(Vec<Title>),
    Envelope { results: Vec<Title> },
}

impl TitleFile {
    fn into_titles(self) -> Vec<Title> {
        match self {
            TitleFile::List(titles) => titles,
            TitleFile::Envelope { results } => results,
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a titles file from disk
pub fn parse_titles(path: &Path) -> Result<Vec<Title>> {
    let content = read_file(path)?;
    parse_titles_str(&file_label(path), &content)
}

/// Parse titles from an in-memory JSON document
///
/// `file` is only used to label errors.
pub fn parse_titles_str(file: &str, content: &str) -> Result<Vec<Title>> {
    let parsed: TitleFile =
        serde_json::from_str(content).map_err(|source| CatalogError::ParseError {
            file: file.to_string(),
            source,
        })?;

    parsed
        .into_titles()
        .into_iter()
        .map(|title| validate_title(normalize_title(title)))
        .collect()
}

/// Parse a JSON array of rated titles (title fields plus `userRating`)
pub fn parse_rated_titles_str(file: &str, content: &str) -> Result<Vec<RatedTitle>> {
    let parsed: Vec<RatedTitle> =
        serde_json::from_str(content).map_err(|source| CatalogError::ParseError {
            file: file.to_string(),
            source,
        })?;

    parsed
        .into_iter()
        .map(|rated| {
            validate_user_rating(rated.user_rating)?;
            let title = validate_title(normalize_title(rated.title))?;
            Ok(RatedTitle::new(title, rated.user_rating))
        })
        .collect()
}

/// Parse a rated-titles file from disk
pub fn parse_rated_titles(path: &Path) -> Result<Vec<RatedTitle>> {
    let content = read_file(path)?;
    parse_rated_titles_str(&file_label(path), &content)
}

/// Reject a star rating outside 0-5
pub fn validate_user_rating(user_rating: u8) -> Result<()> {
    if user_rating > MAX_USER_RATING {
        return Err(CatalogError::InvalidValue {
            field: "userRating".to_string(),
            value: user_rating.to_string(),
        });
    }
    Ok(())
}

/// Trim labels and drop blank genres, actors and directors
fn normalize_title(mut title: Title) -> Title {
    title.id = title.id.trim().to_string();
    title.genres = clean_labels(title.genres);
    title.actors = clean_labels(title.actors);
    title.directors = clean_labels(title.directors);
    title.streaming_services = clean_labels(title.streaming_services);
    title
}

fn clean_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

fn validate_title(title: Title) -> Result<Title> {
    if title.id.is_empty() {
        return Err(CatalogError::InvalidValue {
            field: "id".to_string(),
            value: format!("empty id for '{}'", title.title),
        });
    }

    if let Some(rating) = title.rating {
        if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
            return Err(CatalogError::InvalidValue {
                field: "rating".to_string(),
                value: rating.to_string(),
            });
        }
    }

    Ok(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "tt0111161", "title": "The Shawshank Redemption", "year": 1994,
             "rating": 9.3, "runtime": 142, "genres": ["Drama"],
             "actors": ["Tim Robbins", "Morgan Freeman"], "directors": ["Frank Darabont"]}
        ]"#;

        let titles = parse_titles_str("titles.json", json).unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].id, "tt0111161");
        assert_eq!(titles[0].runtime, Some(142));
        assert_eq!(titles[0].lead_actors().len(), 2);
    }

    #[test]
    fn test_parse_envelope_and_sparse_fields() {
        let json = r#"{"results": [{"id": "tt1", "title": "Sparse"}], "total": 1}"#;

        let titles = parse_titles_str("search.json", json).unwrap();
        assert_eq!(titles.len(), 1);
        assert!(titles[0].genres.is_empty());
        assert!(titles[0].rating.is_none());
        assert!(titles[0].streaming_services.is_empty());
    }

    #[test]
    fn test_labels_are_trimmed() {
        let json = r#"[{"id": " tt2 ", "title": "Spacing", "genres": [" Comedy", "", "Romance "]}]"#;

        let titles = parse_titles_str("titles.json", json).unwrap();
        assert_eq!(titles[0].id, "tt2");
        assert_eq!(titles[0].genres, vec!["Comedy", "Romance"]);
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let json = r#"[{"id": "tt3", "title": "Broken", "rating": 11.5}]"#;

        let err = parse_titles_str("titles.json", json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue { ref field, .. } if field == "rating"));
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let err = parse_titles_str("titles.json", "{not json").unwrap_err();
        assert!(err.to_string().contains("titles.json"));
    }

    #[test]
    fn test_parse_rated_titles() {
        let json = r#"[
            {"id": "tt1", "title": "Seen", "genres": ["Comedy"], "userRating": 5},
            {"id": "tt2", "title": "Unseen", "userRating": 0}
        ]"#;

        let rated = parse_rated_titles_str("ratings.json", json).unwrap();
        assert_eq!(rated.len(), 2);
        assert!(rated[0].is_seen());
        assert!(!rated[1].is_seen());
    }

    #[test]
    fn test_rejects_user_rating_above_five() {
        let json = r#"[{"id": "tt1", "title": "Too Good", "userRating": 6}]"#;

        let err = parse_rated_titles_str("ratings.json", json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue { ref field, .. } if field == "userRating"));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_titles(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }
}
