//! Wizard session state.
//!
//! Everything the user has chosen so far (streaming services, calibration
//! ratings, filter selections, dismissed results) lives in one explicit
//! `SessionState` value that callers own and pass to the orchestrator.
//!
//! Sessions can be saved as JSON in a compact form that references
//! titles by id:
//! ```json
//! {
//!   "services": ["Netflix"],
//!   "ratings": [{ "id": "tt0111161", "userRating": 5 }],
//!   "filters": { "moods": ["Cozy"] }
//! }
//! ```

use catalog::{Filters, MAX_USER_RATING, RatedTitle, Title, TitleId, TitleIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Ratings (including "never seen") needed before recommending
pub const MIN_RATINGS: usize = 3;

/// Calibration titles shown at a time
pub const CALIBRATION_BATCH_SIZE: usize = 3;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Select at least one streaming service")]
    NoServices,

    #[error("Rate at least {required} titles before continuing (rated {rated})")]
    NotEnoughRatings { required: usize, rated: usize },

    #[error("Invalid rating {0}: must be 0 (never seen) to {max}", max = MAX_USER_RATING)]
    InvalidRating(u8),

    #[error("Unknown title id: {0}")]
    UnknownTitle(TitleId),

    #[error("Session file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse session {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Selection axes a filter toggle can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    Mood,
    Tone,
    Runtime,
    Extra,
}

/// The user's progress through the wizard
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub services: Vec<String>,
    /// In rating order; re-rating a title moves it to the end
    pub ratings: Vec<RatedTitle>,
    pub filters: Filters,
    pub dismissed: HashSet<TitleId>,

    calibration: Vec<Title>,
    calibration_index: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: &[&str]) -> Self {
        self.services = services.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Select a service, or deselect it if already selected
    pub fn toggle_service(&mut self, service: &str) {
        toggle(&mut self.services, service);
    }

    /// Record a rating, replacing any earlier rating of the same title
    pub fn rate(&mut self, title: Title, user_rating: u8) -> Result<()> {
        if user_rating > MAX_USER_RATING {
            return Err(SessionError::InvalidRating(user_rating));
        }
        self.ratings.retain(|rated| rated.title.id != title.id);
        self.ratings.push(RatedTitle::new(title, user_rating));
        Ok(())
    }

    /// Change the rating of an already rated title in place.
    /// Returns false if the title was never rated.
    pub fn update_rating(&mut self, id: &str, user_rating: u8) -> Result<bool> {
        if user_rating > MAX_USER_RATING {
            return Err(SessionError::InvalidRating(user_rating));
        }
        match self.ratings.iter_mut().find(|rated| rated.title.id == id) {
            Some(rated) => {
                rated.user_rating = user_rating;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Select an option on one filter axis, or deselect it
    pub fn toggle_filter(&mut self, axis: FilterAxis, id: &str) {
        let selected = match axis {
            FilterAxis::Mood => &mut self.filters.moods,
            FilterAxis::Tone => &mut self.filters.tones,
            FilterAxis::Runtime => &mut self.filters.runtimes,
            FilterAxis::Extra => &mut self.filters.extras,
        };
        toggle(selected, id);
    }

    /// Hide a title from later result lists
    pub fn dismiss(&mut self, id: impl Into<TitleId>) {
        self.dismissed.insert(id.into());
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed.contains(id)
    }

    /// All ratings, "never seen" included
    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    /// Ratings that carry taste signal
    pub fn meaningful_ratings(&self) -> impl Iterator<Item = &RatedTitle> {
        self.ratings.iter().filter(|rated| rated.is_seen())
    }

    /// Ids of meaningfully rated titles, used to seed candidate search
    pub fn seed_ids(&self) -> Vec<TitleId> {
        self.meaningful_ratings()
            .map(|rated| rated.title.id.clone())
            .collect()
    }

    /// Check the wizard can move on to recommendations
    pub fn ensure_ready(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(SessionError::NoServices);
        }
        if self.rating_count() < MIN_RATINGS {
            return Err(SessionError::NotEnoughRatings {
                required: MIN_RATINGS,
                rated: self.rating_count(),
            });
        }
        Ok(())
    }

    /// Replace the calibration list and start from its first batch
    pub fn set_calibration_titles(&mut self, titles: Vec<Title>) {
        self.calibration = titles;
        self.calibration_index = 0;
    }

    pub fn append_calibration_titles(&mut self, titles: Vec<Title>) {
        self.calibration.extend(titles);
    }

    /// The calibration titles currently on screen
    pub fn current_calibration_batch(&self) -> &[Title] {
        let start = self.calibration_index.min(self.calibration.len());
        let end = (start + CALIBRATION_BATCH_SIZE).min(self.calibration.len());
        &self.calibration[start..end]
    }

    /// Advance to the next batch. Returns false once the list is exhausted,
    /// which is the cue to fetch and append more titles.
    pub fn next_calibration_batch(&mut self) -> bool {
        self.calibration_index += CALIBRATION_BATCH_SIZE;
        self.calibration_index < self.calibration.len()
    }

    /// Back to an empty session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn toggle(selected: &mut Vec<String>, id: &str) {
    if let Some(pos) = selected.iter().position(|s| s == id) {
        selected.remove(pos);
    } else {
        selected.push(id.to_string());
    }
}

// =============================================================================
// Session Files
// =============================================================================

/// One rating in a session file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub id: TitleId,
    pub user_rating: u8,
}

/// On-disk session, with ratings referencing catalog titles by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub services: Vec<String>,
    pub ratings: Vec<RatingEntry>,
    pub filters: Filters,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dismissed: Vec<TitleId>,
}

impl SessionFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SessionError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => SessionError::IoError(e),
        })?;

        Self::from_json_str(&path.display().to_string(), &content)
    }

    pub fn from_json_str(file: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| SessionError::ParseError {
            file: file.to_string(),
            source,
        })
    }

    /// Resolve rating ids against the catalog
    pub fn into_state(self, index: &TitleIndex) -> Result<SessionState> {
        let mut state = SessionState {
            services: self.services,
            filters: self.filters,
            dismissed: self.dismissed.into_iter().collect(),
            ..SessionState::default()
        };

        for entry in self.ratings {
            let title = index
                .get_title(&entry.id)
                .ok_or_else(|| SessionError::UnknownTitle(entry.id.clone()))?;
            state.rate(title.clone(), entry.user_rating)?;
        }

        debug!(
            "Loaded session: {} services, {} ratings",
            state.services.len(),
            state.rating_count()
        );
        Ok(state)
    }

    /// Compact form of a session (calibration progress is not saved)
    pub fn from_state(state: &SessionState) -> Self {
        let mut dismissed: Vec<TitleId> = state.dismissed.iter().cloned().collect();
        dismissed.sort();

        Self {
            services: state.services.clone(),
            ratings: state
                .ratings
                .iter()
                .map(|rated| RatingEntry {
                    id: rated.title.id.clone(),
                    user_rating: rated.user_rating,
                })
                .collect(),
            filters: state.filters.clone(),
            dismissed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: &str) -> Title {
        Title::new(id, format!("Title {}", id))
    }

    #[test]
    fn test_toggle_service() {
        let mut session = SessionState::new();
        session.toggle_service("Netflix");
        session.toggle_service("Hulu");
        session.toggle_service("Netflix");
        assert_eq!(session.services, vec!["Hulu"]);
    }

    #[test]
    fn test_rerating_replaces_and_moves_to_end() {
        let mut session = SessionState::new();
        session.rate(title("a"), 2).unwrap();
        session.rate(title("b"), 0).unwrap();
        session.rate(title("a"), 5).unwrap();

        assert_eq!(session.rating_count(), 2);
        assert_eq!(session.ratings[1].title.id, "a");
        assert_eq!(session.ratings[1].user_rating, 5);
    }

    #[test]
    fn test_update_rating_in_place() {
        let mut session = SessionState::new();
        session.rate(title("a"), 2).unwrap();
        session.rate(title("b"), 3).unwrap();

        assert!(session.update_rating("a", 4).unwrap());
        assert_eq!(session.ratings[0].user_rating, 4);
        assert!(!session.update_rating("zzz", 4).unwrap());
    }

    #[test]
    fn test_invalid_rating_rejected() {
        let mut session = SessionState::new();
        assert!(matches!(session.rate(title("a"), 6), Err(SessionError::InvalidRating(6))));
        assert!(session.ratings.is_empty());
    }

    #[test]
    fn test_never_seen_counts_toward_readiness_but_not_seeds() {
        let mut session = SessionState::new().with_services(&["Netflix"]);
        session.rate(title("a"), 0).unwrap();
        session.rate(title("b"), 0).unwrap();
        assert!(matches!(
            session.ensure_ready(),
            Err(SessionError::NotEnoughRatings { required: 3, rated: 2 })
        ));

        session.rate(title("c"), 4).unwrap();
        assert!(session.ensure_ready().is_ok());
        assert_eq!(session.seed_ids(), vec!["c"]);
    }

    #[test]
    fn test_services_required() {
        let mut session = SessionState::new();
        for id in ["a", "b", "c"] {
            session.rate(title(id), 3).unwrap();
        }
        assert!(matches!(session.ensure_ready(), Err(SessionError::NoServices)));
    }

    #[test]
    fn test_filter_toggles() {
        let mut session = SessionState::new();
        session.toggle_filter(FilterAxis::Mood, "Cozy");
        session.toggle_filter(FilterAxis::Mood, "Thrilling");
        session.toggle_filter(FilterAxis::Runtime, "<90");
        session.toggle_filter(FilterAxis::Mood, "Cozy");

        assert_eq!(session.filters.moods, vec!["Thrilling"]);
        assert_eq!(session.filters.runtimes, vec!["<90"]);
        assert!(session.filters.tones.is_empty());
    }

    #[test]
    fn test_calibration_batches() {
        let mut session = SessionState::new();
        session.set_calibration_titles(["a", "b", "c", "d"].into_iter().map(title).collect());

        assert_eq!(session.current_calibration_batch().len(), 3);
        assert!(session.next_calibration_batch());
        assert_eq!(session.current_calibration_batch()[0].id, "d");

        session.append_calibration_titles(vec![title("e")]);
        assert_eq!(session.current_calibration_batch().len(), 2);
        assert!(!session.next_calibration_batch());
        assert!(session.current_calibration_batch().is_empty());

        session.set_calibration_titles(vec![title("f")]);
        assert_eq!(session.current_calibration_batch()[0].id, "f");
    }

    #[test]
    fn test_dismiss_and_reset() {
        let mut session = SessionState::new().with_services(&["Hulu"]);
        session.dismiss("tt1");
        assert!(session.is_dismissed("tt1"));

        session.reset();
        assert!(!session.is_dismissed("tt1"));
        assert!(session.services.is_empty());
    }

    #[test]
    fn test_session_file_roundtrip_through_catalog() {
        let index = TitleIndex::from_titles(vec![title("a"), title("b")], Vec::new()).unwrap();
        let json = r#"{
            "services": ["Netflix"],
            "ratings": [{"id": "a", "userRating": 5}, {"id": "b", "userRating": 0}],
            "filters": {"moods": ["Cozy"]},
            "dismissed": ["b"]
        }"#;

        let file = SessionFile::from_json_str("inline", json).unwrap();
        let state = file.clone().into_state(&index).unwrap();
        assert_eq!(state.rating_count(), 2);
        assert_eq!(state.filters.moods, vec!["Cozy"]);
        assert!(state.is_dismissed("b"));

        assert_eq!(SessionFile::from_state(&state), file);
    }

    #[test]
    fn test_session_file_errors() {
        let index = TitleIndex::new();
        let file = SessionFile::from_json_str("inline", r#"{"ratings": [{"id": "x", "userRating": 1}]}"#).unwrap();
        assert!(matches!(file.into_state(&index), Err(SessionError::UnknownTitle(ref id)) if id == "x"));

        let err = SessionFile::from_json_str("bad.json", "[").unwrap_err();
        assert!(err.to_string().contains("bad.json"));

        let missing = SessionFile::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(missing, SessionError::FileNotFound { .. }));
    }
}
