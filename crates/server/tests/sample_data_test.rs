//! End-to-end run over the bundled sample catalog and session.

use catalog::TitleIndex;
use pipeline::PreferenceConfig;
use server::{RecommendationOrchestrator, SessionFile};
use std::path::PathBuf;
use std::sync::Arc;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn load_orchestrator() -> RecommendationOrchestrator {
    let index = TitleIndex::load_from_files(&data_dir().join("catalog")).unwrap();
    RecommendationOrchestrator::new(Arc::new(index), Arc::new(PreferenceConfig::default()))
}

#[test]
fn test_sample_catalog_loads() {
    let orchestrator = load_orchestrator();
    let (titles, samples) = orchestrator.title_index().counts();
    assert!(titles >= 15);
    assert!(samples > 0);
    assert!(orchestrator.title_index().get_title("tt4468740").is_some());
}

#[tokio::test]
async fn test_sample_session_recommendations() {
    let orchestrator = load_orchestrator();
    let session = SessionFile::load(&data_dir().join("session.json"))
        .unwrap()
        .into_state(orchestrator.title_index())
        .unwrap();
    assert!(session.ensure_ready().is_ok());

    let matches = orchestrator.get_recommendations(&session, 20).await.unwrap();
    assert!(!matches.is_empty());
    assert!(matches[0].match_score > 0);

    let cozy = ["Comedy".to_string(), "Romance".to_string(), "Family".to_string()];
    for pair in matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    for m in &matches {
        assert!(!session.is_dismissed(&m.title.id));
        assert!(m.match_reason.ends_with('.'));
        if m.match_score > 0 {
            assert!(m.title.shares_genre_with(&cozy), "{}", m.title.title);
            assert!(m.title.known_runtime().is_none_or(|minutes| minutes <= 120));
        }
    }
}
