//! Server crate for the Reel Match recommendation wizard.
//!
//! This crate contains the wizard's session state and the orchestrator
//! that turns a session into ranked recommendations.

pub mod orchestrator;
pub mod session;

pub use orchestrator::RecommendationOrchestrator;
pub use session::{FilterAxis, SessionError, SessionFile, SessionState, MIN_RATINGS};
