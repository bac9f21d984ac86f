//! Streaming availability lookup.
//!
//! There is no real availability data behind the wizard: every title is
//! treated as streaming on every service the user selected.

use catalog::Title;

/// Services a title can be watched on, restricted to the user's selection.
///
/// Stub: returns `services` unchanged regardless of the title.
pub fn streaming_availability(_title: &Title, services: &[String]) -> Vec<String> {
    services.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_selected_services() {
        let title = Title::new("tt1", "Anything");
        let services = vec!["Netflix".to_string(), "Hulu".to_string()];

        assert_eq!(streaming_availability(&title, &services), services);
        assert!(streaming_availability(&title, &[]).is_empty());
    }
}
