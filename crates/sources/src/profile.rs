//! Build a taste profile from rated titles.
//!
//! Every non-zero rating contributes `rating / 5` to each of the title's
//! genres, to its runtime bucket, and to its lead actors and directors.

use crate::types::UserPreferences;
use catalog::{MAX_USER_RATING, RatedTitle};
use tracing::debug;

/// Build a UserPreferences profile from the user's rated titles
///
/// - Titles rated 0 ("never seen") are skipped entirely
/// - `weight = user_rating / 5.0`
/// - Each genre, the runtime bucket (if known), the first three actors and
///   every director accumulate `weight`
/// - `avg_rating` is the mean of the non-zero ratings, 0 if there are none
///
/// Returns the zero profile for an empty or all-unseen input.
pub fn build_profile(rated_titles: &[RatedTitle]) -> UserPreferences {
    let mut profile = UserPreferences::new();

    let mut total_rating: u32 = 0;
    let mut rating_count: u32 = 0;

    for rated in rated_titles.iter().filter(|r| r.is_seen()) {
        let weight = f64::from(rated.user_rating) / f64::from(MAX_USER_RATING);
        let title = &rated.title;

        for genre in &title.genres {
            *profile.genres.entry(genre.clone()).or_insert(0.0) += weight;
        }

        if let Some(bucket) = title.runtime_bucket() {
            profile.runtimes.add(bucket, weight);
        }

        for person in title.talent() {
            *profile.talents.entry(person.clone()).or_insert(0.0) += weight;
        }

        total_rating += u32::from(rated.user_rating);
        rating_count += 1;
    }

    if rating_count > 0 {
        profile.avg_rating = f64::from(total_rating) / f64::from(rating_count);
    }

    debug!(
        "Built profile from {} of {} ratings ({} genres, {} talents)",
        rating_count,
        rated_titles.len(),
        profile.genres.len(),
        profile.talents.len()
    );

    profile
}
