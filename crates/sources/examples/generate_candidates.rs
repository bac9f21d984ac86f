//! Example: Generate candidates for a handful of ratings
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! This example shows how to:
//! 1. Load the title catalog
//! 2. Build a taste profile from ratings
//! 3. Generate seed-based and mood-based candidates
//! 4. Pick calibration titles

use catalog::{Filters, RatedTitle, TitleIndex};
use sources::{build_profile, CatalogSource, DEFAULT_CALIBRATION_COUNT};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== Reel Match Candidate Generation Example ===\n");

    println!("Loading title catalog...");
    let start = Instant::now();
    let index = Arc::new(TitleIndex::load_from_files(Path::new("data/catalog"))?);
    println!("Loaded catalog in {:?}\n", start.elapsed());

    // Rate the three best rated titles with descending stars
    let rated: Vec<RatedTitle> = index
        .top_rated(3)
        .into_iter()
        .zip([5, 4, 3])
        .map(|(title, stars)| RatedTitle::new(title.clone(), stars))
        .collect();

    let profile = build_profile(&rated);
    println!("Taste profile:");
    for (genre, weight) in profile.top_genres(5) {
        println!("  {:<12} {:.2}", genre, weight);
    }
    println!("  Avg rating: {:.2}\n", profile.avg_rating);

    let source = CatalogSource::new(index.clone());
    let seeds: Vec<String> = rated.iter().map(|r| r.title.id.clone()).collect();
    let services = vec!["Netflix".to_string()];

    let start = Instant::now();
    let seeded = source.get_candidates(&seeds, &Filters::new(), &services);
    println!("Seed-based: {} candidates in {:?}", seeded.len(), start.elapsed());

    let filters = Filters::new().with_moods(&["Cozy"]);
    let start = Instant::now();
    let with_mood = source.get_candidates(&seeds, &filters, &services);
    println!("With Cozy mood: {} candidates in {:?}", with_mood.len(), start.elapsed());

    println!("\nCalibration titles:");
    let mut rng = rand::rng();
    for title in source.calibration_titles(DEFAULT_CALIBRATION_COUNT, &mut rng) {
        println!("  {} [{}]", title.title, title.genres.join(", "));
    }

    Ok(())
}
