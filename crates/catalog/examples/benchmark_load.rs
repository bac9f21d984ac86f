use catalog::TitleIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/catalog");

    println!("Loading title catalog...\n");

    let start = Instant::now();
    let index = TitleIndex::load_from_files(data_dir)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let (titles, samples) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Titles: {}", titles);
    println!("Calibration samples: {}", samples);
    println!("Top rated:");
    for title in index.top_rated(5) {
        println!("  {} ({:?})", title.title, title.rating);
    }
}
