use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use catalog::TitleIndex;
use pipeline::{MatchResult, OptionItem, PreferenceConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use server::{RecommendationOrchestrator, SessionFile, SessionState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Reel Match - mood-aware movie recommendations
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Movie recommendations from a few ratings and a mood", long_about = None)]
struct Cli {
    /// Directory holding titles.json (and optionally calibration.json)
    #[arg(short, long, default_value = "data/catalog")]
    catalog: PathBuf,

    /// Preference table overriding the built-in moods, tones, runtimes and extras
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable services, moods, tones, runtimes and extras
    Options,

    /// Pick titles to rate for taste calibration
    Calibrate {
        /// Number of titles to pick
        #[arg(long, default_value_t = sources::DEFAULT_CALIBRATION_COUNT)]
        count: usize,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search for titles by name
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Show the taste profile a session implies
    Profile {
        /// Session file (services, ratings, filters)
        #[arg(long)]
        session: PathBuf,
    },

    /// Get recommendations for a session
    Recommend {
        /// Session file (services, ratings, filters)
        #[arg(long)]
        session: PathBuf,

        /// Number of recommendations to return
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show the reason for each match
        #[arg(long)]
        explain: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run concurrent recommendation requests and report latencies
    Benchmark {
        /// Session file used for every request
        #[arg(long)]
        session: PathBuf,

        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Using preference config from {}", path.display());
            PreferenceConfig::from_json_file(path)
                .with_context(|| format!("Failed to load preference config {}", path.display()))?
        }
        None => PreferenceConfig::default(),
    };
    let config = Arc::new(config);

    if let Commands::Options = cli.command {
        print_options(&config);
        return Ok(());
    }

    println!("Loading title catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let title_index = Arc::new(
        TitleIndex::load_from_files(&cli.catalog).context("Failed to load title catalog")?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let orchestrator = RecommendationOrchestrator::new(title_index, config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Options => {}
        Commands::Calibrate { count, seed } => handle_calibrate(&orchestrator, count, seed),
        Commands::Search { title } => handle_search(&orchestrator, &title),
        Commands::Profile { session } => handle_profile(&orchestrator, &session)?,
        Commands::Recommend {
            session,
            limit,
            explain,
            json,
        } => handle_recommend(&orchestrator, &session, limit, explain, json).await?,
        Commands::Benchmark { session, requests } => {
            handle_benchmark(&orchestrator, &session, requests).await?
        }
    }

    Ok(())
}

fn load_session(orchestrator: &RecommendationOrchestrator, path: &Path) -> Result<SessionState> {
    SessionFile::load(path)
        .and_then(|file| file.into_state(orchestrator.title_index()))
        .with_context(|| format!("Failed to load session {}", path.display()))
}

/// Handle the 'options' command
fn print_options(config: &PreferenceConfig) {
    let sections: [(&str, &[OptionItem]); 5] = [
        ("Streaming services", &config.options.streaming_services),
        ("Moods", &config.options.moods),
        ("Tones", &config.options.tones),
        ("Runtimes", &config.options.runtimes),
        ("Extras", &config.options.extras),
    ];

    for (heading, items) in sections {
        println!("{}", heading.bold().blue());
        for item in items {
            if item.id == item.label {
                println!("  {} {}", "•".green(), item.id);
            } else {
                println!("  {} {} ({})", "•".green(), item.id, item.label.dimmed());
            }
        }
    }
}

/// Handle the 'calibrate' command
fn handle_calibrate(orchestrator: &RecommendationOrchestrator, count: usize, seed: Option<u64>) {
    let titles = match seed {
        Some(seed) => orchestrator.calibration_titles_with(count, &mut StdRng::seed_from_u64(seed)),
        None => orchestrator.calibration_titles(count),
    };

    println!("{}", "Rate these titles (0 = never seen, 1-5 stars):".bold().blue());
    for (batch_number, batch) in titles.chunks(server::session::CALIBRATION_BATCH_SIZE).enumerate() {
        println!("{}", format!("Batch {}", batch_number + 1).cyan());
        for title in batch {
            println!(
                "  {} {} ({}) [{}]",
                title.id.dimmed(),
                title.title,
                title.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string()),
                title.genres.join(", ")
            );
        }
    }
}

/// Handle the 'search' command
fn handle_search(orchestrator: &RecommendationOrchestrator, query: &str) {
    let results = orchestrator.search(query, 20);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if results.is_empty() {
        println!("  No titles found");
    }
    for title in results {
        println!(
            "{}: {} [{}] {}",
            title.id,
            title.title,
            title.genres.join(", "),
            title
                .known_rating()
                .map(|r| format!("{}/10", r))
                .unwrap_or_else(|| "unrated".to_string())
        );
    }
}

/// Handle the 'profile' command
fn handle_profile(orchestrator: &RecommendationOrchestrator, path: &Path) -> Result<()> {
    let session = load_session(orchestrator, path)?;
    let profile = orchestrator.profile(&session);

    println!("{}", "Taste profile".bold().blue());
    println!(
        "{}Ratings: {} ({} seen)",
        "• ".green(),
        session.rating_count(),
        session.meaningful_ratings().count()
    );
    println!("{}Average rating: {:.2}", "• ".green(), profile.avg_rating);
    println!(
        "{}Runtimes: short {:.2}, medium {:.2}, long {:.2}",
        "• ".green(),
        profile.runtimes.short,
        profile.runtimes.medium,
        profile.runtimes.long
    );

    println!("Top genres:");
    for (genre, weight) in profile.top_genres(5) {
        println!("  - {}: {:.2}", genre, weight);
    }
    println!("Top talent:");
    for (person, weight) in profile.top_talents(5) {
        println!("  - {}: {:.2}", person, weight);
    }

    if let Err(e) = session.ensure_ready() {
        println!("{} {}", "!".yellow(), e);
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    path: &Path,
    limit: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    let session = load_session(orchestrator, path)?;
    let matches = orchestrator.get_recommendations(&session, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_recommendations(&matches, explain);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: &RecommendationOrchestrator,
    path: &Path,
    requests: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("Benchmark needs at least one request"));
    }
    let session = Arc::new(load_session(orchestrator, path)?);

    // Use tokio::spawn to make concurrent requests
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for _ in 0..requests {
        let orchestrator = orchestrator.clone();
        let session = session.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            orchestrator.get_recommendations(&session, 20).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        requests as f64 / wall_time.as_secs_f64()
    );

    Ok(())
}

/// Format and print ranked matches
fn print_recommendations(matches: &[MatchResult], explain: bool) {
    println!("{}", "Your matches:".bold().blue());
    if matches.is_empty() {
        println!("  Nothing matched. Try loosening your filters.");
    }

    for (i, result) in matches.iter().enumerate() {
        let title = &result.title;
        let score = format!("{}%", result.match_score);
        let score = match result.match_score {
            70.. => score.green(),
            40..70 => score.yellow(),
            _ => score.red(),
        };

        println!(
            "{}. {} ({}) [{}] - Match: {}",
            (i + 1).to_string().green(),
            title.title,
            title.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string()),
            title.genres.join(", "),
            score
        );
        if explain {
            println!("   {}", result.match_reason);
            if !title.streaming_services.is_empty() {
                println!("   On: {}", title.streaming_services.join(", ").dimmed());
            }
        }
    }
}
