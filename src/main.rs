use clap::{Parser, Subcommand};
use std::process::ExitCode;

use campus_run::metrics::MetricsOptions;
use campus_run::track::Track;
use campus_run::web::{run_server, Config};

#[derive(Parser)]
#[command(name = "campus-run")]
#[command(about = "Run distance, duration and pace from GPS tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print distance, duration and pace for a track file
    Summary {
        track: String,
        /// Ignore GPS segments shorter than this many metres
        #[arg(long, default_value_t = 0.0)]
        min_segment_m: f64,
    },
    /// Validate a track file
    Validate { track: String },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "campus-run.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            track,
            min_segment_m,
        } => summary(&track, min_segment_m),
        Commands::Validate { track } => validate(&track),
        Commands::Serve { config } => serve(&config),
    }
}

fn load(path: &str) -> Option<Track> {
    match Track::from_file(path) {
        Ok(track) => Some(track),
        Err(e) => {
            eprintln!("Error loading {}: {}", path, e);
            None
        }
    }
}

fn summary(path: &str, min_segment_m: f64) -> ExitCode {
    let Some(track) = load(path) else {
        return ExitCode::FAILURE;
    };

    let options = MetricsOptions {
        min_segment_km: min_segment_m / 1000.0,
        ..MetricsOptions::default()
    };

    match track.summary(&options) {
        Ok(summary) => {
            if let Some(name) = &track.name {
                println!("{}", name);
            }
            println!("Distance  {:.2} km", summary.distance_km);
            println!("Duration  {}", summary.duration);
            println!("Pace      {}/km", summary.pace);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(track) = load(path) else {
        return ExitCode::FAILURE;
    };

    println!(
        "Track is valid ({} samples, {}s)",
        track.samples.len(),
        track.duration_seconds()
    );
    if let (Some(first), Some(last)) = (track.samples.first(), track.samples.last()) {
        let span = |s: &campus_run::metrics::GeoSample| {
            s.captured_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| format!("{}ms", s.timestamp))
        };
        println!("  from {} to {}", span(first), span(last));
    }
    ExitCode::SUCCESS
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
