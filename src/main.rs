//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `post_tracker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Running the REST API or printing lookups as JSON
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use post_tracker::config::{Command, Opt};
use post_tracker::initialization::init_logger_with;
use post_tracker::server::{start_server, AppState, TrackingResponse};
use post_tracker::{Config, Tracker};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory, else next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let config = Config::from(&opt);
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let tracker = Tracker::new(config);

    match opt.command {
        Command::Serve { host, port } => {
            if let Err(e) = start_server(&host, port, AppState::new(tracker)).await {
                eprintln!("post_tracker error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
        Command::Track {
            tracking_numbers,
            demo,
            flight_only,
        } => {
            let results = tracker.track_batch(tracking_numbers, demo).await;
            let failed = results.iter().filter(|r| !r.is_success()).count();
            let responses: Vec<TrackingResponse> = results
                .into_iter()
                .map(|result| TrackingResponse::from_result(result, flight_only))
                .collect();

            let output = serde_json::to_string_pretty(&responses)
                .context("Failed to serialize tracking results")?;
            println!("{}", output);

            if failed > 0 {
                process::exit(1);
            }
            Ok(())
        }
    }
}
