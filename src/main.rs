//! # Itinera CLI
//!
//! Usage:
//!   itinera trip.json                 writes ./{destination}_Itinerary.pdf
//!   itinera trip.json -o plan.pdf
//!   cat trip.json | itinera -d out/
//!   itinera --example > trip.json

use std::{process, str::FromStr};

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use itinera::cli::{self, Args};

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    match cli::run(&args) {
        Ok(Some(path)) => {
            info!(path = path.display().to_string(); "Completed successfully");
        }
        Ok(None) => {}
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    }
}
