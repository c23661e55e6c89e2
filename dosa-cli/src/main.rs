//! CLI for origin/destination flow classification over user-drawn map regions.
//!
//! Provides:
//! - `classify`: run one pass over an edge file and report the aggregate matrix
//! - `synth`: generate a random, reproducible edge file

mod classify;
mod dataset;
mod synth;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;

use dosa_core::{parse_log_level, Rect};

use crate::classify::{parse_corners, ClassifyArgs};
use crate::synth::SynthConfig;

#[derive(Parser)]
#[command(name = "dosa")]
#[command(about = "Classify origin/destination flows by map regions", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DOSA_BUILD_SHA"), ")"))]
struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an edge file against a set of regions
    Classify(ClassifyArgs),

    /// Generate a synthetic edge file
    Synth {
        /// Number of edges
        #[arg(short, long, default_value = "100000")]
        count: usize,

        /// Number of distinct airports
        #[arg(short, long, default_value = "200")]
        airports: usize,

        /// Bounding box as `x0,y0,x1,y1`
        #[arg(short, long, default_value = "-25,72,45,34", allow_hyphen_values = true)]
        bbox: String,

        /// First flight date
        #[arg(long, default_value = "2019-01-01")]
        start: NaiveDate,

        /// Number of days flights are spread over
        #[arg(short, long, default_value = "31")]
        days: u64,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output file (JSON; gzipped if it ends in `.gz`)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logs(level: Option<&str>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if level.is_some() {
        builder.filter_level(parse_log_level(level)?);
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logs(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Classify(args) => classify::run(args),
        Commands::Synth { count, airports, bbox, start, days, seed, output } => {
            let corners = parse_corners(&bbox).context("parsing --bbox")?;
            let bbox = Rect::try_from(corners).context("invalid --bbox")?;
            let config = SynthConfig { count, airports, bbox, start, days, seed };
            let edges = synth::synth(&config)?;
            dataset::write_json(&output, &edges)?;
            info!("wrote {} edges over {} airports to {}", edges.len(), airports, output.display());
            Ok(())
        }
    }
}
