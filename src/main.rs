//! # Lyrics Cutup CLI (`cutup`)
//!
//! The `cutup` binary is the primary interface for Lyrics Cutup. It provides
//! commands for database initialization, lyrics ingestion, cut-up phrase
//! generation, statistics, and starting the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! cutup --config ./config/cutup.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cutup init` | Create the SQLite database and run schema migrations |
//! | `cutup ingest` | Tokenize the lyrics directory and rebuild the phrase bank |
//! | `cutup generate` | Generate cut-up phrases with source attributions |
//! | `cutup stats` | Print phrase bank statistics |
//! | `cutup serve` | Start the JSON HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! cutup init --config ./config/cutup.toml
//!
//! # Ingest the configured lyrics directory
//! cutup ingest --config ./config/cutup.toml
//!
//! # Ten phrases, reproducibly
//! cutup generate --count 10 --seed 42
//!
//! # Serve the API for the frontend
//! cutup serve --config ./config/cutup.toml
//! ```

mod config;
mod corpus;
mod db;
mod error;
mod generator;
mod ingest;
mod migrate;
mod models;
mod scan;
mod server;
mod stats;
mod tokenizer;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lyrics Cutup CLI — a cut-up phrase generator for Japanese lyrics.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/cutup.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "cutup",
    about = "Lyrics Cutup — a cut-up phrase generator for Japanese lyrics",
    version,
    long_about = "Lyrics Cutup tokenizes a directory of Japanese lyrics files into a SQLite \
    phrase bank, then recombines randomly sampled phrases into novel short phrases with \
    source attributions, via a CLI and a JSON HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/cutup.toml`. The database path, lyrics
    /// directory, generation limits, and server bind address are all read
    /// from this file.
    #[arg(long, global = true, default_value = "./config/cutup.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `lyrics` and `phrases`
    /// tables. This command is idempotent — running it multiple times is
    /// safe.
    Init,

    /// Tokenize the lyrics directory and rebuild the phrase bank.
    ///
    /// Scans the configured directory, extracts phrase tokens from every
    /// file, and replaces the previous phrase bank in one transaction.
    /// Always a full rebuild, never incremental.
    Ingest {
        /// Dry run — show file and phrase counts without writing to the
        /// database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of files to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Generate cut-up phrases from the phrase bank.
    ///
    /// Each phrase recombines 2–4 randomly sampled phrase bank entries and
    /// lists the lyrics file each fragment came from.
    Generate {
        /// Number of phrases to generate. Defaults to the configured
        /// default; values above the configured maximum are clamped.
        #[arg(long)]
        count: Option<i64>,

        /// Seed the random generator for a reproducible batch.
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the API wire format (JSON) instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Print phrase bank statistics.
    ///
    /// Shows lyrics and phrase counts plus a per-file breakdown.
    Stats,

    /// Start the JSON HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// `POST /api/generate` for the frontend.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Ingest { dry_run, limit } => {
            ingest::run_ingest(&cfg, dry_run, limit).await?;
        }
        Commands::Generate { count, seed, json } => {
            generator::run_generate(&cfg, count, seed, json).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
