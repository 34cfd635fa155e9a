//! Pixfit CLI - Batch image converter.
//!
//! Fits images onto a fixed-size canvas with aspect-preserving "contain"
//! scaling, re-encodes them as WebP, PNG, or JPEG, and writes the results as
//! individual files or a single ZIP archive.
//!
//! # Usage
//!
//! ```bash
//! # Convert a folder of JPEGs to 200x200 WebP
//! pixfit convert ./photos/
//!
//! # PNG thumbnails at 512x512, bundled into a ZIP
//! pixfit convert ./photos/ --width 512 --height 512 --format png --archive
//!
//! # View configuration
//! pixfit config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Pixfit - Batch image converter with contain-fit resizing.
#[derive(Parser, Debug)]
#[command(name = "pixfit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert images to a fixed canvas size and format
    Convert(cli::convert::ConvertArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match pixfit_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pixfit config path`."
            );
            pixfit_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Pixfit v{}", pixfit_core::VERSION);

    match cli.command {
        Commands::Convert(args) => cli::convert::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
