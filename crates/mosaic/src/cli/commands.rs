//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use mosaic::Modality;
use std::path::PathBuf;

/// Inspect responses and manage scratch storage for the Mosaic core.
#[derive(Debug, Parser)]
#[command(name = "mosaic", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./mosaic.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize and materialize a saved backend response, printing the result as JSON
    Normalize {
        /// Modality the response answers (text, image, video)
        #[arg(long)]
        modality: Modality,
        /// File holding the raw JSON response
        file: PathBuf,
    },
    /// Delete artifact files left in the scratch directory by earlier runs
    Sweep,
    /// Print a file as standard base64
    Encode {
        /// File to encode
        file: PathBuf,
    },
    /// Check whether a credential has an accepted shape
    CheckKey {
        /// The credential
        key: String,
    },
}
