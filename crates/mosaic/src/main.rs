//! Mosaic command-line interface.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use mosaic::{MosaicConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs)?;

    let config = MosaicConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { modality, file } => {
            cli::handle_normalize_command(&config, modality, &file).await
        }
        Commands::Sweep => cli::handle_sweep_command(&config),
        Commands::Encode { file } => cli::handle_encode_command(&file),
        Commands::CheckKey { key } => cli::handle_check_key_command(&key),
    }
}
