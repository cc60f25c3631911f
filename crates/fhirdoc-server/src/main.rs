mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fhirdoc_core::FhirVersion;
use fhirdoc_server::AppState;
use fhirdoc_server::config::loader::{DEFAULT_CONFIG_FILE, load_config};

use cli::{Cli, Commands, ConfigCommands};
use output::print_error;

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    fhirdoc_server::init_tracing_with_level("warn");

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();

    let config = load_config(cli.config.as_deref()).map_err(anyhow::Error::msg)?;
    fhirdoc_server::apply_logging_level(&config.logging.level);
    tracing::debug!(
        path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE),
        "Configuration loaded"
    );

    if let Commands::Config(ConfigCommands::Show) = &cli.command {
        println!(
            "{}: {}",
            "Config".cyan(),
            cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE)
        );
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    commands::ensure_persistent(config.storage.backend, &cli.command)?;
    let state = AppState::from_config(config).await?;
    let version = match &cli.fhir_version {
        Some(raw) => raw
            .parse::<FhirVersion>()
            .with_context(|| format!("Invalid --fhir-version \"{raw}\""))?,
        None => state.default_version(),
    };

    match &cli.command {
        Commands::Organization(command) => {
            commands::organization::run(&state, command, format).await?;
        }
        Commands::Observation(command) => {
            commands::observation::run(&state, command, version, format).await?;
        }
        Commands::Config(_) => {}
    }
    Ok(())
}
