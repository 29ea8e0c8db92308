//! Command-line entry point
//!
//! `serve` runs the HTTP service; `check` validates a grid file offline.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{Args, CheckArgs, Command, Config};
use crate::server;
use crate::validation::{validate_grid_and_palette, ValidationResult};

pub async fn run() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();
    if let Some(path) = &config.config_path {
        log::debug!("Loaded configuration from {}", path.display());
    }

    match args.command {
        Command::Serve(_) => {
            server::serve(&config.server).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(check_args) => {
            let result = check(&check_args)?;
            let json = if check_args.pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
            Ok(if result.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Validate the grid (and palette) named by `check` arguments
pub fn check(args: &CheckArgs) -> Result<ValidationResult> {
    let grid = std::fs::read_to_string(&args.grid)
        .with_context(|| format!("Failed to read grid file: {}", args.grid.display()))?;

    let palette = match (&args.palette, &args.palette_file) {
        (Some(palette), _) => Some(palette.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read palette file: {}", path.display()))?,
        ),
        (None, None) => None,
    };

    Ok(validate_grid_and_palette(&grid, palette.as_deref()))
}
