//! Configuration management for the pixel grid validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Environment overrides for the server address (`HOST`, `PORT`)
//! - Project configuration from `pixel-grid.toml`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "pixel-grid.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the pixel grid validator
#[derive(Debug, Parser)]
#[command(name = "pixel-grid")]
#[command(about = "Validate pixel art character grids against a palette")]
#[command(version)]
pub struct Args {
    /// Explicit configuration file
    #[arg(long, global = true, help = "Path to a pixel-grid.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP validation service
    Serve(ServeArgs),
    /// Validate a grid file and print the result as JSON
    Check(CheckArgs),
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    #[arg(long, env = "HOST", help = "Address to bind (default 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on (default 3001)")]
    pub port: Option<u16>,
}

#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// File containing the grid text
    pub grid: PathBuf,

    #[arg(long, conflicts_with = "palette_file", help = "Palette characters, e.g. \"a,b,#\"")]
    pub palette: Option<String>,

    #[arg(long, help = "File containing the palette characters")]
    pub palette_file: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON result")]
    pub pretty: bool,
}

/// Contents of a `pixel-grid.toml` file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Address the HTTP service binds to
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub server: ServerConfig,
    /// Config file the values were read from, if any
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            server: ServerConfig::default(),
            config_path: None,
        }
    }
}

impl Config {
    /// Resolve configuration for parsed arguments
    ///
    /// Priority: command line / environment > config file > defaults.
    pub fn from_args(args: &Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        let file = match find_config_file(args.config.as_deref(), &cwd) {
            Some(path) => {
                let file = FileConfig::load(&path)?;
                Some((path, file))
            }
            None => None,
        };
        Ok(Self::merge(args, file))
    }

    /// Layer arguments over an already loaded config file
    pub fn merge(args: &Args, file: Option<(PathBuf, FileConfig)>) -> Self {
        let mut config = Config::default();

        if let Some((path, file)) = file {
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
            if let Some(host) = file.server.host {
                config.server.host = host;
            }
            if let Some(port) = file.server.port {
                config.server.port = port;
            }
            config.config_path = Some(path);
        }

        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        if let Command::Serve(serve) = &args.command {
            if let Some(host) = &serve.host {
                config.server.host = host.clone();
            }
            if let Some(port) = serve.port {
                config.server.port = port;
            }
        }

        config
    }
}

/// Locate the config file to load
///
/// An explicit path is always returned, so a missing file surfaces as an
/// error. Otherwise `pixel-grid.toml` in `cwd`, then
/// `<config dir>/pixel-grid/config.toml`, whichever exists first.
pub fn find_config_file(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join("pixel-grid").join("config.toml"))
        .filter(|path| path.is_file())
}
