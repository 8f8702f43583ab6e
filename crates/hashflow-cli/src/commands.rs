//! CLI argument definitions and configuration loading

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hashflow_core::HashflowConfig;
use std::path::{Path, PathBuf};

/// Main CLI structure
#[derive(Debug, Parser)]
#[command(name = "hashflow")]
#[command(about = "Rolling average degree of the hashtag co-occurrence graph of a tweet stream")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Input file with one tweet JSON object per line
    pub input: PathBuf,

    /// Output file, one reading per admitted tweet
    pub output: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Window length in seconds (overrides the configuration file)
    #[arg(short, long)]
    pub window_secs: Option<u64>,

    /// Digits after the decimal point (overrides the configuration file)
    #[arg(short, long)]
    pub decimals: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Abort on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Average degree only, e.g. `1.66`
    Text,
    /// One JSON object per line with nodes, edges and average degree
    Json,
}

impl Cli {
    /// Configuration file contents (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<HashflowConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => HashflowConfig::default(),
        };
        if let Some(window_secs) = self.window_secs {
            config.window.window_seconds = window_secs;
        }
        if let Some(decimals) = self.decimals {
            config.output.decimals = decimals;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Read a JSON configuration file
pub fn load_config(path: &Path) -> Result<HashflowConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_positional() {
        let cli = Cli::try_parse_from(["hashflow", "tweets.txt", "output.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("tweets.txt"));
        assert_eq!(cli.output, PathBuf::from("output.txt"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.strict);
        assert_eq!(cli.resolve_config().unwrap(), HashflowConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "hashflow", "in.txt", "out.txt", "--window-secs", "120", "--decimals", "3", "--format", "json",
            "--strict",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.window.window_seconds, 120);
        assert_eq!(config.output.decimals, 3);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.strict);
    }

    #[test]
    fn test_cli_rejects_out_of_range_decimals() {
        let cli = Cli::try_parse_from(["hashflow", "in.txt", "out.txt", "--decimals", "39"]).unwrap();
        let err = cli.resolve_config().unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));

        let cli = Cli::try_parse_from(["hashflow", "in.txt", "out.txt", "--decimals", "18"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap().output.decimals, 18);
    }

    #[test]
    fn test_cli_rejects_zero_window() {
        let cli = Cli::try_parse_from(["hashflow", "in.txt", "out.txt", "--window-secs", "0"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_cli_requires_both_paths() {
        assert!(Cli::try_parse_from(["hashflow", "in.txt"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::try_parse_from(["hashflow", "in.txt", "out.txt", "--config", "/nonexistent/hashflow.json"])
            .unwrap();
        let err = cli.resolve_config().unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
