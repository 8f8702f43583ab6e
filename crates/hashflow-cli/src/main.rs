//! Hashflow CLI main entry point

use anyhow::{Context, Result};
use clap::Parser;
use hashflow_cli::{Cli, Driver};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open input {}", cli.input.display()))?;
    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create output {}", cli.output.display()))?;

    let mut driver = Driver::new(&config, cli.format)?.strict(cli.strict);
    let summary = driver.run(BufReader::new(input), BufWriter::new(output))?;

    info!(
        "{} records: {} admitted, {} rejected, {} skipped",
        summary.records, summary.admitted, summary.rejected, summary.skipped
    );
    Ok(())
}
