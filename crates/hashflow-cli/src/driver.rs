//! # Stream Driver
//!
//! Feeds parsed tweets to a sliding window in read order and writes one
//! reading per admitted tweet.

use crate::commands::OutputFormat;
use anyhow::{Context, Result};
use hashflow_core::{GraphSnapshot, HashflowConfig, SlidingWindow};
use hashflow_ingest::TweetReader;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read
    pub records: usize,
    /// Lines without a tweet or with a malformed one
    pub skipped: usize,
    /// Tweets inside the window when they arrived
    pub admitted: usize,
    /// Tweets not newer than the window floor
    pub rejected: usize,
}

/// Drives a [`SlidingWindow`] from a tweet stream
pub struct Driver {
    window: SlidingWindow,
    decimals: u32,
    format: OutputFormat,
    strict: bool,
}

impl Driver {
    pub fn new(config: &HashflowConfig, format: OutputFormat) -> Result<Self> {
        let window = SlidingWindow::from_config(&config.window).context("invalid window configuration")?;
        let decimals = config
            .output
            .validated_decimals()
            .context("invalid output configuration")?;
        Ok(Self {
            window,
            decimals,
            format,
            strict: false,
        })
    }

    /// Fail on malformed records instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// Process every line of `input`, writing readings to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<RunSummary> {
        info!(
            "processing tweets with a {}s window",
            self.window.window_duration().num_seconds()
        );
        let mut summary = RunSummary::default();

        for item in TweetReader::new(input) {
            summary.records += 1;
            let event = match item {
                Ok(Some(event)) => event,
                Ok(None) => {
                    summary.skipped += 1;
                    continue;
                }
                Err(e) if self.strict => return Err(e).context("malformed input"),
                Err(e) => {
                    warn!("skipping record: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            if !self.window.admit(event).is_admitted() {
                summary.rejected += 1;
                continue;
            }
            summary.admitted += 1;
            self.write_reading(&mut output)?;
        }

        output.flush().context("failed to flush output")?;
        debug!("{:?}", summary);
        Ok(summary)
    }

    fn write_reading<W: Write>(&self, output: &mut W) -> Result<()> {
        let graph = self.window.graph();
        let average = graph.average_degree_with_precision(self.decimals);
        match self.format {
            OutputFormat::Text => {
                writeln!(output, "{:.*}", self.decimals as usize, average)?;
            }
            OutputFormat::Json => {
                let snapshot = GraphSnapshot {
                    nodes: graph.number_of_nodes(),
                    edges: graph.number_of_edges(),
                    average_degree: average,
                };
                serde_json::to_writer(&mut *output, &snapshot)?;
                writeln!(output)?;
            }
        }
        Ok(())
    }
}
