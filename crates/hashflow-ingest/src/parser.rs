//! # Tweet Parser
//!
//! Turns raw JSON lines into events, numbering them in read order.

use crate::record::{is_tweet, TweetRecord};
use hashflow_core::{Event, EventError};
use tracing::trace;

/// Errors raised while reading tweet records
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line}: malformed event: {source}")]
    MalformedEvent {
        line: usize,
        #[source]
        source: EventError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Input line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::Json { line, .. } | IngestError::MalformedEvent { line, .. } => Some(*line),
            IngestError::Io(_) => None,
        }
    }
}

/// Stateful line parser. Each instance numbers its own events from 0.
#[derive(Debug, Clone, Default)]
pub struct TweetParser {
    line: usize,
    next_id: u64,
}

impl TweetParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one input line.
    ///
    /// Blank lines and JSON objects without `created_at` (rate-limit notices
    /// and the like) yield `Ok(None)`.
    pub fn parse_line(&mut self, raw: &str) -> Result<Option<Event>, IngestError> {
        self.line += 1;
        let line = self.line;

        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| IngestError::Json { line, source })?;
        if !is_tweet(&value) {
            trace!("line {}: not a tweet, skipped", line);
            return Ok(None);
        }

        let record: TweetRecord =
            serde_json::from_value(value).map_err(|source| IngestError::Json { line, source })?;
        let event = Event::parse(self.next_id, &record.created_at, record.hashtags())
            .map_err(|source| IngestError::MalformedEvent { line, source })?;
        self.next_id += 1;
        Ok(Some(event))
    }

    /// Lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Events produced so far
    pub fn events_parsed(&self) -> u64 {
        self.next_id
    }
}
