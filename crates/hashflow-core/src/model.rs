//! Event data model for the hashtag co-occurrence graph

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Twitter's `created_at` layout, e.g. `Thu Mar 24 17:51:10 +0000 2016`
pub const TWITTER_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Hashtag text. Shared between events, vertices and edge keys.
pub type Tag = Arc<str>;

/// Caller-supplied event label, e.g. the record number of a parsed tweet.
/// Not required to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of one admitted event inside a graph and its vertices.
///
/// Handed out in arrival order by [`SlidingWindow`](crate::SlidingWindow), so
/// distinct admissions never share a key even when their [`EventId`]s collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey(pub u64);

/// Errors raised while building an event from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

/// An immutable timestamped set of hashtags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    created_at: DateTime<Utc>,
    tags: BTreeSet<Tag>,
}

impl Event {
    /// Create an event, collapsing duplicate tags (case-sensitive)
    pub fn new<I, S>(id: u64, created_at: DateTime<Utc>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: EventId(id),
            created_at,
            tags: tags.into_iter().map(|t| Tag::from(t.as_ref())).collect(),
        }
    }

    /// Create an event from a raw timestamp string
    pub fn parse<I, S>(id: u64, created_at: &str, tags: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let created_at = parse_timestamp(created_at)?;
        Ok(Self::new(id, created_at, tags))
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Distinct tags in lexical order
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Whether the event can produce at least one edge
    pub fn is_eligible(&self) -> bool {
        self.tags.len() > 1
    }

    /// All C(k,2) unordered pairs of distinct tags
    pub fn tag_pairs(&self) -> impl Iterator<Item = (&Tag, &Tag)> + '_ {
        self.tags
            .iter()
            .enumerate()
            .flat_map(move |(i, a)| self.tags.iter().skip(i + 1).map(move |b| (a, b)))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.tags.iter().map(|t| &**t).collect();
        write!(f, "{} [{}] at {}", self.id, tags.join(", "), self.created_at.to_rfc3339())
    }
}

/// Parse a Twitter or RFC 3339 timestamp into UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, EventError> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TWITTER_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| EventError::MalformedTimestamp(raw.to_string()))
}
