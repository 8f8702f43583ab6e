//! Raw tweet records as they appear in the streaming API dump

use serde::{Deserialize, Serialize};

/// The subset of a tweet needed to build an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetRecord {
    pub created_at: String,
    #[serde(default)]
    pub entities: Option<Entities>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hashtag {
    pub text: String,
}

impl TweetRecord {
    /// Hashtag texts in record order, duplicates included
    pub fn hashtags(&self) -> impl Iterator<Item = &str> + '_ {
        self.entities
            .iter()
            .flat_map(|e| e.hashtags.iter())
            .map(|h| h.text.as_str())
    }
}

/// Whether a decoded JSON line is a tweet rather than a control message
pub fn is_tweet(value: &serde_json::Value) -> bool {
    value.get("created_at").is_some()
}
