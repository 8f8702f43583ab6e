//! # Event Buffer
//!
//! Time-ordered storage for the events currently inside the window.

use crate::model::{Event, EventKey};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Ordered-by-creation-time event container driven by the sliding window
pub trait EventBuffer {
    /// Insert an event at its chronological position. Events with equal
    /// timestamps are ordered by key.
    fn insert(&mut self, key: EventKey, event: Event);

    /// Number of leading events with `created_at <= floor`
    fn expired_len(&self, floor: DateTime<Utc>) -> usize;

    /// Remove and return the leading events with `created_at <= floor`,
    /// oldest first
    fn drain_expired(&mut self, floor: DateTime<Utc>) -> Vec<(EventKey, Event)>;

    /// Most recent event
    fn latest(&self) -> Option<&Event>;

    /// Events and their keys in chronological order
    fn iter(&self) -> Box<dyn Iterator<Item = (EventKey, &Event)> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`EventBuffer`] backed by a B-tree keyed on `(created_at, key)`
#[derive(Debug, Clone, Default)]
pub struct SortedEventBuffer {
    events: BTreeMap<(DateTime<Utc>, EventKey), Event>,
}

impl SortedEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the first entry strictly newer than `floor`
    fn cutoff(floor: DateTime<Utc>) -> (DateTime<Utc>, EventKey) {
        (floor, EventKey(u64::MAX))
    }
}

impl EventBuffer for SortedEventBuffer {
    fn insert(&mut self, key: EventKey, event: Event) {
        self.events.insert((event.created_at(), key), event);
    }

    fn expired_len(&self, floor: DateTime<Utc>) -> usize {
        self.events.range(..=Self::cutoff(floor)).count()
    }

    fn drain_expired(&mut self, floor: DateTime<Utc>) -> Vec<(EventKey, Event)> {
        // split_off keeps the expired prefix in `self.events`
        let retained = self.events.split_off(&Self::cutoff(floor));
        let expired = std::mem::replace(&mut self.events, retained);
        expired.into_iter().map(|((_, key), event)| (key, event)).collect()
    }

    fn latest(&self) -> Option<&Event> {
        self.events.values().next_back()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (EventKey, &Event)> + '_> {
        Box::new(self.events.iter().map(|((_, key), event)| (*key, event)))
    }

    fn len(&self) -> usize {
        self.events.len()
    }
}
