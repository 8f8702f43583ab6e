//! Graph vertex: one hashtag and the events currently referencing it

use crate::model::{Event, EventId, EventKey, Tag};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Position of an event inside a vertex: creation time, then arrival order
type Slot = (DateTime<Utc>, EventKey);

/// A hashtag vertex.
///
/// Holds an ordered multiset of the events that mention the tag and the set of
/// distinct neighbors it currently shares an edge with. A vertex with no
/// events is dead and must be dropped by its graph.
#[derive(Debug, Clone)]
pub struct Vertex {
    tag: Tag,
    events: BTreeMap<Slot, EventId>,
    slots: HashMap<EventKey, DateTime<Utc>>,
    neighbors: HashSet<Tag>,
}

impl Vertex {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            events: BTreeMap::new(),
            slots: HashMap::new(),
            neighbors: HashSet::new(),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Add an event under `key`. Returns false if the key is already listed.
    pub fn add(&mut self, key: EventKey, event: &Event) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }
        self.events.insert((event.created_at(), key), event.id());
        self.slots.insert(key, event.created_at());
        true
    }

    /// Remove the event listed under `key`. Returns false if it was not listed.
    pub fn remove(&mut self, key: EventKey) -> bool {
        match self.slots.remove(&key) {
            Some(created_at) => {
                self.events.remove(&(created_at, key));
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: EventKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Event ids ordered by creation time, ties by arrival
    pub fn events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events.values().copied()
    }

    /// Number of events referencing this tag
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Distinct live neighbors
    pub fn neighbors(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.neighbors.iter()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn link(&mut self, neighbor: Tag) {
        self.neighbors.insert(neighbor);
    }

    pub(crate) fn unlink(&mut self, neighbor: &str) {
        self.neighbors.remove(neighbor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 24, 17, 51, secs).unwrap()
    }

    #[test]
    fn test_vertex_orders_events_by_creation_time() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        vertex.add(EventKey(0), &Event::new(1, at(30), ["Apache", "Spark"]));
        vertex.add(EventKey(1), &Event::new(2, at(10), ["Apache", "Hadoop"]));
        vertex.add(EventKey(2), &Event::new(3, at(20), ["Apache", "Storm"]));

        let order: Vec<EventId> = vertex.events().collect();
        assert_eq!(order, vec![EventId(2), EventId(3), EventId(1)]);
    }

    #[test]
    fn test_vertex_breaks_ties_by_arrival() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        vertex.add(EventKey(0), &Event::new(9, at(10), ["Apache", "Spark"]));
        vertex.add(EventKey(1), &Event::new(4, at(10), ["Apache", "Hadoop"]));

        let order: Vec<EventId> = vertex.events().collect();
        assert_eq!(order, vec![EventId(9), EventId(4)]);
    }

    #[test]
    fn test_vertex_ignores_duplicate_key() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        let event = Event::new(1, at(10), ["Apache", "Spark"]);
        assert!(vertex.add(EventKey(0), &event));
        assert!(!vertex.add(EventKey(0), &event));
        assert_eq!(vertex.len(), 1);
    }

    #[test]
    fn test_vertex_lists_events_with_equal_ids_separately() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        assert!(vertex.add(EventKey(0), &Event::new(7, at(10), ["Apache", "Spark"])));
        assert!(vertex.add(EventKey(1), &Event::new(7, at(11), ["Apache", "Kafka"])));
        assert_eq!(vertex.len(), 2);

        assert!(vertex.remove(EventKey(0)));
        assert!(vertex.contains(EventKey(1)));
        assert_eq!(vertex.len(), 1);
    }

    #[test]
    fn test_vertex_remove() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        let first = Event::new(1, at(10), ["Apache", "Spark"]);
        let second = Event::new(2, at(10), ["Apache", "Spark"]);
        vertex.add(EventKey(0), &first);
        vertex.add(EventKey(1), &second);

        assert!(vertex.remove(EventKey(0)));
        assert!(!vertex.remove(EventKey(0)));
        assert!(!vertex.contains(EventKey(0)));
        assert!(vertex.contains(EventKey(1)));
        assert_eq!(vertex.len(), 1);

        assert!(vertex.remove(EventKey(1)));
        assert!(vertex.is_empty());
    }

    #[test]
    fn test_vertex_neighbors() {
        let mut vertex = Vertex::new(Tag::from("Apache"));
        vertex.link(Tag::from("Spark"));
        vertex.link(Tag::from("Spark"));
        vertex.link(Tag::from("Hadoop"));
        assert_eq!(vertex.degree(), 2);

        vertex.unlink("Spark");
        assert_eq!(vertex.degree(), 1);
        assert_eq!(vertex.neighbors().next().map(|t| t.to_string()), Some("Hadoop".to_string()));
    }
}
