//! # Co-occurrence Graph
//!
//! Undirected hashtag graph with edge multiplicities. Every eligible event
//! contributes one vertex membership per tag and one unit of multiplicity per
//! tag pair, recorded under the key it was inserted with; retracting the key
//! takes exactly those contributions back.

use crate::math::truncated_ratio;
use crate::model::{Event, EventKey, Tag};
use crate::vertex::Vertex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Number of decimals kept by [`Graph::average_degree`]
pub const DEFAULT_DEGREE_DECIMALS: u32 = 2;

/// Unordered pair of distinct tags, normalized so that `first() < second()`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagPair(Tag, Tag);

impl TagPair {
    pub fn new(a: Tag, b: Tag) -> Self {
        if a <= b {
            TagPair(a, b)
        } else {
            TagPair(b, a)
        }
    }

    pub fn first(&self) -> &Tag {
        &self.0
    }

    pub fn second(&self) -> &Tag {
        &self.1
    }
}

impl fmt::Display for TagPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.0, self.1)
    }
}

/// Point-in-time graph measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: usize,
    pub edges: usize,
    pub average_degree: f64,
}

/// Hashtag co-occurrence graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Live vertices keyed by tag
    vertices: HashMap<Tag, Vertex>,
    /// Edge multiplicities, one entry per unordered pair
    edges: HashMap<TagPair, usize>,
    /// Tags each inserted event contributed
    members: HashMap<EventKey, Vec<Tag>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one event's vertices and edges under `key`.
    ///
    /// Ineligible events are ignored, as is a key that is already inserted.
    /// Returns whether the graph changed.
    pub fn insert(&mut self, key: EventKey, event: &Event) -> bool {
        if !event.is_eligible() || self.members.contains_key(&key) {
            return false;
        }

        for tag in event.tags() {
            let vertex = self.vertices.entry(tag.clone()).or_insert_with(|| {
                trace!("vertex {} created", tag);
                Vertex::new(tag.clone())
            });
            vertex.add(key, event);
        }

        for (a, b) in event.tag_pairs() {
            let count = self.edges.entry(TagPair::new(a.clone(), b.clone())).or_insert(0);
            *count += 1;
            if *count == 1 {
                trace!("edge {} <-> {} created", a, b);
                self.link(a, b);
            }
        }

        self.members.insert(key, event.tags().iter().cloned().collect());
        true
    }

    /// Take back everything the event inserted under `key` contributed.
    ///
    /// Unknown and already retracted keys change nothing. Returns whether the
    /// graph changed.
    pub fn retract(&mut self, key: EventKey) -> bool {
        let Some(tags) = self.members.remove(&key) else {
            return false;
        };

        // Edges first: unlinking needs both endpoints still present.
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                let pair = TagPair::new(a.clone(), b.clone());
                let Some(count) = self.edges.get_mut(&pair) else {
                    continue;
                };
                *count -= 1;
                if *count == 0 {
                    self.edges.remove(&pair);
                    trace!("edge {} dropped", pair);
                    self.unlink(a, b);
                }
            }
        }

        for tag in &tags {
            let emptied = match self.vertices.get_mut(tag) {
                Some(vertex) => {
                    vertex.remove(key);
                    vertex.is_empty()
                }
                None => false,
            };
            if emptied {
                self.vertices.remove(tag);
                trace!("vertex {} dropped", tag);
            }
        }
        true
    }

    /// Whether an event is currently inserted under `key`
    pub fn contains(&self, key: EventKey) -> bool {
        self.members.contains_key(&key)
    }

    pub fn number_of_nodes(&self) -> usize {
        self.vertices.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Sum of distinct-neighbor counts over all vertices
    pub fn total_degree(&self) -> usize {
        self.edges.len() * 2
    }

    /// Average distinct-neighbor degree truncated to two decimals
    pub fn average_degree(&self) -> f64 {
        self.average_degree_with_precision(DEFAULT_DEGREE_DECIMALS)
    }

    /// Average degree truncated (never rounded) to `decimals` digits
    pub fn average_degree_with_precision(&self, decimals: u32) -> f64 {
        truncated_ratio(self.total_degree(), self.number_of_nodes(), decimals)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.number_of_nodes(),
            edges: self.number_of_edges(),
            average_degree: self.average_degree(),
        }
    }

    pub fn vertex(&self, tag: &str) -> Option<&Vertex> {
        self.vertices.get(tag)
    }

    pub fn contains_vertex(&self, tag: &str) -> bool {
        self.vertices.contains_key(tag)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// Distinct live neighbors of `tag`; 0 for unknown tags
    pub fn degree(&self, tag: &str) -> usize {
        self.vertices.get(tag).map_or(0, Vertex::degree)
    }

    /// Number of admitted events carrying both tags
    pub fn multiplicity(&self, a: &str, b: &str) -> usize {
        self.edges
            .get(&TagPair::new(Tag::from(a), Tag::from(b)))
            .copied()
            .unwrap_or(0)
    }

    /// Live edges with their multiplicities
    pub fn edges(&self) -> impl Iterator<Item = (&TagPair, usize)> + '_ {
        self.edges.iter().map(|(pair, count)| (pair, *count))
    }

    fn link(&mut self, a: &Tag, b: &Tag) {
        if let Some(vertex) = self.vertices.get_mut(a) {
            vertex.link(b.clone());
        }
        if let Some(vertex) = self.vertices.get_mut(b) {
            vertex.link(a.clone());
        }
    }

    fn unlink(&mut self, a: &Tag, b: &Tag) {
        if let Some(vertex) = self.vertices.get_mut(a) {
            vertex.unlink(b);
        }
        if let Some(vertex) = self.vertices.get_mut(b) {
            vertex.unlink(a);
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nodes: {} Edges: {} Average degree: {:.2}",
            self.number_of_nodes(),
            self.number_of_edges(),
            self.average_degree()
        )
    }
}
