//! # Sliding Window
//!
//! Keeps the co-occurrence graph restricted to the events of the trailing
//! event-time window. The window is anchored at the newest admitted event;
//! each admission may advance the floor and evict everything at or below it.

use crate::buffer::{EventBuffer, SortedEventBuffer};
use crate::config::{validate_window, ConfigError, WindowConfig};
use crate::graph::{Graph, GraphSnapshot};
use crate::model::{Event, EventKey};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Outcome of [`SlidingWindow::admit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The event is inside the window; `evicted` older events were dropped
    Admitted { evicted: usize },
    /// The event is not newer than the window floor and was ignored
    Rejected,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Co-occurrence graph over a trailing event-time window
#[derive(Debug, Clone)]
pub struct SlidingWindow<B = SortedEventBuffer> {
    graph: Graph,
    buffer: B,
    window: Duration,
    floor: DateTime<Utc>,
    next_key: u64,
}

impl SlidingWindow<SortedEventBuffer> {
    /// Create a window of the given positive length
    pub fn new(window: Duration) -> Result<Self, ConfigError> {
        Self::with_buffer(window, SortedEventBuffer::new())
    }

    pub fn from_config(config: &WindowConfig) -> Result<Self, ConfigError> {
        Self::new(config.duration()?)
    }
}

impl<B: EventBuffer> SlidingWindow<B> {
    /// Create a window over a caller-supplied buffer. Events already in the
    /// buffer are re-keyed in chronological order, added to the graph and
    /// then windowed like admitted events.
    pub fn with_buffer(window: Duration, mut buffer: B) -> Result<Self, ConfigError> {
        let window = validate_window(window)?;
        let seeded = buffer.drain_expired(DateTime::<Utc>::MAX_UTC);
        let mut this = Self {
            graph: Graph::new(),
            buffer,
            window,
            floor: DateTime::<Utc>::MIN_UTC,
            next_key: 0,
        };
        for (_, event) in seeded {
            this.push(event);
        }
        this.reset_floor();
        this.evict();
        Ok(this)
    }

    /// Offer one event to the window.
    ///
    /// Events not newer than the current floor are rejected without any
    /// change. Accepted events are buffered and added to the graph (a no-op
    /// for fewer than two tags), then the floor moves to the newest buffered
    /// timestamp minus the window and every event at or below it is retracted.
    pub fn admit(&mut self, event: Event) -> Admission {
        if event.created_at() <= self.floor {
            debug!("rejected {}: not newer than floor {}", event, self.floor);
            return Admission::Rejected;
        }

        self.push(event);
        self.reset_floor();
        let evicted = self.evict();

        Admission::Admitted { evicted }
    }

    /// Buffer and insert under a fresh key
    fn push(&mut self, event: Event) {
        let key = EventKey(self.next_key);
        self.next_key += 1;
        self.graph.insert(key, &event);
        self.buffer.insert(key, event);
    }

    fn evict(&mut self) -> usize {
        let expiring = self.buffer.expired_len(self.floor);
        if expiring == 0 {
            return 0;
        }
        debug!("evicting {} events at or below {}", expiring, self.floor);
        for (key, _) in self.buffer.drain_expired(self.floor) {
            self.graph.retract(key);
        }
        expiring
    }

    fn reset_floor(&mut self) {
        if let Some(latest) = self.buffer.latest() {
            let floor = latest
                .created_at()
                .checked_sub_signed(self.window)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            // Only ever moves forward.
            self.floor = self.floor.max(floor);
        }
    }

    pub fn window_duration(&self) -> Duration {
        self.window
    }

    /// Timestamp at or below which events are outside the window
    pub fn window_floor(&self) -> DateTime<Utc> {
        self.floor
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Buffered events in chronological order
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.buffer.iter().map(|(_, event)| event)
    }

    /// Number of buffered events, eligible or not
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn number_of_nodes(&self) -> usize {
        self.graph.number_of_nodes()
    }

    pub fn number_of_edges(&self) -> usize {
        self.graph.number_of_edges()
    }

    pub fn average_degree(&self) -> f64 {
        self.graph.average_degree()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }
}
