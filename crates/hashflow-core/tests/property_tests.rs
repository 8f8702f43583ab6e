//! Property tests: the incremental graph always matches a from-scratch rebuild

use chrono::{DateTime, Duration, TimeZone, Utc};
use hashflow_core::math::truncated_ratio;
use hashflow_core::{Event, EventKey, Graph, SlidingWindow};
use proptest::prelude::*;
use std::collections::BTreeSet;

const TAGS: [&str; 6] = ["Apache", "apache", "Spark", "Hadoop", "Flink", "Kafka"];

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 3, 24, 17, 0, 0).unwrap()
}

fn event_strategy() -> impl Strategy<Value = (i64, Vec<usize>)> {
    (0i64..240, prop::collection::vec(0..TAGS.len(), 0..5))
}

fn build(id: usize, (offset, tags): &(i64, Vec<usize>)) -> Event {
    Event::new(
        id as u64,
        base() + Duration::seconds(*offset),
        tags.iter().map(|&i| TAGS[i]),
    )
}

/// Nodes, edges and average degree recomputed from a set of events
fn rebuild<'a>(events: impl Iterator<Item = &'a Event>) -> (usize, usize, f64) {
    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();
    for event in events.filter(|e| e.is_eligible()) {
        nodes.extend(event.tags().iter().cloned());
        for (a, b) in event.tag_pairs() {
            edges.insert((a.clone(), b.clone()));
        }
    }
    let average = truncated_ratio(edges.len() * 2, nodes.len(), 2);
    (nodes.len(), edges.len(), average)
}

proptest! {
    #[test]
    fn prop_window_matches_rebuild(raw in prop::collection::vec(event_strategy(), 1..40)) {
        let mut window = SlidingWindow::new(Duration::seconds(60)).unwrap();

        for (id, raw_event) in raw.iter().enumerate() {
            let event = build(id, raw_event);
            let floor_before = window.window_floor();
            let len_before = window.len();
            let snapshot_before = window.snapshot();
            let admission = window.admit(event.clone());

            if event.created_at() <= floor_before {
                prop_assert!(!admission.is_admitted());
                prop_assert_eq!(window.window_floor(), floor_before);
                prop_assert_eq!(window.len(), len_before);
                prop_assert_eq!(window.snapshot(), snapshot_before);
            } else {
                prop_assert!(admission.is_admitted());
            }

            let (nodes, edges, average) = rebuild(window.events());
            prop_assert_eq!(window.number_of_nodes(), nodes);
            prop_assert_eq!(window.number_of_edges(), edges);
            prop_assert_eq!(window.average_degree(), average);

            let latest = window.events().map(Event::created_at).max().unwrap();
            prop_assert_eq!(window.window_floor(), latest - Duration::seconds(60));
            for buffered in window.events() {
                prop_assert!(buffered.created_at() > window.window_floor());
            }
            prop_assert!(window.window_floor() >= floor_before);
        }
    }

    #[test]
    fn prop_buffer_is_chronological(raw in prop::collection::vec(event_strategy(), 1..40)) {
        let mut window = SlidingWindow::new(Duration::seconds(90)).unwrap();
        for (id, raw_event) in raw.iter().enumerate() {
            window.admit(build(id, raw_event));
        }
        let times: Vec<_> = window.events().map(Event::created_at).collect();
        let mut sorted = times.clone();
        sorted.sort();
        prop_assert_eq!(times, sorted);
    }

    #[test]
    fn prop_colliding_ids_match_rebuild(raw in prop::collection::vec(event_strategy(), 1..40)) {
        let mut window = SlidingWindow::new(Duration::seconds(60)).unwrap();
        for raw_event in &raw {
            // every event carries the same caller id
            window.admit(build(0, raw_event));

            let (nodes, edges, average) = rebuild(window.events());
            prop_assert_eq!(window.number_of_nodes(), nodes);
            prop_assert_eq!(window.number_of_edges(), edges);
            prop_assert_eq!(window.average_degree(), average);
        }
    }

    #[test]
    fn prop_retract_undoes_insert(
        history in prop::collection::vec(event_strategy(), 0..20),
        extra in event_strategy(),
    ) {
        let mut graph = Graph::new();
        for (key, raw_event) in history.iter().enumerate() {
            graph.insert(EventKey(key as u64), &build(0, raw_event));
        }
        let before = graph.snapshot();

        let key = EventKey(history.len() as u64);
        let event = build(0, &extra);
        prop_assert_eq!(graph.insert(key, &event), event.is_eligible());
        if !event.is_eligible() {
            prop_assert_eq!(graph.snapshot(), before);
        }
        graph.retract(key);
        prop_assert_eq!(graph.snapshot(), before);
    }
}
