//! # Hashflow Core
//!
//! Incremental hashtag co-occurrence graph over a sliding event-time window.
//! Events are admitted one at a time; the graph always reflects exactly the
//! events of the trailing window anchored at the newest admitted event.

pub mod buffer;
pub mod config;
pub mod graph;
pub mod math;
pub mod model;
pub mod vertex;
pub mod window;

pub use buffer::*;
pub use config::*;
pub use graph::*;
pub use model::*;
pub use vertex::*;
pub use window::*;
