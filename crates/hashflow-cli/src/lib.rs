//! # Hashflow CLI Library
//!
//! Command-line driver: reads a tweet dump, runs it through a sliding-window
//! hashtag graph and writes the rolling average degree.

pub mod commands;
pub mod driver;

pub use commands::*;
pub use driver::*;
