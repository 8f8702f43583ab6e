//! # Hashflow Ingest
//!
//! Parses line-delimited tweet JSON into [`hashflow_core::Event`]s and filters
//! out records that carry no tweet.

pub mod parser;
pub mod reader;
pub mod record;

pub use parser::*;
pub use reader::*;
pub use record::*;
