//! Iterator over the events of a line-delimited tweet stream

use crate::parser::{IngestError, TweetParser};
use hashflow_core::Event;
use std::io::{BufRead, Lines};

/// Reads tweets from any buffered source, one line per item.
///
/// Yields `Ok(None)` for lines that carry no tweet. Iteration stops at end of
/// input; an I/O error is yielded once and iteration continues with the next
/// line.
pub struct TweetReader<R> {
    lines: Lines<R>,
    parser: TweetParser,
}

impl<R: BufRead> TweetReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            parser: TweetParser::new(),
        }
    }

    pub fn parser(&self) -> &TweetParser {
        &self.parser
    }
}

impl<R: BufRead> Iterator for TweetReader<R> {
    type Item = Result<Option<Event>, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(IngestError::Io(e))),
        };
        Some(self.parser.parse_line(&line))
    }
}
