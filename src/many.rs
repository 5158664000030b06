use crate::cursor::{Cursor, atomically};
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use std::fmt;

/// How many matches a repetition asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// Exactly this many, or no match at all
    Exactly(usize),
    /// Up to this many; never fails
    AtMost(usize),
    /// As many as possible; never fails
    Unbounded,
}

/// Parser combinator that matches the given parser repeatedly
#[derive(Clone)]
pub struct Repeat {
    parser: Box<Parser>,
    count: Count,
}

impl Repeat {
    pub fn new(parser: Parser, count: Count) -> Self {
        Repeat {
            parser: Box::new(parser),
            count,
        }
    }

    pub fn count(&self) -> Count {
        self.count
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        match self.count {
            Count::Exactly(n) => atomically(cursor, |cursor| {
                let mut results = Vec::new();
                for _ in 0..n {
                    match self.parser.parse(cursor)? {
                        Some(value) => results.push(value),
                        None => return Ok(None),
                    }
                }
                Ok(Some(Value::collect(results)))
            }),
            Count::AtMost(limit) => self.greedy(cursor, Some(limit)),
            Count::Unbounded => self.greedy(cursor, None),
        }
    }

    fn greedy(&self, cursor: &mut dyn Cursor, limit: Option<usize>) -> ParseResult {
        let mut results = Vec::new();
        let mut matched = 0;
        while limit.is_none_or(|limit| matched < limit) {
            let before = cursor.index();
            let Some(value) = self.parser.parse(cursor)? else {
                break;
            };
            results.push(value);
            matched += 1;
            // A match that consumed nothing would match forever
            if limit.is_none() && cursor.index() == before {
                break;
            }
        }
        Ok(Some(Value::collect(results)))
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count {
            Count::Exactly(n) => write!(f, "times({}, {n})", self.parser),
            Count::AtMost(n) => write!(f, "repeat({}, {n})", self.parser),
            Count::Unbounded => write!(f, "many({})", self.parser),
        }
    }
}

/// Match `parser` up to `n` times, or without bound when `n` is negative.
///
/// Zero matches is still a success, with a suppressed result.
pub fn repeat(parser: Parser, n: isize) -> Parser {
    let count = usize::try_from(n).map_or(Count::Unbounded, Count::AtMost);
    Parser::Repeat(Repeat::new(parser, count))
}

/// Match `parser` exactly `n` times or not at all
pub fn strict_repeat(parser: Parser, n: usize) -> Parser {
    Parser::Repeat(Repeat::new(parser, Count::Exactly(n)))
}

/// Match `parser` zero or one time
pub fn maybe(parser: Parser) -> Parser {
    repeat(parser, 1)
}

/// Match `parser` zero or more times
pub fn many(parser: Parser) -> Parser {
    repeat(parser, -1)
}

impl Parser {
    /// Exactly `n` consecutive matches of `self`
    pub fn times(self, n: usize) -> Parser {
        strict_repeat(self, n)
    }
}
