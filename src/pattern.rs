use crate::cursor::Cursor;
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use regex::{Captures, Regex};
use std::fmt;

/// Lookahead requested before the first match attempt
const INITIAL_WINDOW: usize = 1024;

/// Parser that matches a regular expression anchored at the cursor.
///
/// The result is the whole match when the pattern has no capture groups, the
/// text of the group when it has one, and the list of group texts otherwise.
/// A group that did not take part in the match yields an empty string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Pattern {
            source: pattern.to_string(),
            regex: Regex::new(&format!(r"\A(?:{pattern})"))?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// A regex cannot tell whether more input would change its outcome, so
    /// the lookahead grows until it covers the rest of the input and the
    /// match runs once over all of it.
    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let mut window = INITIAL_WINDOW;
        loop {
            let view = cursor.remaining(window)?;
            if view.len() >= window {
                // A view longer than requested may already be the whole rest
                window = window.saturating_mul(2).max(view.len().saturating_add(1));
                continue;
            }
            let Some(captures) = self.regex.captures(view) else {
                return Ok(None);
            };
            let end = captures.get(0).map_or(0, |m| m.end());
            let value = self.extract(&captures);
            cursor.advance(end)?;
            return Ok(Some(value));
        }
    }

    fn extract(&self, captures: &Captures<'_>) -> Value {
        let group = |i: usize| Value::from(captures.get(i).map_or("", |m| m.as_str()));
        match captures.len() {
            1 => group(0),
            2 => group(1),
            n => Value::List((1..n).map(group).collect()),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex /{}/", self.source)
    }
}

/// Compile `pattern` into a parser
pub fn regex(pattern: &str) -> Result<Parser, regex::Error> {
    Pattern::new(pattern).map(Parser::Pattern)
}
