use crate::cursor::Cursor;
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;

/// Parser that matches an exact string
#[derive(Debug, Clone)]
pub struct Literal {
    expected: Cow<'static, str>,
}

impl Literal {
    pub fn new(expected: impl Into<Cow<'static, str>>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let len = self.expected.len();
        if !cursor.remaining(len)?.starts_with(&*self.expected) {
            return Ok(None);
        }
        cursor.advance(len)?;
        Ok(Some(Value::from(&*self.expected)))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "literal {:?}", self.expected)
    }
}

/// Match `expected` exactly
pub fn literal(expected: impl Into<Cow<'static, str>>) -> Parser {
    Parser::Literal(Literal::new(expected))
}

/// Always matches, consuming nothing
pub fn nothing() -> Parser {
    literal("")
}
