use crate::cursor::Cursor;
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use std::fmt;

/// Which successful alternative wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// The first one, in declaration order
    First,
    /// The one consuming the most input; ties go to the earliest declared
    Longest,
}

/// Parser combinator that tries several parsers at the same position
#[derive(Clone)]
pub struct Alternative {
    parsers: Vec<Parser>,
    choice: Choice,
}

impl Alternative {
    /// Alternative that absorbs nested alternatives with the same policy
    pub fn new(parsers: impl IntoIterator<Item = Parser>, choice: Choice) -> Self {
        let mut flat = Vec::new();
        for parser in parsers {
            match parser {
                Parser::Alternative(inner) if inner.choice == choice => flat.extend(inner.parsers),
                other => flat.push(other),
            }
        }
        Alternative {
            parsers: flat,
            choice,
        }
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn parsers(&self) -> &[Parser] {
        &self.parsers
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        match self.choice {
            Choice::First => self.first(cursor),
            Choice::Longest => self.longest(cursor),
        }
    }

    fn first(&self, cursor: &mut dyn Cursor) -> ParseResult {
        for parser in &self.parsers {
            if let Some(value) = parser.parse(cursor)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn longest(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let start = cursor.index();
        let mut best: Option<(usize, Value)> = None;

        for parser in &self.parsers {
            let hold = cursor.hold();
            let outcome = parser.parse(cursor);
            let consumed = cursor.index() - start;
            let rewound = cursor.reset(hold);
            let outcome = outcome?;
            rewound?;

            if let Some(value) = outcome {
                // Strictly longer only, so the earliest alternative keeps a tie
                if best.as_ref().is_none_or(|(length, _)| consumed > *length) {
                    best = Some((consumed, value));
                }
            }
        }

        match best {
            Some((length, value)) => {
                cursor.advance(length)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.choice {
            Choice::First => "alternative(",
            Choice::Longest => "longest(",
        })?;
        for (i, parser) in self.parsers.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{parser}")?;
        }
        f.write_str(")")
    }
}

/// First-match alternation
pub fn alternative(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::Alternative(Alternative::new(parsers, Choice::First))
}

/// Longest-match alternation
pub fn longest(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::Alternative(Alternative::new(parsers, Choice::Longest))
}

impl Parser {
    /// First-match alternation of `self` and `other`
    pub fn or(self, other: Parser) -> Parser {
        alternative([self, other])
    }
}
