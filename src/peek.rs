use crate::cursor::Cursor;
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use std::fmt;

/// Checks whether a parser would match here, without consuming anything.
///
/// A successful lookahead yields `Value::Suppressed`, which enclosing
/// sequences drop from their results.
#[derive(Clone)]
pub struct Lookahead {
    parser: Box<Parser>,
    negate: bool,
}

impl Lookahead {
    pub fn new(parser: Parser, negate: bool) -> Self {
        Lookahead {
            parser: Box::new(parser),
            negate,
        }
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let hold = cursor.hold();
        let outcome = self.parser.parse(cursor);
        let rewound = cursor.reset(hold);
        let matched = outcome?.is_some();
        rewound?;

        Ok((matched != self.negate).then_some(Value::Suppressed))
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.negate { "not" } else { "peek" };
        write!(f, "{name}({})", self.parser)
    }
}

/// Succeeds where `parser` matches
pub fn peek(parser: Parser) -> Parser {
    Parser::Lookahead(Lookahead::new(parser, false))
}

/// Succeeds where `parser` does not match
pub fn not(parser: Parser) -> Parser {
    Parser::Lookahead(Lookahead::new(parser, true))
}
