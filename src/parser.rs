use crate::and::Sequence;
use crate::cursor::{Cursor, atomically};
use crate::error::ParseFault;
use crate::lazy::{Lazy, Rule};
use crate::many::Repeat;
use crate::map::Transform;
use crate::or::Alternative;
use crate::pattern::Pattern;
use crate::peek::Lookahead;
use crate::utf8::char::CharClass;
use crate::utf8::string::Literal;
use crate::value::Value;
use crate::{ascii, eof};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Outcome of a parse: `Ok(Some(value))` on a match, `Ok(None)` when the
/// parser does not match (the cursor is then back where it started), and
/// `Err` for a fault that aborts the whole parse.
pub type ParseResult = Result<Option<Value>, ParseFault>;

/// User-defined parser that plugs into the combinator algebra.
///
/// Any `Fn(&mut dyn Cursor) -> ParseResult` closure is a primitive.
pub trait Primitive {
    fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("custom")
    }
}

impl<F> Primitive for F
where
    F: Fn(&mut dyn Cursor) -> ParseResult,
{
    fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        self(cursor)
    }
}

/// A composable parser.
///
/// Grammars are built once from the constructor functions of this crate and
/// then run any number of times against fresh cursors.
#[derive(Clone)]
pub enum Parser {
    Literal(Literal),
    Char(CharClass),
    Pattern(Pattern),
    Integer,
    Float,
    EndOfInput,
    Sequence(Sequence),
    Repeat(Repeat),
    Alternative(Alternative),
    Transform(Transform),
    Lookahead(Lookahead),
    Lazy(Lazy),
    Rule(Rule),
    Custom(Rc<dyn Primitive>),
}

impl Parser {
    /// Run the parser at the cursor's current position
    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        match self {
            Parser::Literal(literal) => literal.parse(cursor),
            Parser::Char(class) => class.parse(cursor),
            Parser::Pattern(pattern) => pattern.parse(cursor),
            Parser::Integer => ascii::number::i64::parse_integer(cursor),
            Parser::Float => ascii::number::f64::parse_float(cursor),
            Parser::EndOfInput => eof::parse_end(cursor),
            Parser::Sequence(sequence) => sequence.parse(cursor),
            Parser::Repeat(repeat) => repeat.parse(cursor),
            Parser::Alternative(alternative) => alternative.parse(cursor),
            Parser::Transform(transform) => transform.parse(cursor),
            Parser::Lookahead(lookahead) => lookahead.parse(cursor),
            Parser::Lazy(lazy) => lazy.parse(cursor),
            Parser::Rule(rule) => rule.parse(cursor),
            // A custom primitive may forget to rewind on a no-match
            Parser::Custom(primitive) => atomically(cursor, |cursor| primitive.parse(cursor)),
        }
    }

    /// Wrap a user-defined primitive
    pub fn custom(primitive: impl Primitive + 'static) -> Parser {
        Parser::Custom(Rc::new(primitive))
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parser::Literal(literal) => write!(f, "{literal}"),
            Parser::Char(class) => write!(f, "{class}"),
            Parser::Pattern(pattern) => write!(f, "{pattern}"),
            Parser::Integer => f.write_str("integer"),
            Parser::Float => f.write_str("float"),
            Parser::EndOfInput => f.write_str("end of input"),
            Parser::Sequence(sequence) => write!(f, "{sequence}"),
            Parser::Repeat(repeat) => write!(f, "{repeat}"),
            Parser::Alternative(alternative) => write!(f, "{alternative}"),
            Parser::Transform(transform) => write!(f, "{transform}"),
            Parser::Lookahead(lookahead) => write!(f, "{lookahead}"),
            Parser::Lazy(_) => f.write_str("lazy"),
            Parser::Rule(rule) => write!(f, "rule {}", rule.name()),
            Parser::Custom(primitive) => f.write_str(&primitive.name()),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser({self})")
    }
}
