use crate::cursor::{Cursor, atomically};
use crate::error::{ConversionError, ParseFault};
use crate::parser::{ParseResult, Parser};
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Function applied to the result of a successful inner parse.
///
/// `Ok(None)` rejects the match, which then counts as a no-match.
pub type Mapper = dyn Fn(Value) -> Result<Option<Value>, ConversionError>;

/// Parser combinator that transforms the result of an inner parser
#[derive(Clone)]
pub struct Transform {
    parser: Box<Parser>,
    mapper: Rc<Mapper>,
    label: Cow<'static, str>,
}

impl Transform {
    pub fn new(
        parser: Parser,
        label: impl Into<Cow<'static, str>>,
        mapper: impl Fn(Value) -> Result<Option<Value>, ConversionError> + 'static,
    ) -> Self {
        Transform {
            parser: Box::new(parser),
            mapper: Rc::new(mapper),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let start = cursor.index();
        atomically(cursor, |cursor| {
            let Some(value) = self.parser.parse(cursor)? else {
                return Ok(None);
            };
            (self.mapper)(value).map_err(|source| {
                log::debug!("{} failed at offset {start}: {source}", self.label);
                ParseFault::Conversion {
                    parser: self.to_string(),
                    offset: start,
                    source,
                }
            })
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label, self.parser)
    }
}

/// Transform with full control: the mapper may reject a match or fail
pub fn transform(
    parser: Parser,
    mapper: impl Fn(Value) -> Result<Option<Value>, ConversionError> + 'static,
) -> Parser {
    Parser::Transform(Transform::new(parser, "transform", mapper))
}

/// Infallible transform
pub fn map(parser: Parser, mapper: impl Fn(Value) -> Value + 'static) -> Parser {
    Parser::Transform(Transform::new(parser, "map", move |value| {
        Ok(Some(mapper(value)))
    }))
}

/// Transform whose failure aborts the parse with a conversion fault
pub fn try_map(
    parser: Parser,
    mapper: impl Fn(Value) -> Result<Value, ConversionError> + 'static,
) -> Parser {
    Parser::Transform(Transform::new(parser, "try_map", move |value| {
        mapper(value).map(Some)
    }))
}

/// Transform that may turn a match into a no-match
pub fn filter_map(parser: Parser, mapper: impl Fn(Value) -> Option<Value> + 'static) -> Parser {
    Parser::Transform(Transform::new(parser, "filter_map", move |value| {
        Ok(mapper(value))
    }))
}

impl Parser {
    pub fn map(self, mapper: impl Fn(Value) -> Value + 'static) -> Parser {
        map(self, mapper)
    }

    pub fn try_map(
        self,
        mapper: impl Fn(Value) -> Result<Value, ConversionError> + 'static,
    ) -> Parser {
        try_map(self, mapper)
    }

    pub fn filter_map(self, mapper: impl Fn(Value) -> Option<Value> + 'static) -> Parser {
        filter_map(self, mapper)
    }
}
