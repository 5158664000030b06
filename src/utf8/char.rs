use crate::cursor::Cursor;
use crate::many::many;
use crate::parser::{ParseResult, Parser};
use crate::shape::concat;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone)]
enum Class {
    Set(Cow<'static, str>),
    /// Alphanumeric characters and `_`
    Word,
}

/// Parser that matches a single character by class membership
#[derive(Debug, Clone)]
pub struct CharClass {
    class: Class,
    negate: bool,
}

impl CharClass {
    fn new(class: Class, negate: bool) -> Self {
        CharClass { class, negate }
    }

    pub fn matches(&self, c: char) -> bool {
        let member = match &self.class {
            Class::Set(set) => set.contains(c),
            Class::Word => c.is_alphanumeric() || c == '_',
        };
        member != self.negate
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        match cursor.peek()? {
            Some(c) if self.matches(c) => {
                cursor.next()?;
                Ok(Some(Value::from(c)))
            }
            _ => Ok(None),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.class, self.negate) {
            (Class::Set(set), false) => write!(f, "one_of {set:?}"),
            (Class::Set(set), true) if set.is_empty() => f.write_str("any_char"),
            (Class::Set(set), true) => write!(f, "none_of {set:?}"),
            (Class::Word, false) => f.write_str("word_char"),
            (Class::Word, true) => f.write_str("non_word_char"),
        }
    }
}

/// Any single character contained in `set`
pub fn one_of(set: impl Into<Cow<'static, str>>) -> Parser {
    Parser::Char(CharClass::new(Class::Set(set.into()), false))
}

/// Any single character not contained in `set`
pub fn none_of(set: impl Into<Cow<'static, str>>) -> Parser {
    Parser::Char(CharClass::new(Class::Set(set.into()), true))
}

/// Any single character
pub fn any_char() -> Parser {
    none_of("")
}

/// A single word character: alphanumeric or `_`
pub fn word_char() -> Parser {
    Parser::Char(CharClass::new(Class::Word, false))
}

/// One or more characters from `set`, joined into a string
pub fn char_set(set: impl Into<Cow<'static, str>>) -> Parser {
    concat(many(one_of(set)))
}

/// One or more characters outside `set`, joined into a string
pub fn none_in_set(set: impl Into<Cow<'static, str>>) -> Parser {
    concat(many(none_of(set)))
}
