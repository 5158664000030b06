use crate::and::sequence;
use crate::many::many;
use crate::parser::Parser;
use crate::shape::{concat, last};
use crate::utf8::char::{char_set, word_char};
use crate::utf8::string::nothing;

/// Characters skipped by [`whitespace`]
pub const WHITESPACE: &str = " \n\r\t";

/// Zero or more ASCII whitespace characters.
///
/// Always matches; the result is the (possibly empty) run as a string.
pub fn whitespace() -> Parser {
    char_set(WHITESPACE).or(nothing())
}

/// A run of word characters after optional whitespace
pub fn non_empty_string() -> Parser {
    last(sequence([whitespace(), concat(many(word_char()))]))
}
