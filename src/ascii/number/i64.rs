use super::{DIGITS, conversion_fault, digit_run, scan};
use crate::and::sequence;
use crate::cursor::Cursor;
use crate::error::ConversionError;
use crate::many::maybe;
use crate::parser::{ParseResult, Parser};
use crate::shape::concat;
use crate::utf8::char::char_set;
use crate::utf8::string::literal;
use crate::value::Value;

/// Parser that matches a decimal integer with an optional leading `-`.
///
/// Yields `Value::Int`; a literal that does not fit in an `i64` is a
/// conversion fault.
pub fn integer() -> Parser {
    Parser::Integer
}

/// Length of the integer literal at the start of `bytes`
pub(crate) fn measure(bytes: &[u8]) -> usize {
    let sign = usize::from(bytes.first() == Some(&b'-'));
    match digit_run(bytes, sign) {
        0 => 0,
        digits => sign + digits,
    }
}

pub(crate) fn parse_integer(cursor: &mut dyn Cursor) -> ParseResult {
    let start = cursor.index();
    let Some(text) = scan(cursor, measure)? else {
        return Ok(None);
    };
    let value = text
        .parse::<i64>()
        .map_err(|e| conversion_fault("integer", start, ConversionError::integer(&text, e)))?;
    cursor.advance(text.len())?;
    Ok(Some(Value::Int(value)))
}

/// The integer grammar composed from generic combinators; [`integer`] gives
/// the same results.
pub fn canonical_integer() -> Parser {
    concat(sequence([maybe(literal("-")), char_set(DIGITS)])).try_map(|value| {
        let text = value.as_str().unwrap_or_default();
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|e| ConversionError::integer(text, e))
    })
}
