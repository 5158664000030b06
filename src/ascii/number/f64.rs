use super::{DIGITS, conversion_fault, digit_run, scan};
use crate::and::{optimistic, sequence};
use crate::cursor::Cursor;
use crate::error::ConversionError;
use crate::many::maybe;
use crate::parser::{ParseResult, Parser};
use crate::shape::concat;
use crate::utf8::char::{char_set, one_of};
use crate::value::Value;

/// Parser that matches a decimal number: an optional `-`, digits, then
/// optionally `.` and more digits.
///
/// Always yields `Value::Float`, also for literals without a fraction. A `.`
/// that is not followed by a digit is left unconsumed.
pub fn float() -> Parser {
    Parser::Float
}

/// Length of the float literal at the start of `bytes`
pub(crate) fn measure(bytes: &[u8]) -> usize {
    let whole = super::i64::measure(bytes);
    if whole == 0 || bytes.get(whole) != Some(&b'.') {
        return whole;
    }
    match digit_run(bytes, whole + 1) {
        0 => whole,
        fraction => whole + 1 + fraction,
    }
}

pub(crate) fn parse_float(cursor: &mut dyn Cursor) -> ParseResult {
    let start = cursor.index();
    let Some(text) = scan(cursor, measure)? else {
        return Ok(None);
    };
    let value = text
        .parse::<f64>()
        .map_err(|e| conversion_fault("float", start, ConversionError::float(&text, e)))?;
    cursor.advance(text.len())?;
    Ok(Some(Value::Float(value)))
}

/// The float grammar composed from generic combinators; [`float`] gives the
/// same results.
pub fn canonical_float() -> Parser {
    concat(optimistic([
        sequence([maybe(one_of("-")), char_set(DIGITS)]),
        sequence([maybe(one_of(".")), char_set(DIGITS)]),
    ]))
    .try_map(|value| {
        let text = value.as_str().unwrap_or_default();
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| ConversionError::float(text, e))
    })
}
