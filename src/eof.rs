use crate::cursor::Cursor;
use crate::parser::{ParseResult, Parser};
use crate::value::Value;

/// Matches only at the end of the input, consuming nothing
pub fn end_of_input() -> Parser {
    Parser::EndOfInput
}

pub(crate) fn parse_end(cursor: &mut dyn Cursor) -> ParseResult {
    Ok(cursor.finished()?.then_some(Value::Suppressed))
}
