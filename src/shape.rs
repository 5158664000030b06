//! Helpers that reshape the result of a parser without changing what it
//! consumes.

use crate::error::ConversionError;
use crate::map::Transform;
use crate::parser::Parser;
use crate::value::Value;

/// Match `parser` but discard its result
pub fn skip(parser: Parser) -> Parser {
    Parser::Transform(Transform::new(parser, "skip", |_| {
        Ok(Some(Value::Suppressed))
    }))
}

/// Keep only the final element of a list result.
///
/// Scalars pass through unchanged; an empty list is a no-match.
pub fn last(parser: Parser) -> Parser {
    Parser::Transform(Transform::new(parser, "last", |value| {
        Ok(match value {
            Value::List(mut items) => items.pop(),
            scalar => Some(scalar),
        })
    }))
}

/// Merge one level of nested lists into the enclosing list
pub fn flatten(parser: Parser) -> Parser {
    Parser::Transform(Transform::new(parser, "flatten", |value| {
        Ok(Some(match value {
            Value::List(items) => {
                let mut flat = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::List(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                Value::List(flat)
            }
            scalar => scalar,
        }))
    }))
}

/// Join the strings of a (possibly nested) list result into one string.
///
/// An empty or suppressed result is a no-match.
pub fn concat(parser: Parser) -> Parser {
    Parser::Transform(Transform::new(parser, "concat", |value| match value {
        Value::Suppressed => Ok(None),
        Value::List(items) if items.is_empty() => Ok(None),
        value => {
            let mut joined = String::new();
            join(value, &mut joined)?;
            Ok(Some(Value::Str(joined)))
        }
    }))
}

fn join(value: Value, out: &mut String) -> Result<(), ConversionError> {
    match value {
        Value::Str(s) => out.push_str(&s),
        Value::List(items) => {
            for item in items {
                join(item, out)?;
            }
        }
        Value::Suppressed => {}
        other => {
            return Err(ConversionError::Shape {
                expected: "string",
                found: format!("{other:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::and::sequence;
    use crate::cursor::Cursor;
    use crate::cursors::StrCursor;
    use crate::error::ParseFault;
    use crate::many::many;
    use crate::map::map;
    use crate::utf8::char::one_of;
    use crate::utf8::string::literal;

    #[test]
    fn test_skip() {
        let mut cursor = StrCursor::new("ab");
        let parser = skip(literal("a"));

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some(Value::Suppressed));
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_last_of_sequence() {
        let mut cursor = StrCursor::new("abc");
        let parser = last(sequence([literal("a"), literal("b"), literal("c")]));

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some("c".into()));
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_last_scalar_passes_through() {
        let mut cursor = StrCursor::new("a");
        let parser = last(literal("a"));

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some("a".into()));
    }

    #[test]
    fn test_last_of_empty_list_is_no_match() {
        let mut cursor = StrCursor::new("a");
        let parser = last(map(literal("a"), |_| Value::List(Vec::new())));

        assert_eq!(parser.parse(&mut cursor).unwrap(), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_flatten_one_level() {
        let mut cursor = StrCursor::new("abc");
        let parser = flatten(sequence([
            sequence([literal("a"), literal("b")]).map(|v| v),
            literal("c"),
        ]));

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(
            value,
            Some(Value::List(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_concat_joins_nested() {
        let mut cursor = StrCursor::new("abc");
        let parser = concat(sequence([
            sequence([literal("a"), literal("b")]).map(|v| v),
            literal("c"),
        ]));

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some("abc".into()));
    }

    #[test]
    fn test_concat_of_nothing_is_no_match() {
        let mut cursor = StrCursor::new("xyz");
        let parser = concat(many(one_of("abc")));

        assert_eq!(parser.parse(&mut cursor).unwrap(), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_concat_rejects_non_string() {
        let mut cursor = StrCursor::new("1");
        let parser = concat(map(literal("1"), |_| Value::List(vec![Value::Int(1)])));

        let fault = parser.parse(&mut cursor).unwrap_err();
        assert!(matches!(
            fault,
            ParseFault::Conversion {
                source: ConversionError::Shape { expected: "string", .. },
                ..
            }
        ));
        assert_eq!(cursor.index(), 0);
    }
}
