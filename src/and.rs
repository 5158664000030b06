use crate::cursor::{Cursor, atomically};
use crate::parser::{ParseResult, Parser};
use crate::shape::{last, skip};
use crate::value::Value;
use std::fmt;

/// Runs parsers one after another and appends their results.
///
/// An atomic sequence matches all of its parsers or nothing: the first no-match
/// rolls the cursor back to where the sequence started. An optimistic sequence
/// stops at the first no-match and keeps the prefix that did match, so it
/// never fails.
///
/// Example:
/// ```
/// use backcomb::and::sequence;
/// use backcomb::cursors::StrCursor;
/// use backcomb::utf8::string::literal;
/// use backcomb::value::Value;
///
/// let mut cursor = StrCursor::new("ab!");
/// let parser = sequence([literal("a"), literal("b")]);
/// let value = parser.parse(&mut cursor).unwrap();
/// assert_eq!(value, Some(Value::List(vec!["a".into(), "b".into()])));
/// ```
#[derive(Clone)]
pub struct Sequence {
    parsers: Vec<Parser>,
    atomic: bool,
}

impl Sequence {
    /// Sequence over exactly `parsers`, without splicing nested sequences
    pub fn new(parsers: Vec<Parser>, atomic: bool) -> Self {
        Sequence { parsers, atomic }
    }

    /// Sequence that absorbs the elements of nested sequences of the same kind
    pub fn spliced(parsers: impl IntoIterator<Item = Parser>, atomic: bool) -> Self {
        let mut flat = Vec::new();
        for parser in parsers {
            match parser {
                Parser::Sequence(inner) if inner.atomic == atomic => flat.extend(inner.parsers),
                other => flat.push(other),
            }
        }
        Sequence::new(flat, atomic)
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    pub fn parsers(&self) -> &[Parser] {
        &self.parsers
    }

    pub fn parse(&self, cursor: &mut dyn Cursor) -> ParseResult {
        if self.atomic {
            atomically(cursor, |cursor| self.run(cursor))
        } else {
            self.run(cursor)
        }
    }

    fn run(&self, cursor: &mut dyn Cursor) -> ParseResult {
        let mut results = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            match parser.parse(cursor)? {
                Some(value) => results.push(value),
                None if self.atomic => return Ok(None),
                None => break,
            }
        }
        Ok(Some(Value::collect(results)))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.atomic { "sequence(" } else { "optimistic(" })?;
        for (i, parser) in self.parsers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parser}")?;
        }
        f.write_str(")")
    }
}

/// All-or-nothing sequence
pub fn sequence(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::Sequence(Sequence::spliced(parsers, true))
}

/// Best-effort sequence keeping the longest matching prefix
pub fn optimistic(parsers: impl IntoIterator<Item = Parser>) -> Parser {
    Parser::Sequence(Sequence::spliced(parsers, false))
}

impl Parser {
    /// Atomic sequence of `self` followed by `other`
    pub fn and(self, other: Parser) -> Parser {
        sequence([self, other])
    }

    /// Match `self` then `other`, keeping only the result of `other`
    pub fn then(self, other: Parser) -> Parser {
        last(Parser::Sequence(Sequence::new(vec![skip(self), other], true)))
    }

    /// Match `self` then `other`, keeping only the result of `self`
    pub fn then_skip(self, other: Parser) -> Parser {
        last(Parser::Sequence(Sequence::new(vec![self, skip(other)], true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::StrCursor;
    use crate::many::many;
    use crate::utf8::char::one_of;
    use crate::utf8::string::literal;

    #[test]
    fn test_sequence_collects_results() {
        let mut cursor = StrCursor::new("abc");
        let parser = sequence([literal("a"), literal("b")]);

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(value, Some(Value::List(vec!["a".into(), "b".into()])));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_sequence_rolls_back_on_failure() {
        let mut cursor = StrCursor::new("abx");
        let parser = sequence([literal("a"), literal("b"), literal("c")]);

        assert_eq!(parser.parse(&mut cursor).unwrap(), None);
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.live_holds(), 0);
    }

    #[test]
    fn test_sequence_splices_same_kind() {
        let parser = literal("a").and(literal("b")).and(literal("c"));
        let Parser::Sequence(inner) = &parser else {
            panic!("expected a sequence, got {parser}");
        };
        assert_eq!(inner.parsers().len(), 3);
        assert_eq!(parser.to_string(), r#"sequence(literal "a", literal "b", literal "c")"#);

        let mut cursor = StrCursor::new("abc");
        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(
            value,
            Some(Value::List(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_sequence_keeps_other_kind_nested() {
        let inner = optimistic([literal("a"), literal("b")]);
        let parser = sequence([inner, literal("c")]);
        let Parser::Sequence(outer) = &parser else {
            panic!("expected a sequence");
        };
        assert_eq!(outer.parsers().len(), 2);

        let mut cursor = StrCursor::new("abc");
        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(
            value,
            Some(Value::List(vec![
                Value::List(vec!["a".into(), "b".into()]),
                "c".into()
            ]))
        );
    }

    #[test]
    fn test_sequence_drops_suppressed() {
        let mut cursor = StrCursor::new("(x)");
        let parser = sequence([skip(literal("(")), literal("x"), skip(literal(")"))]);

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(value, Some(Value::List(vec!["x".into()])));
    }

    #[test]
    fn test_sequence_all_suppressed() {
        let mut cursor = StrCursor::new("ab");
        let parser = sequence([skip(literal("a")), skip(literal("b"))]);

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some(Value::Suppressed));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_sequence_at_end_of_input() {
        let mut cursor = StrCursor::new("");
        let parser = sequence([many(one_of("x")), literal("")]);

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(value, Some(Value::List(vec!["".into()])));
    }

    #[test]
    fn test_optimistic_keeps_prefix() {
        let mut cursor = StrCursor::new("abx");
        let parser = optimistic([literal("a"), literal("b"), literal("c")]);

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(value, Some(Value::List(vec!["a".into(), "b".into()])));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_optimistic_never_fails() {
        let mut cursor = StrCursor::new("zzz");
        let parser = optimistic([literal("a"), literal("b")]);

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some(Value::Suppressed));
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_then_keeps_right() {
        let mut cursor = StrCursor::new("-ab");
        let parser = literal("-").then(sequence([literal("a"), literal("b")]));

        let value = parser.parse(&mut cursor).unwrap();
        assert_eq!(value, Some(Value::List(vec!["a".into(), "b".into()])));
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn test_then_skip_keeps_left() {
        let mut cursor = StrCursor::new("x;");
        let parser = literal("x").then_skip(literal(";"));

        assert_eq!(parser.parse(&mut cursor).unwrap(), Some("x".into()));
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_then_requires_both() {
        let mut cursor = StrCursor::new("x,");
        let parser = literal("x").then_skip(literal(";"));

        assert_eq!(parser.parse(&mut cursor).unwrap(), None);
        assert_eq!(cursor.index(), 0);
    }
}
