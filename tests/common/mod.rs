//! Arithmetic expression grammar shared by the integration tests.
//!
//! Sums, products and powers are right-recursive: each rule matches one
//! operand and then, optionally, an operator followed by the rule itself. A
//! binary expression comes out as the list `[left, operator, right]`.

#![allow(dead_code)]

use backcomb::prelude::*;

/// Grammar entry point: a sum spanning the whole input
pub fn expression(grammar: &Grammar) -> Parser {
    term(grammar).then_skip(end_of_input())
}

/// A sum of products, without the end-of-input check
pub fn term(grammar: &Grammar) -> Parser {
    grammar.rule("term", |g| binary(product(g), "+-", term(g)))
}

fn product(grammar: &Grammar) -> Parser {
    grammar.rule("product", |g| binary(power(g), "*/", product(g)))
}

fn power(grammar: &Grammar) -> Parser {
    grammar.rule("power", |g| binary(atom(g), "^", power(g)))
}

fn atom(grammar: &Grammar) -> Parser {
    grammar.rule("atom", |g| alternative([variable(), parens(g), float()]))
}

fn variable() -> Parser {
    regex("[a-zA-Z]+[0-9]*").unwrap()
}

fn parens(grammar: &Grammar) -> Parser {
    last(sequence([
        skip(one_of("(")),
        term(grammar),
        skip(one_of(")")),
    ]))
}

/// `operand`, optionally followed by an operator from `operators` and `rest`
fn binary(operand: Parser, operators: &'static str, rest: Parser) -> Parser {
    transform(
        optimistic([operand, sequence([one_of(operators), rest])]),
        |value| match value {
            Value::List(mut items) if items.len() == 1 => Ok(items.pop()),
            Value::List(items) if items.len() == 2 => {
                let mut items = items.into_iter();
                let left = items.next();
                let tail = items.next().and_then(Value::into_list).unwrap_or_default();
                Ok(left.map(|left| Value::List(std::iter::once(left).chain(tail).collect())))
            }
            Value::Suppressed => Ok(None),
            other => Err(ConversionError::Shape {
                expected: "operand and optional tail",
                found: format!("{other:?}"),
            }),
        },
    )
}

/// Render a parse tree the way it would be written with full parentheses
pub fn pretty(value: &Value) -> String {
    match value {
        Value::List(items) if items.len() == 3 => format!(
            "({} {} {})",
            pretty(&items[0]),
            pretty(&items[1]),
            pretty(&items[2])
        ),
        Value::Str(s) => s.clone(),
        Value::Float(f) => format!("{f:?}"),
        Value::Int(i) => i.to_string(),
        other => format!("{other:?}"),
    }
}

/// Parse `input` in memory, ignoring spaces
pub fn parse(input: &str) -> Option<Value> {
    let compact = input.replace(' ', "");
    let grammar = Grammar::new();
    let mut cursor = StrCursor::new(&compact);
    expression(&grammar).parse(&mut cursor).unwrap()
}

/// Parse `input` from a stream under maximal eviction pressure, ignoring
/// spaces
pub fn parse_stream(input: &str) -> Option<Value> {
    let compact = input.replace(' ', "");
    let grammar = Grammar::new();
    let mut cursor = StreamCursor::with_config(compact.as_bytes(), StreamConfig::minimal());
    expression(&grammar).parse(&mut cursor).unwrap()
}

/// Inputs together with their fully parenthesised parse
pub const CORPUS: &[(&str, &str)] = &[
    ("1 + 2", "(1.0 + 2.0)"),
    ("a* b", "(a * b)"),
    ("a ^ ( 3 - e)", "(a ^ (3.0 - e))"),
    ("a", "a"),
    ("1.23456789+-123.456*332", "(1.23456789 + (-123.456 * 332.0))"),
    ("1 + 1", "(1.0 + 1.0)"),
    (
        "3*4*(a - (b - (c - d) ) * 4)^a^c",
        "(3.0 * (4.0 * ((a - ((b - (c - d)) * 4.0)) ^ (a ^ c))))",
    ),
    ("a^b^c+d^e^f", "((a ^ (b ^ c)) + (d ^ (e ^ f)))"),
    ("a*b+c/d", "((a * b) + (c / d))"),
    (
        "a + b^(c - d/e) * (3 - (4 + a) + 6^-1)",
        "(a + ((b ^ (c - (d / e))) * (3.0 - ((4.0 + a) + (6.0 ^ -1.0)))))",
    ),
];

/// Inputs that are not expressions
pub const REJECTED: &[&str] = &["1 + (a +)", "1 +", "1 *", "1 -", "(1", "", "a^", "2)"];
