use std::borrow::Cow;
use std::io;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Fatal failure of a parse.
///
/// A parser that simply does not match returns `Ok(None)`; a `ParseFault` is
/// reserved for conversions that cannot be performed and for violations of the
/// cursor's backtracking contract. Either aborts the whole top-level parse.
#[derive(Debug, Error)]
pub enum ParseFault {
    #[error("{parser} failed to convert its match at offset {offset}: {source}")]
    Conversion {
        /// Identity of the parser whose conversion failed
        parser: String,
        /// Offset where the faulting parser started
        offset: usize,
        #[source]
        source: ConversionError,
    },

    #[error(
        "hold at offset {offset} (depth {depth}) is not the innermost live hold; {live} holds are live"
    )]
    HoldOrder {
        offset: usize,
        depth: usize,
        live: usize,
    },

    #[error("cannot reset to offset {offset}: retained input starts at {base}")]
    Evicted { offset: usize, base: usize },

    #[error("offset {offset} is not on a character boundary")]
    Boundary { offset: usize },

    #[error("input is not valid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("rule `{rule}` was used after its grammar was dropped")]
    GrammarDropped { rule: Cow<'static, str> },
}

impl ParseFault {
    /// Offset the fault refers to, when it has one
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseFault::Conversion { offset, .. }
            | ParseFault::HoldOrder { offset, .. }
            | ParseFault::Evicted { offset, .. }
            | ParseFault::Boundary { offset }
            | ParseFault::InvalidUtf8 { offset } => Some(*offset),
            ParseFault::Io(_) | ParseFault::GrammarDropped { .. } => None,
        }
    }
}

/// Error raised by a transform's mapping function.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("invalid integer literal {text:?}: {source}")]
    Integer {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float literal {text:?}: {source}")]
    Float {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: String,
    },

    #[error("{0}")]
    Message(Cow<'static, str>),
}

impl ConversionError {
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        ConversionError::Message(message.into())
    }

    pub fn integer(text: &str, source: ParseIntError) -> Self {
        ConversionError::Integer {
            text: text.to_string(),
            source,
        }
    }

    pub fn float(text: &str, source: ParseFloatError) -> Self {
        ConversionError::Float {
            text: text.to_string(),
            source,
        }
    }
}
