//! # backcomb - Backtracking Parser Combinators
//!
//! Grammars are assembled once from small [`Parser`] values and then run
//! against a [`Cursor`]. A parser either matches and yields a [`Value`], or
//! reports no match and leaves the cursor exactly where it found it.
//!
//! - **Two cursors**: [`StrCursor`] over a string in memory, and
//!   [`StreamCursor`] over any `std::io::Read`, which keeps only as much input
//!   buffered as live backtracking points still need
//! - **Stack-disciplined backtracking**: combinators take a hold before
//!   speculating and give it back, innermost first, by releasing or resetting it
//! - **Two failure kinds**: a no-match is `Ok(None)`; a [`ParseFault`] aborts
//!   the whole parse
//! - **Recursive grammars** through [`lazy`](lazy::lazy) or the rules of a
//!   [`Grammar`]
//!
//! ```
//! use backcomb::prelude::*;
//!
//! let pair = sequence([integer(), skip(literal(",")), integer()]);
//! let mut cursor = StrCursor::new("3,4");
//! let value = pair.parse(&mut cursor).unwrap();
//! assert_eq!(value, Some(Value::List(vec![Value::Int(3), Value::Int(4)])));
//! ```

pub mod and;
pub mod ascii;
pub mod cursor;
pub mod cursors;
pub mod eof;
pub mod error;
pub mod lazy;
pub mod many;
pub mod map;
pub mod or;
pub mod parser;
pub mod pattern;
pub mod peek;
pub mod shape;
pub mod utf8;
pub mod value;


pub use cursor::{Cursor, Hold, atomically};
pub use cursors::{StrCursor, StreamConfig, StreamCursor};
pub use error::{ConversionError, ParseFault};
pub use lazy::Grammar;
pub use parser::{ParseResult, Parser, Primitive};
pub use value::Value;

/// Everything needed to write a grammar
pub mod prelude {
    pub use crate::and::{optimistic, sequence};
    pub use crate::ascii::{
        canonical_float, canonical_integer, float, integer, non_empty_string, whitespace,
    };
    pub use crate::cursor::Cursor;
    pub use crate::cursors::{StrCursor, StreamConfig, StreamCursor};
    pub use crate::eof::end_of_input;
    pub use crate::error::{ConversionError, ParseFault};
    pub use crate::lazy::{Grammar, lazy};
    pub use crate::many::{many, maybe, repeat, strict_repeat};
    pub use crate::map::{filter_map, map, transform, try_map};
    pub use crate::or::{alternative, longest};
    pub use crate::parser::{ParseResult, Parser, Primitive};
    pub use crate::pattern::regex;
    pub use crate::peek::{not, peek};
    pub use crate::shape::{concat, flatten, last, skip};
    pub use crate::utf8::{
        any_char, char_set, literal, none_in_set, none_of, nothing, one_of, word_char,
    };
    pub use crate::value::Value;
}
