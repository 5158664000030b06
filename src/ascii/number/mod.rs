//! Decimal number literals.
//!
//! [`integer`] and [`float`] scan the input directly. [`canonical_integer`]
//! and [`canonical_float`] build the same grammar out of the generic
//! combinators and are kept as the reference the fast parsers must agree
//! with.

use crate::cursor::Cursor;
use crate::error::{ConversionError, ParseFault};

pub mod f64;
pub mod i64;

pub use f64::{canonical_float, float};
pub use i64::{canonical_integer, integer};

pub const DIGITS: &str = "0123456789";

/// Lookahead requested before scanning a numeral
const SCAN_WINDOW: usize = 32;

/// Length of the ASCII digit run starting at `from`
pub(crate) fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Scans the numeral at the cursor without consuming it.
///
/// `measure` returns the numeral's length in a view, or 0 when there is none.
/// The view grows until the numeral ends at least one byte before its edge,
/// so a measurement never depends on where the lookahead was cut. A view
/// that already holds more than was asked for grows past its own length, so
/// a numeral running to the end of the input is measured at most twice.
pub(crate) fn scan(
    cursor: &mut dyn Cursor,
    measure: impl Fn(&[u8]) -> usize,
) -> Result<Option<String>, ParseFault> {
    let mut window = SCAN_WINDOW;
    loop {
        let view = cursor.remaining(window)?;
        let len = measure(view.as_bytes());
        if len + 1 < view.len() || view.len() < window {
            // The numeral is pure ASCII, so `len` is a char boundary
            return Ok((len > 0).then(|| view[..len].to_string()));
        }
        window = window.saturating_mul(2).max(view.len().saturating_add(1));
    }
}

/// Conversion fault raised by the numeric parsers
pub(crate) fn conversion_fault(parser: &str, offset: usize, source: ConversionError) -> ParseFault {
    log::debug!("{parser} failed at offset {offset}: {source}");
    ParseFault::Conversion {
        parser: parser.to_string(),
        offset,
        source,
    }
}
