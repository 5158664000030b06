use crate::cursor::{Cursor, Hold, HoldStack};
use crate::error::ParseFault;

/// Cursor over a fully available string.
///
/// The whole input stays resident, so `reset` is a plain offset move.
#[derive(Debug, Clone)]
pub struct StrCursor<'code> {
    input: &'code str,
    position: usize,
    holds: HoldStack,
}

impl<'code> StrCursor<'code> {
    pub fn new(input: &'code str) -> Self {
        StrCursor {
            input,
            position: 0,
            holds: HoldStack::new(),
        }
    }

    /// The complete input
    pub fn source(&self) -> &'code str {
        self.input
    }

    fn rest(&self) -> &'code str {
        // position only ever lands on a char boundary
        self.input.get(self.position..).unwrap_or("")
    }
}

impl<'code> Cursor for StrCursor<'code> {
    fn peek(&mut self) -> Result<Option<char>, ParseFault> {
        Ok(self.rest().chars().next())
    }

    fn next(&mut self) -> Result<Option<char>, ParseFault> {
        let next = self.rest().chars().next();
        if let Some(c) = next {
            self.position += c.len_utf8();
        }
        Ok(next)
    }

    fn advance(&mut self, n: usize) -> Result<usize, ParseFault> {
        let end = self.position.saturating_add(n).min(self.input.len());
        if !self.input.is_char_boundary(end) {
            return Err(ParseFault::Boundary { offset: end });
        }
        let consumed = end - self.position;
        self.position = end;
        Ok(consumed)
    }

    fn remaining(&mut self, _min: usize) -> Result<&str, ParseFault> {
        Ok(self.rest())
    }

    fn index(&self) -> usize {
        self.position
    }

    fn finished(&mut self) -> Result<bool, ParseFault> {
        Ok(self.position == self.input.len())
    }

    fn hold(&mut self) -> Hold {
        self.holds.push(self.position)
    }

    fn release(&mut self, hold: Hold) -> Result<(), ParseFault> {
        self.holds.pop(hold).map(|_| ())
    }

    fn reset(&mut self, hold: Hold) -> Result<(), ParseFault> {
        self.position = self.holds.pop(hold)?;
        Ok(())
    }

    fn live_holds(&self) -> usize {
        self.holds.len()
    }
}
