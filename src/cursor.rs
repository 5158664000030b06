use crate::error::ParseFault;

/// Position within an input, with stack-disciplined backtracking.
///
/// Offsets are byte offsets into the UTF-8 input. `peek` and `next` work on
/// whole characters, `advance` and `remaining` count bytes. Reading past the
/// end yields `None` (or an empty view) and never faults.
///
/// Backtracking points are taken with [`hold`](Cursor::hold) and must be given
/// back, innermost first, with either [`release`](Cursor::release) (keep the
/// current position) or [`reset`](Cursor::reset) (return to the held offset).
/// While a hold is live the cursor guarantees it can still return to it.
pub trait Cursor {
    /// Next character without consuming it
    fn peek(&mut self) -> Result<Option<char>, ParseFault>;

    /// Consume and return the next character
    fn next(&mut self) -> Result<Option<char>, ParseFault>;

    /// Consume up to `n` bytes, returning how many were consumed
    ///
    /// Stopping inside a multi-byte character is a [`ParseFault::Boundary`].
    fn advance(&mut self, n: usize) -> Result<usize, ParseFault>;

    /// Unconsumed input, at least `min` bytes long unless the input ends first
    fn remaining(&mut self, min: usize) -> Result<&str, ParseFault>;

    /// Current logical offset
    fn index(&self) -> usize;

    /// True once every byte of the input has been consumed
    fn finished(&mut self) -> Result<bool, ParseFault>;

    /// Take a backtracking point at the current offset
    fn hold(&mut self) -> Hold;

    /// Drop the innermost hold without moving
    fn release(&mut self, hold: Hold) -> Result<(), ParseFault>;

    /// Drop the innermost hold and move back to its offset
    fn reset(&mut self, hold: Hold) -> Result<(), ParseFault>;

    /// Number of holds currently live
    fn live_holds(&self) -> usize;
}

/// A live backtracking point.
///
/// Holds are not `Clone`: each one is given back exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a hold must be released or reset"]
pub struct Hold {
    offset: usize,
    depth: usize,
}

impl Hold {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Stack of live hold offsets shared by the cursor implementations
#[derive(Debug, Default, Clone)]
pub struct HoldStack {
    offsets: Vec<usize>,
}

impl HoldStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, offset: usize) -> Hold {
        let depth = self.offsets.len();
        self.offsets.push(offset);
        Hold { offset, depth }
    }

    /// Pop `hold`, which must be the innermost live hold
    pub fn pop(&mut self, hold: Hold) -> Result<usize, ParseFault> {
        let top = self.offsets.len().checked_sub(1);
        if top != Some(hold.depth) || self.offsets.last() != Some(&hold.offset) {
            return Err(ParseFault::HoldOrder {
                offset: hold.offset,
                depth: hold.depth,
                live: self.offsets.len(),
            });
        }
        self.offsets.pop();
        Ok(hold.offset)
    }

    /// Offset of the outermost live hold
    pub fn oldest(&self) -> Option<usize> {
        self.offsets.first().copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Run `body` under a single hold.
///
/// The hold is released when `body` matches and reset when it does not. A
/// fault resets the cursor too before it is passed on, so enclosing holds stay
/// in order.
pub fn atomically<T>(
    cursor: &mut dyn Cursor,
    body: impl FnOnce(&mut dyn Cursor) -> Result<Option<T>, ParseFault>,
) -> Result<Option<T>, ParseFault> {
    let hold = cursor.hold();
    match body(cursor) {
        Ok(Some(value)) => {
            cursor.release(hold)?;
            Ok(Some(value))
        }
        Ok(None) => {
            cursor.reset(hold)?;
            Ok(None)
        }
        Err(fault) => {
            if let Err(rollback) = cursor.reset(hold) {
                log::warn!("rollback failed while propagating fault ({fault}): {rollback}");
            }
            Err(fault)
        }
    }
}
