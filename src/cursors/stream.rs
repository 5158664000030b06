use crate::cursor::{Cursor, Hold, HoldStack};
use crate::error::ParseFault;
use std::io::{self, Read};

/// Bytes of consumed input kept around before eviction kicks in
pub const DEFAULT_RETENTION: usize = 4096;
/// Bytes requested from the source per read
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Tuning for a [`StreamCursor`], fixed when the cursor is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    retention: usize,
    chunk_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            retention: DEFAULT_RETENTION,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evict as soon as possible and read one byte at a time
    pub fn minimal() -> Self {
        StreamConfig {
            retention: 0,
            chunk_size: 1,
        }
    }

    pub fn with_retention(mut self, bytes: usize) -> Self {
        self.retention = bytes;
        self
    }

    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Cursor that pulls UTF-8 text lazily from a reader.
///
/// Only the window between the oldest live hold (or the current offset, if
/// no hold is live) and the farthest read-ahead is kept in memory. Consumed
/// input older than that is dropped once it grows past the configured
/// retention, so memory use does not depend on the total input size.
///
/// The reader is dropped as soon as it reports end of input.
#[derive(Debug)]
pub struct StreamCursor<R> {
    source: Option<R>,
    chunk: Vec<u8>,
    /// Undecoded tail of the last read (an incomplete UTF-8 sequence)
    pending: Vec<u8>,
    buffer: String,
    /// Logical offset of `buffer[0]`
    base: usize,
    position: usize,
    holds: HoldStack,
    config: StreamConfig,
}

impl<R: Read> StreamCursor<R> {
    pub fn new(source: R) -> Self {
        Self::with_config(source, StreamConfig::default())
    }

    pub fn with_config(source: R, config: StreamConfig) -> Self {
        StreamCursor {
            source: Some(source),
            chunk: vec![0; config.chunk_size],
            pending: Vec::new(),
            buffer: String::new(),
            base: 0,
            position: 0,
            holds: HoldStack::new(),
            config,
        }
    }

    pub fn config(&self) -> StreamConfig {
        self.config
    }

    /// Bytes currently retained in memory
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Logical offset of the oldest retained byte
    pub fn base(&self) -> usize {
        self.base
    }

    fn relative(&self) -> usize {
        self.position - self.base
    }

    fn available(&self) -> usize {
        self.buffer.len() - self.relative()
    }

    fn lookahead(&self) -> &str {
        self.buffer.get(self.relative()..).unwrap_or("")
    }

    /// Read until at least `min` unconsumed bytes are buffered or the source ends
    fn fill(&mut self, min: usize) -> Result<(), ParseFault> {
        while self.available() < min {
            if !self.read_chunk()? {
                break;
            }
        }
        Ok(())
    }

    /// Returns false once the source is exhausted
    fn read_chunk(&mut self) -> Result<bool, ParseFault> {
        self.evict();

        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };
        let read = loop {
            match source.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if read == 0 {
            self.source = None;
            let end = self.base + self.buffer.len();
            log::debug!("input exhausted at offset {end}");
            if !self.pending.is_empty() {
                return Err(ParseFault::InvalidUtf8 { offset: end });
            }
            return Ok(false);
        }

        log::trace!("read {read} bytes at offset {}", self.base + self.buffer.len());
        self.pending.extend_from_slice(&self.chunk[..read]);
        self.decode_pending()?;
        Ok(true)
    }

    /// Move every complete character from `pending` into the buffer
    fn decode_pending(&mut self) -> Result<(), ParseFault> {
        let end = self.base + self.buffer.len();
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            // error_len() is None for a sequence cut off by the read boundary
            Err(error) if error.error_len().is_none() => error.valid_up_to(),
            Err(error) => {
                return Err(ParseFault::InvalidUtf8 {
                    offset: end + error.valid_up_to(),
                });
            }
        };

        let decoded: Vec<u8> = self.pending.drain(..valid).collect();
        let text = String::from_utf8(decoded).map_err(|error| ParseFault::InvalidUtf8 {
            offset: end + error.utf8_error().valid_up_to(),
        })?;
        self.buffer.push_str(&text);
        Ok(())
    }

    /// Drop buffered input that no live hold can return to
    fn evict(&mut self) {
        let oldest = self.holds.oldest().unwrap_or(self.position);
        let reclaimable = oldest.saturating_sub(self.base);
        if reclaimable <= self.config.retention || !self.buffer.is_char_boundary(reclaimable) {
            return;
        }
        self.buffer.drain(..reclaimable);
        self.base = oldest;
        log::debug!(
            "evicted {reclaimable} bytes, retaining {} from offset {}",
            self.buffer.len(),
            self.base
        );
    }
}

impl<R: Read> Cursor for StreamCursor<R> {
    fn peek(&mut self) -> Result<Option<char>, ParseFault> {
        self.fill(1)?;
        Ok(self.lookahead().chars().next())
    }

    fn next(&mut self) -> Result<Option<char>, ParseFault> {
        let next = self.peek()?;
        if let Some(c) = next {
            self.position += c.len_utf8();
        }
        Ok(next)
    }

    fn advance(&mut self, n: usize) -> Result<usize, ParseFault> {
        self.fill(n)?;
        let consumed = n.min(self.available());
        let end = self.relative() + consumed;
        if !self.buffer.is_char_boundary(end) {
            return Err(ParseFault::Boundary {
                offset: self.base + end,
            });
        }
        self.position += consumed;
        Ok(consumed)
    }

    fn remaining(&mut self, min: usize) -> Result<&str, ParseFault> {
        self.fill(min)?;
        Ok(self.lookahead())
    }

    fn index(&self) -> usize {
        self.position
    }

    fn finished(&mut self) -> Result<bool, ParseFault> {
        self.fill(1)?;
        Ok(self.available() == 0 && self.source.is_none())
    }

    fn hold(&mut self) -> Hold {
        self.holds.push(self.position)
    }

    fn release(&mut self, hold: Hold) -> Result<(), ParseFault> {
        self.holds.pop(hold)?;
        self.evict();
        Ok(())
    }

    fn reset(&mut self, hold: Hold) -> Result<(), ParseFault> {
        let offset = self.holds.pop(hold)?;
        if offset < self.base {
            return Err(ParseFault::Evicted {
                offset,
                base: self.base,
            });
        }
        self.position = offset;
        self.evict();
        Ok(())
    }

    fn live_holds(&self) -> usize {
        self.holds.len()
    }
}
