//! The read cursor over encoded data.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::fmt;
use super::error::{DecodeError, ErrorKind};


//------------ SliceSource ---------------------------------------------------

/// A read cursor over an immutable slice of encoded data.
///
/// The source never modifies the underlying data. Reading merely advances
/// the position. All methods that read either succeed completely or fail
/// with a [`ErrorKind::BufferUnderrun`] error and leave the position where
/// it was.
///
/// A source can be created for data that is itself part of some larger
/// buffer, e.g., the content of a constructed value. In this case, the
/// _origin_ of the source is the position of the data inside the larger
/// buffer and all positions reported by the source, including those in
/// errors, are relative to the larger buffer.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'s> {
    /// The complete data of the source.
    data: &'s [u8],

    /// The index of the next octet to read in `data`.
    pos: usize,

    /// The position of the first octet of `data` in the outermost buffer.
    origin: usize,
}

impl<'s> SliceSource<'s> {
    /// Creates a new source atop a slice.
    pub fn new(data: &'s [u8]) -> Self {
        Self::with_origin(data, 0)
    }

    /// Creates a new source for data found at `origin` in a larger buffer.
    pub fn with_origin(data: &'s [u8], origin: usize) -> Self {
        SliceSource { data, pos: 0, origin }
    }

    /// Returns the current position of the source.
    pub fn pos(&self) -> Pos {
        Pos(self.origin + self.pos)
    }

    /// Returns the data that hasn’t been read yet.
    pub fn remaining(&self) -> &'s [u8] {
        // self.pos is never advanced beyond the end of data.
        &self.data[self.pos..]
    }

    /// Returns whether all data has been read.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the n-th octet from the current position.
    ///
    /// Does not advance the source.
    pub fn peek_nth(&self, n: usize) -> Result<u8, DecodeError> {
        match self.remaining().get(n) {
            Some(value) => Ok(*value),
            None => xerr!(Err(self.error(ErrorKind::BufferUnderrun))),
        }
    }

    /// Takes a single octet from the source.
    pub fn take_u8(&mut self) -> Result<u8, DecodeError> {
        let res = self.peek_nth(0)?;
        self.pos += 1;
        Ok(res)
    }

    /// Takes the next `len` octets from the source.
    pub fn take_slice(&mut self, len: usize) -> Result<&'s [u8], DecodeError> {
        match self.remaining().get(..len) {
            Some(res) => {
                self.pos += len;
                Ok(res)
            }
            None => xerr!(Err(self.error(ErrorKind::BufferUnderrun))),
        }
    }

    /// Advances the source by `len` octets.
    pub fn advance(&mut self, len: usize) -> Result<(), DecodeError> {
        self.take_slice(len).map(|_| ())
    }

    /// Returns an error of the given kind at the current position.
    pub fn error(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos())
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type are used for diagnostics. They count octets from
/// the start of the data handed to the outermost decode call.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl Pos {
    /// Returns the position as an octet offset.
    pub fn offset(self) -> usize {
        self.0
    }
}

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//============ Tests =========================================================
