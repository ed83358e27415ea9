//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{error, fmt};
use super::source::Pos;


//------------ ErrorKind -----------------------------------------------------

/// The kinds of failure that can happen while decoding.
///
/// Decoding is strict: the first failure aborts the whole decode, so
/// there is only ever one of these reported for a given input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Fewer octets remain than a field declares it needs.
    ///
    /// This covers tag continuation octets, length octets, and content
    /// octets running past the end of the enclosing data.
    BufferUnderrun,

    /// The identifier octets didn’t terminate within the scan limit.
    ///
    /// See [`MAX_CONTINUATION_OCTETS`][crate::tag::MAX_CONTINUATION_OCTETS].
    TagTooLong,

    /// The length octets announce more octets than are supported.
    ///
    /// See [`MAX_LENGTH_OCTETS`][crate::length::MAX_LENGTH_OCTETS].
    LengthTooLarge,

    /// Constructed values are nested deeper than the decoder allows.
    DepthExceeded,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BufferUnderrun => "unexpected end of data",
            ErrorKind::TagTooLong => "unterminated identifier octets",
            ErrorKind::LengthTooLarge => "excessive length",
            ErrorKind::DepthExceeded => "constructed values nested too deep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// The error knows what went wrong and the position in the decoded data
/// where it happened. The position is always relative to the start of the
/// data handed to the top-level decode call, even if the error happened
/// deep inside a constructed value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError {
    kind: ErrorKind,
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error of the given kind at the given position.
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        DecodeError { kind, pos }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the position in the data where the error happened.
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.pos)
    }
}

impl error::Error for DecodeError { }


//============ Tests =========================================================
