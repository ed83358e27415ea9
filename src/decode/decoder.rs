//! Decoding a stream of values into a tree.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::length::Length;
use crate::node::{take_value, Node, Value};
use crate::tag::Tag;
use super::error::{DecodeError, ErrorKind};
use super::source::SliceSource;


//------------ Decoder -------------------------------------------------------

/// A decoder for BER-TLV encoded data.
///
/// The decoder turns a sequence of encoded values into a sequence of
/// [`Node`]s, recursing into the content of constructed values. It is
/// purely structural: it recovers tags, lengths, and content octets but
/// doesn’t interpret any of them.
///
/// Decoding is strict. Any malformed value anywhere in the data fails the
/// whole decode and no partial result is returned.
///
/// The only thing to configure is the maximum nesting depth of
/// constructed values. This bounds the stack used for decoding
/// adversarial data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decoder {
    max_depth: usize,
}

impl Decoder {
    /// The default maximum nesting depth.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Creates a decoder with the default maximum nesting depth.
    pub fn new() -> Self {
        Self::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }

    /// Creates a decoder with the given maximum nesting depth.
    ///
    /// Values at the top level have a depth of zero, values nested in
    /// them a depth of one, and so on. A maximum depth of zero thus only
    /// allows constructed values that are empty.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Decoder { max_depth }
    }

    /// Returns the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes all values contained in `data`.
    ///
    /// Returns the top-level values in the order they appear. Empty data
    /// results in an empty sequence.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Node>, DecodeError> {
        self.decode_at_level(data, 0)
    }

    /// Decodes all values contained in `data` as if nested at `level`.
    pub fn decode_at_level(
        &self, data: &[u8], level: usize
    ) -> Result<Vec<Node>, DecodeError> {
        self.decode_source(&mut SliceSource::new(data), level)
    }

    /// Decodes all values remaining in a source.
    fn decode_source(
        &self, source: &mut SliceSource, level: usize
    ) -> Result<Vec<Node>, DecodeError> {
        if level > self.max_depth && !source.is_exhausted() {
            xerr!(return Err(source.error(ErrorKind::DepthExceeded)))
        }
        let mut res = Vec::new();
        while !source.is_exhausted() {
            res.push(self.take_node(source, level)?);
        }
        Ok(res)
    }

    /// Takes a single value from the source.
    fn take_node(
        &self, source: &mut SliceSource, level: usize
    ) -> Result<Node, DecodeError> {
        let tag = Tag::take_from(source)?;
        let length = Length::take_from(source)?;
        let value = if tag.is_constructed() {
            let start = source.pos().offset();
            let content = source.take_slice(length.value())?;
            Value::Constructed(self.decode_source(
                &mut SliceSource::with_origin(content, start), level + 1
            )?)
        }
        else {
            Value::Primitive(take_value(source, length.value())?)
        };
        Ok(Node::new(tag, length, value))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}


//------------ decode --------------------------------------------------------

/// Decodes all values contained in `data` using the default decoder.
pub fn decode(data: &[u8]) -> Result<Vec<Node>, DecodeError> {
    Decoder::new().decode(data)
}
