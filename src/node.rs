//! Decoded values.

use std::slice;
use bytes::Bytes;
use smallvec::SmallVec;
use crate::decode::{DecodeError, SliceSource};
use crate::length::Length;
use crate::tag::Tag;


//------------ Node ----------------------------------------------------------

/// A decoded value.
///
/// A node consists of the tag and length of the value and its content. The
/// content is either the raw content octets for a primitive value or the
/// sequence of nested values for a constructed value.
///
/// A node owns its content outright. Primitive content is a copy of the
/// decoded data, so a node doesn’t keep the data it was decoded from
/// alive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    /// The tag of the value.
    tag: Tag,

    /// The length octets of the value.
    length: Length,

    /// The content of the value.
    value: Value,
}

impl Node {
    /// Creates a new node from its parts.
    pub(crate) fn new(tag: Tag, length: Length, value: Value) -> Self {
        Node { tag, length, value }
    }

    /// Returns the tag of the value.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the length octets of the value.
    pub fn length(&self) -> Length {
        self.length
    }

    /// Returns whether the value is constructed.
    pub fn is_constructed(&self) -> bool {
        self.tag.is_constructed()
    }

    /// Returns the content of the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Converts the node into its content.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the content octets if the value is primitive.
    pub fn primitive(&self) -> Option<&Bytes> {
        match self.value {
            Value::Primitive(ref inner) => Some(inner),
            Value::Constructed(_) => None,
        }
    }

    /// Returns the nested values if the value is constructed.
    pub fn children(&self) -> Option<&[Node]> {
        match self.value {
            Value::Primitive(_) => None,
            Value::Constructed(ref inner) => Some(inner),
        }
    }

    /// Returns the number of octets the encoded value occupied.
    ///
    /// This is the identifier octets, length octets, and content octets
    /// combined.
    pub fn encoded_len(&self) -> usize {
        self.tag.encoded_len() + self.length.encoded_len()
            + self.length.value()
    }

    /// Returns an iterator over all nodes of a forest.
    ///
    /// The nodes are visited in the order they appeared in the encoded
    /// data, i.e., each constructed node is followed by its nested values.
    pub fn walk(nodes: &[Node]) -> Walk {
        Walk::new(nodes)
    }
}


//------------ Value ---------------------------------------------------------

/// The content of a decoded value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// The raw content octets of a primitive value.
    Primitive(Bytes),

    /// The nested values of a constructed value in the order they appeared.
    Constructed(Vec<Node>),
}

impl Value {
    /// Returns whether this is the content of a primitive value.
    pub fn is_primitive(&self) -> bool {
        matches!(*self, Value::Primitive(_))
    }

    /// Returns whether this is the content of a constructed value.
    pub fn is_constructed(&self) -> bool {
        matches!(*self, Value::Constructed(_))
    }
}


//------------ extract_value -------------------------------------------------

/// Copies `len` octets starting at `offset` out of `data`.
///
/// Returns a [`BufferUnderrun`][crate::decode::ErrorKind::BufferUnderrun]
/// error if `data` is too short.
pub fn extract_value(
    data: &[u8], offset: usize, len: usize
) -> Result<Bytes, DecodeError> {
    let mut source = SliceSource::new(data);
    source.advance(offset)?;
    take_value(&mut source, len)
}

/// Takes `len` octets of content from a source and copies them.
pub(crate) fn take_value(
    source: &mut SliceSource, len: usize
) -> Result<Bytes, DecodeError> {
    source.take_slice(len).map(Bytes::copy_from_slice)
}


//------------ Walk ----------------------------------------------------------

/// An iterator over a forest of nodes.
///
/// Each item is a node and its level, i.e., the number of constructed
/// values it is nested in. Nodes are visited depth first in the order they
/// appeared in the encoded data.
//
//  The stack holds the iterators for the sibling sequences entered so far
//  with the innermost one on top. Its length is the level of the next node.
pub struct Walk<'a> {
    stack: SmallVec<[slice::Iter<'a, Node>; 8]>,
}

impl<'a> Walk<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        let mut stack = SmallVec::new();
        stack.push(nodes.iter());
        Walk { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.len().checked_sub(1)?;
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(node) => {
                    if let Some(children) = node.children() {
                        self.stack.push(children.iter());
                    }
                    return Some((level, node))
                }
                None => {
                    // Climb up the stack.
                    self.stack.pop();
                }
            }
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::decode::{decode, ErrorKind};
    use super::*;

    #[test]
    fn extract() {
        let data = b"\x01\x02\x03\x04";
        assert_eq!(extract_value(data, 1, 2).unwrap().as_ref(), b"\x02\x03");
        assert_eq!(extract_value(data, 4, 0).unwrap().as_ref(), b"");
        assert_eq!(
            extract_value(data, 3, 2).unwrap_err().kind(),
            ErrorKind::BufferUnderrun
        );
        assert_eq!(
            extract_value(data, 5, 0).unwrap_err().kind(),
            ErrorKind::BufferUnderrun
        );
    }

    #[test]
    fn accessors() {
        let nodes = decode(b"\x30\x05\x81\x03abc\x04\x81\x00").unwrap();
        assert_eq!(nodes.len(), 2);

        let cons = &nodes[0];
        assert!(cons.is_constructed());
        assert!(cons.value().is_constructed());
        assert!(cons.primitive().is_none());
        assert_eq!(cons.encoded_len(), 7);
        let children = cons.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].primitive().unwrap().as_ref(), b"abc");
        assert_eq!(children[0].tag().number(), 0x81);

        let prim = &nodes[1];
        assert!(!prim.is_constructed());
        assert!(prim.value().is_primitive());
        assert!(prim.children().is_none());
        assert_eq!(prim.length().encoded_len(), 2);
        assert_eq!(prim.encoded_len(), 3);
        assert_eq!(
            prim.clone().into_value(), Value::Primitive(Bytes::new())
        );
    }

    #[test]
    fn walk() {
        let nodes = decode(
            b"\x30\x08\x31\x03\x04\x01a\x04\x01b\x04\x01c\x31\x00"
        ).unwrap();
        let items: Vec<_> = Node::walk(&nodes).map(|(level, node)| {
            (level, node.tag().number())
        }).collect();
        assert_eq!(
            items,
            [(0, 0x30), (1, 0x31), (2, 0x04), (1, 0x04), (0, 0x04), (0, 0x31)]
        );

        assert_eq!(Node::walk(&[]).next(), None);
    }
}
