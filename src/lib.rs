//! Structural decoding of BER-TLV encoded data.
//!
//! BER-TLV data is a sequence of values, each consisting of a tag, a
//! length, and as many content octets as the length says. The content of a
//! _constructed_ value is itself a sequence of such values.
//!
//! This crate turns such data into a tree of [`Node`]s. It recovers the
//! structure and the raw content octets but does not interpret tags or
//! content in any way.
//!
//! ```
//! use bertlv::decode;
//!
//! let nodes = decode(b"\xe1\x0a\x9f\x1e\x02\x16\x02\xef\x03\x5a\x01\xff")
//!     .unwrap();
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes[0].tag().number(), 0xe1);
//!
//! let children = nodes[0].children().unwrap();
//! assert_eq!(children[0].tag().number(), 0x9f1e);
//! assert_eq!(children[0].primitive().unwrap().as_ref(), b"\x16\x02");
//! ```
//!
//! Decoding is strict: malformed data anywhere fails the whole decode with
//! a [`DecodeError`]. To bound the stack used on hostile data, the
//! [`Decoder`] limits how deeply constructed values can be nested.
//!
//! If something should be done for every decoded value, have a look at the
//! [`observe`] module.

pub use self::decode::{decode, DecodeError, Decoder, ErrorKind};
pub use self::length::Length;
pub use self::node::{Node, Value, Walk};
pub use self::tag::{Class, Tag};

#[macro_use] pub mod debug;

pub mod decode;
pub mod length;
pub mod node;
pub mod observe;
pub mod tag;
