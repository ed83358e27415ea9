//! Decoding BER-TLV encoded data.
//!
//! The main entry point is the [`Decoder`] type or, if the defaults are
//! fine, the [`decode`] function. Both turn encoded data into a sequence of
//! [`Node`][crate::Node]s.
//!
//! The types for reading the individual parts of an encoded value, i.e.,
//! [`Tag`][crate::Tag] and [`Length`][crate::Length], operate on a
//! [`SliceSource`], a cursor over the encoded data.

pub use self::decoder::{decode, Decoder};
pub use self::error::{DecodeError, ErrorKind};
pub use self::source::{Pos, SliceSource};

mod decoder;
mod error;
mod source;
