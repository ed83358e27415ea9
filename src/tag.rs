//! The identifier octets of a BER-TLV encoded value.

use std::fmt;
use crate::decode::{DecodeError, ErrorKind, SliceSource};


//------------ Constants -----------------------------------------------------

/// The maximum number of octets following the first identifier octet.
///
/// This includes the terminating octet. Identifier octets that still have
/// the continuation bit set in the last of these octets are rejected.
pub const MAX_CONTINUATION_OCTETS: usize = 9;

/// The maximum number of identifier octets of a tag.
const MAX_LEN: usize = MAX_CONTINUATION_OCTETS + 1;


//------------ Tag -----------------------------------------------------------

/// The tag of a BER-TLV encoded value.
///
/// Each encoded value starts with one or more identifier octets. The first
/// octet carries the class in its top two bits, whether the value is
/// constructed in bit 6, and the tag number in its low five bits. If those
/// five bits are all set, the number continues in subsequent octets, each
/// but the last having its top bit set.
///
/// The decoder doesn’t interpret tags in any way. It only keeps the raw
/// identifier octets around and offers a few ways to look at them.
///
/// # Tag Numbers
///
/// There are two numbers. The one returned by [`number`][Self::number] is
/// simply all identifier octets taken as a big-endian integer, including
/// the class and constructed bits as well as the continuation bits. This is
/// what the hex printout of a tag such as `9F1E` shows and what most
/// BER-TLV dictionaries (EMV, for instance) use to refer to tags.
///
/// The one returned by [`asn1_number`][Self::asn1_number] is the tag
/// number as defined by X.690, i.e., only the significant bits.
//
//  The octets beyond `len` are always zero so the derived comparisons
//  work.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag {
    /// The identifier octets, left aligned.
    octets: [u8; MAX_LEN],

    /// The number of identifier octets in use.
    len: u8,
}

impl Tag {
    /// The mask for the class bits of the first octet.
    const CLASS_MASK: u8 = 0xc0;

    /// The mask for the constructed bit of the first octet.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the tag number in the first octet.
    ///
    /// If all bits are set, the tag continues in the next octet.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The mask for the tag number in subsequent octets.
    const MULTIBYTE_DATA_MASK: u8 = 0x7f;

    /// The bit marking that more identifier octets follow.
    const CONTINUATION_MASK: u8 = 0x80;

    /// Takes a tag from the beginning of a source.
    ///
    /// If there aren’t enough octets left in the source for the complete
    /// identifier octets, returns a [`ErrorKind::BufferUnderrun`] error. If
    /// the identifier octets don’t terminate within
    /// [`MAX_CONTINUATION_OCTETS`] octets after the first one, returns a
    /// [`ErrorKind::TagTooLong`] error. The source is only advanced if a tag
    /// was taken successfully.
    pub fn take_from(source: &mut SliceSource) -> Result<Self, DecodeError> {
        let len = Self::peek_len(source)?;
        let mut octets = [0u8; MAX_LEN];
        octets[..len].copy_from_slice(source.take_slice(len)?);
        Ok(Tag { octets, len: len as u8 })
    }

    /// Determines the number of identifier octets at the start of a source.
    fn peek_len(source: &SliceSource) -> Result<usize, DecodeError> {
        let first = source.peek_nth(0)?;
        if first & Tag::SINGLEBYTE_DATA_MASK != Tag::SINGLEBYTE_DATA_MASK {
            return Ok(1)
        }
        for i in 1..=MAX_CONTINUATION_OCTETS {
            if source.peek_nth(i)? & Tag::CONTINUATION_MASK == 0 {
                return Ok(i + 1)
            }
        }
        xerr!(Err(source.error(ErrorKind::TagTooLong)))
    }

    /// Returns the identifier octets.
    pub fn octets(&self) -> &[u8] {
        &self.octets[..usize::from(self.len)]
    }

    /// Returns the number of identifier octets.
    pub fn encoded_len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        Class::from_u8(self.octets[0])
    }

    /// Returns whether the value is constructed.
    pub fn is_constructed(&self) -> bool {
        self.octets[0] & Tag::CONSTRUCTED_MASK != 0
    }

    /// Returns the raw tag number.
    ///
    /// This is all identifier octets as one big-endian integer, leaving
    /// all bits in place. For the identifier octets `9F 1E`, it is `0x9F1E`.
    pub fn number(&self) -> u128 {
        self.octets().iter().fold(0, |res, octet| {
            res << 8 | u128::from(*octet)
        })
    }

    /// Returns the tag number as defined by X.690.
    ///
    /// This is the low five bits of the first octet for single octet tags
    /// or the low seven bits of each subsequent octet, most significant
    /// first, for multi-octet tags. For the identifier octets `9F 1E`, it
    /// is `30`.
    pub fn asn1_number(&self) -> u64 {
        match self.octets() {
            [first] => u64::from(first & Tag::SINGLEBYTE_DATA_MASK),
            [_, tail @ ..] => {
                tail.iter().fold(0, |res, octet| {
                    res << 7 | u64::from(octet & Tag::MULTIBYTE_DATA_MASK)
                })
            }
            [] => unreachable!("tag without identifier octets"),
        }
    }
}

/// Decodes the identifier octets found at `offset` in `data`.
///
/// This is a convenience wrapper around [`Tag::take_from`]. Error
/// positions are relative to the start of `data`.
pub fn decode_tag(data: &[u8], offset: usize) -> Result<Tag, DecodeError> {
    let mut source = SliceSource::new(data);
    source.advance(offset)?;
    Tag::take_from(&mut source)
}


//--- Formatting

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.class() {
            Class::Universal => write!(f, "[UNIVERSAL ")?,
            Class::Application => write!(f, "[APPLICATION ")?,
            Class::Context => write!(f, "[")?,
            Class::Private => write!(f, "[PRIVATE ")?,
        }
        write!(f, "{}]", self.asn1_number())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:x})", self)
    }
}

impl fmt::LowerHex for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.number(), f)
    }
}

impl fmt::UpperHex for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.number(), f)
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
///
/// The class is carried in the top two bits of the first identifier octet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    const fn from_u8(octet: u8) -> Self {
        match octet & Tag::CLASS_MASK {
            0x00 => Self::Universal,
            0x40 => Self::Application,
            0x80 => Self::Context,
            _ => Self::Private
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn take(data: &[u8]) -> Result<(Tag, usize), DecodeError> {
        let mut source = SliceSource::new(data);
        let tag = Tag::take_from(&mut source)?;
        Ok((tag, source.remaining().len()))
    }

    #[test]
    fn single_octet_tags() {
        for first in 0u8..=0xff {
            if first & 0x1f == 0x1f {
                continue
            }
            let (tag, rest) = take(&[first, 0x00]).unwrap();
            assert_eq!(rest, 1);
            assert_eq!(tag.encoded_len(), 1);
            assert_eq!(tag.octets(), &[first]);
            assert_eq!(tag.number(), u128::from(first));
            assert_eq!(tag.asn1_number(), u64::from(first & 0x1f));
            assert_eq!(tag.is_constructed(), first & 0x20 != 0);
        }
    }

    #[test]
    fn multi_octet_tags() {
        let (tag, rest) = take(b"\x9f\x1e\x08").unwrap();
        assert_eq!(rest, 1);
        assert_eq!(tag.encoded_len(), 2);
        assert_eq!(tag.number(), 0x9f1e);
        assert_eq!(tag.asn1_number(), 30);
        assert_eq!(tag.class(), Class::Context);
        assert!(!tag.is_constructed());

        let (tag, _) = take(b"\xdf\x7f").unwrap();
        assert_eq!(tag.number(), 0xdf7f);
        assert_eq!(tag.asn1_number(), 0x7f);
        assert_eq!(tag.class(), Class::Private);

        let (tag, _) = take(b"\x3f\x81\x80\x01").unwrap();
        assert_eq!(tag.encoded_len(), 4);
        assert_eq!(tag.number(), 0x3f81_8001);
        assert_eq!(tag.asn1_number(), (1 << 14) | 1);
        assert_eq!(tag.class(), Class::Universal);
        assert!(tag.is_constructed());
    }

    #[test]
    fn longest_tag() {
        let data = b"\x5f\x81\x82\x83\x84\x85\x86\x87\x88\x09\xff";
        let (tag, rest) = take(data).unwrap();
        assert_eq!(rest, 1);
        assert_eq!(tag.encoded_len(), 10);
        assert_eq!(tag.octets(), &data[..10]);
        assert_eq!(tag.number(), 0x5f81_8283_8485_8687_8809);
        assert_eq!(tag.class(), Class::Application);
    }

    #[test]
    fn tag_failures() {
        let too_long = [
            0xff, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01
        ];
        let err = take(&too_long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TagTooLong);
        assert_eq!(err.pos().offset(), 0);

        assert_eq!(
            take(b"\x1f\x80\x80").unwrap_err().kind(),
            ErrorKind::BufferUnderrun
        );
        assert_eq!(take(b"\x1f").unwrap_err().kind(), ErrorKind::BufferUnderrun);
        assert_eq!(take(b"").unwrap_err().kind(), ErrorKind::BufferUnderrun);

        // Nothing is consumed on error.
        let mut source = SliceSource::new(b"\x1f\x80");
        assert!(Tag::take_from(&mut source).is_err());
        assert_eq!(source.remaining(), b"\x1f\x80");
    }

    #[test]
    fn decode_at_offset() {
        let tag = decode_tag(b"\x00\x01\x9f\x1e", 2).unwrap();
        assert_eq!(tag.number(), 0x9f1e);
        assert_eq!(
            decode_tag(b"\x00\x01", 3).unwrap_err().kind(),
            ErrorKind::BufferUnderrun
        );
        assert_eq!(
            decode_tag(b"\x00\x01\x9f", 2).unwrap_err().pos().offset(),
            2
        );
    }

    #[test]
    fn formatting() {
        let (tag, _) = take(b"\x9f\x1e").unwrap();
        assert_eq!(format!("{:x}", tag), "9f1e");
        assert_eq!(format!("{:X}", tag), "9F1E");
        assert_eq!(format!("{:?}", tag), "Tag(9f1e)");
        assert_eq!(tag.to_string(), "[30]");

        let (tag, _) = take(b"\x30").unwrap();
        assert_eq!(tag.to_string(), "[UNIVERSAL 16]");
        let (tag, _) = take(b"\xe1").unwrap();
        assert_eq!(tag.to_string(), "[PRIVATE 1]");
        let (tag, _) = take(b"\x61").unwrap();
        assert_eq!(tag.to_string(), "[APPLICATION 1]");
    }
}
