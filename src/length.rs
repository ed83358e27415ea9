//! The length octets of a BER-TLV encoded value.

use crate::decode::{DecodeError, ErrorKind, SliceSource};


//------------ Constants -----------------------------------------------------

/// The maximum number of subsequent octets in a long form length.
///
/// This limits lengths to 16,777,215 octets.
pub const MAX_LENGTH_OCTETS: usize = 3;


//------------ Length --------------------------------------------------------

/// The length octets of an encoded value.
///
/// # BER Encoding
///
/// The length can be encoded in one of two ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets are one octet long and this octet provides the
/// length of the content directly. Thus, if the first octet is less than
/// 128, it is the length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow. Those octets give the
/// big-endian encoding of the length of the content octets. Only up to
/// [`MAX_LENGTH_OCTETS`] following octets are supported.
///
/// A first octet of `0x80` signals the indefinite length form in BER. That
/// form isn’t supported. Taken literally, it announces zero following
/// octets and therefore a length of zero, which is how it is treated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Length {
    /// The length of the content octets.
    value: usize,

    /// The number of length octets.
    encoded_len: u8,
}

impl Length {
    /// The bit marking the long form.
    const LONG_FORM_MASK: u8 = 0x80;

    /// Takes the length octets from the beginning of a source.
    ///
    /// If the first octet announces more than [`MAX_LENGTH_OCTETS`]
    /// subsequent octets, returns a [`ErrorKind::LengthTooLarge`] error. If
    /// there aren’t enough octets in the source, returns a
    /// [`ErrorKind::BufferUnderrun`] error. The source is only advanced if
    /// the length was taken successfully.
    pub fn take_from(source: &mut SliceSource) -> Result<Self, DecodeError> {
        let first = source.peek_nth(0)?;
        if first & Length::LONG_FORM_MASK == 0 {
            source.advance(1)?;
            return Ok(Length { value: usize::from(first), encoded_len: 1 })
        }

        let len = usize::from(first & !Length::LONG_FORM_MASK);
        if len > MAX_LENGTH_OCTETS {
            xerr!(return Err(source.error(ErrorKind::LengthTooLarge)))
        }
        let octets = source.take_slice(len + 1)?;
        let value = octets[1..].iter().fold(0, |res, octet| {
            res << 8 | usize::from(*octet)
        });
        Ok(Length { value, encoded_len: (len + 1) as u8 })
    }

    /// Returns the length of the content octets.
    pub fn value(self) -> usize {
        self.value
    }

    /// Returns the number of length octets.
    pub fn encoded_len(self) -> usize {
        usize::from(self.encoded_len)
    }

    /// Returns whether the length uses the single octet short form.
    pub fn is_short(self) -> bool {
        self.encoded_len == 1
    }
}

/// Decodes the length octets found at `offset` in `data`.
///
/// This is a convenience wrapper around [`Length::take_from`]. Error
/// positions are relative to the start of `data`.
pub fn decode_length(
    data: &[u8], offset: usize
) -> Result<Length, DecodeError> {
    let mut source = SliceSource::new(data);
    source.advance(offset)?;
    Length::take_from(&mut source)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn take_from<const N: usize>(
        src: &[u8; N]
    ) -> Result<(usize, usize), ErrorKind> {
        let mut src = SliceSource::new(src.as_ref());
        let res = Length::take_from(&mut src).map_err(|err| err.kind())?;
        assert!(src.is_exhausted(), "trailing data");
        assert_eq!(res.encoded_len(), N);
        Ok((res.value(), res.encoded_len()))
    }

    #[test]
    fn short_form() {
        assert_eq!(take_from(b"\x00"), Ok((0x00, 1)));
        assert_eq!(take_from(b"\x12"), Ok((0x12, 1)));
        assert_eq!(take_from(b"\x7f"), Ok((0x7f, 1)));
    }

    #[test]
    fn long_form() {
        assert_eq!(take_from(b"\x80"), Ok((0, 1)));
        assert_eq!(take_from(b"\x81\x00"), Ok((0, 2)));
        assert_eq!(take_from(b"\x81\xF0"), Ok((0xF0, 2)));
        assert_eq!(take_from(b"\x82\x00\x00"), Ok((0, 3)));
        assert_eq!(take_from(b"\x82\xF0\x0E"), Ok((0xF00E, 3)));
        assert_eq!(take_from(b"\x82\x00\x0E"), Ok((0x0E, 3)));
        assert_eq!(take_from(b"\x83\xFF\xFF\xFF"), Ok((0xFF_FFFF, 4)));
        assert!(!Length::take_from(
            &mut SliceSource::new(b"\x81\x05")
        ).unwrap().is_short());
    }

    #[test]
    fn failures() {
        assert_eq!(
            take_from(b"\x84\x00\x00\x00\x01"),
            Err(ErrorKind::LengthTooLarge)
        );
        assert_eq!(take_from(b"\xFF"), Err(ErrorKind::LengthTooLarge));
        assert_eq!(take_from(b"\x82\x01"), Err(ErrorKind::BufferUnderrun));
        assert_eq!(take_from(b""), Err(ErrorKind::BufferUnderrun));

        let mut src = SliceSource::new(b"\x83\x01\x02");
        assert!(Length::take_from(&mut src).is_err());
        assert_eq!(src.remaining(), b"\x83\x01\x02");
    }

    #[test]
    fn decode_at_offset() {
        let len = decode_length(b"\x9f\x1e\x82\x01\x00", 2).unwrap();
        assert_eq!(len.value(), 0x100);
        assert_eq!(len.encoded_len(), 3);
        let err = decode_length(b"\x9f\x1e\x84", 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthTooLarge);
        assert_eq!(err.pos().offset(), 2);
    }
}
