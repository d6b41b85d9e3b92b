use crate::common::{check_buffer_boundaries, padding};
use crate::error::{StunError, StunErrorType};
use crate::{AttributeType, Decode};
use byteorder::{BigEndian, ByteOrder};
use fallible_iterator::{FallibleIterator, IntoFallibleIterator};

/// Size in bytes of the type and length fields that precede every attribute value
pub const ATTRIBUTE_HEADER_SIZE: usize = 4;

// Format of STUN Attributes:
//      0                   1                   2                   3
//      0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//     |         Type                  |            Length             |
//     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//     |                         Value (variable)                ....
//     +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

/// A TLV record borrowed from a buffer, before its value is interpreted.
///
/// # Examples
///```rust
/// # use stun_attrs::{AttributeType, RawAttribute};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let buffer = [0x80, 0x28, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef];
/// let (raw, size) = RawAttribute::parse(&buffer)?;
/// assert_eq!(raw.attr_type, AttributeType::from(0x8028));
/// assert_eq!(raw.value, &[0xde, 0xad, 0xbe, 0xef]);
/// assert_eq!(size, 8);
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Attribute type
    pub attr_type: AttributeType,
    /// Attribute value of size equal to Length, padding excluded
    pub value: &'a [u8],
}

impl<'a> RawAttribute<'a> {
    /// Parses the record at the beginning of `buffer`.
    /// # Returns:
    /// The raw record and the number of bytes it takes in the buffer,
    /// padding included, or a [`StunError`] if the buffer is shorter than
    /// the record and its padding.
    pub fn parse(buffer: &'a [u8]) -> Result<(Self, usize), StunError> {
        let (attr, value_size) = RawAttribute::decode(buffer)?;
        let size = value_size + padding(value_size);
        check_buffer_boundaries(buffer, size)?;
        Ok((attr, size))
    }
}

impl<'a> Decode<'a> for RawAttribute<'a> {
    fn decode(buffer: &'a [u8]) -> Result<(Self, usize), StunError> {
        check_buffer_boundaries(buffer, ATTRIBUTE_HEADER_SIZE)?;
        let attr_type = BigEndian::read_u16(&buffer[..2]);
        let attr_length = BigEndian::read_u16(&buffer[2..4]);

        // required buffer size for value:
        // 2 Bytes (Type) + 2 Bytes (Length) + Length value
        let value_size: usize = ATTRIBUTE_HEADER_SIZE + attr_length as usize;

        check_buffer_boundaries(buffer, value_size)?;

        let value = &buffer[ATTRIBUTE_HEADER_SIZE..value_size];

        Ok((
            Self {
                attr_type: AttributeType::from(attr_type),
                value,
            },
            value_size,
        ))
    }
}

/// A buffer holding a sequence of padded TLV records.
///
/// # Examples
///```rust
/// # use stun_attrs::RawAttributes;
/// # use fallible_iterator::{FallibleIterator, IntoFallibleIterator};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let buffer = [
///     0x00, 0x06, 0x00, 0x03, // USERNAME header
///     0x61, 0x3a, 0x62, 0x00, // "a:b" and padding
///     0x80, 0x28, 0x00, 0x04, // FINGERPRINT header
///     0xde, 0xad, 0xbe, 0xef, // value
/// ];
/// let types: Vec<u16> = RawAttributes::from(&buffer[..])
///     .into_fallible_iter()
///     .map(|attr| Ok(attr.attr_type.as_u16()))
///     .collect()?;
/// assert_eq!(types, [0x0006, 0x8028]);
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug, PartialEq, Eq)]
pub struct RawAttributes<'a>(&'a [u8]);

impl<'a> From<&'a [u8]> for RawAttributes<'a> {
    fn from(buff: &'a [u8]) -> Self {
        RawAttributes(buff)
    }
}

/// Fallible iterator over the records of a [`RawAttributes`] buffer
#[derive(Debug, PartialEq, Eq)]
pub struct RawAttributesIter<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> RawAttributesIter<'a> {
    /// Offset of the next record to be parsed
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl<'a> FallibleIterator for RawAttributesIter<'a> {
    type Item = RawAttribute<'a>;
    type Error = StunError;

    fn next(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.pos == self.buffer.len() {
            return Ok(None);
        }

        let (attr, value_size) = RawAttribute::decode(&self.buffer[self.pos..])?;
        let next_pos = self.pos + value_size + padding(value_size);

        // The position only moves past records that fit in the buffer
        if next_pos > self.buffer.len() {
            return Err(StunError::new(
                StunErrorType::SmallBuffer,
                format!(
                    "Next position ({}) > buffer size: {}",
                    next_pos,
                    self.buffer.len()
                ),
            ));
        }

        self.pos = next_pos;
        Ok(Some(attr))
    }
}

impl<'a> IntoFallibleIterator for RawAttributes<'a> {
    type Item = RawAttribute<'a>;
    type Error = StunError;
    type IntoFallibleIter = RawAttributesIter<'a>;

    fn into_fallible_iter(self) -> Self::IntoFallibleIter {
        RawAttributesIter {
            buffer: self.0,
            pos: 0,
        }
    }
}
