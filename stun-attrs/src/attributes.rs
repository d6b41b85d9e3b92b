//! STUN Attributes.
//! This module contains the closed set of attributes this crate knows
//! how to encode and decode.

use crate::common::{padding, DEFAULT_PADDING_VALUE};
use crate::context::AttributeDecoderContext;
use crate::error::StunError;
use crate::raw::ATTRIBUTE_HEADER_SIZE;
use crate::registry::lookup;
use crate::TransactionId;
use byteorder::{BigEndian, ByteOrder};
use std::fmt;

pub mod stun;

/// Maximum number of bytes the length field of a record can describe
pub(crate) const MAX_VALUE_SIZE: usize = u16::MAX as usize;

pub(crate) trait EncodeAttributeValue {
    /// Appends the value-only encoding to `buffer`.
    fn encode(&self, buffer: &mut Vec<u8>);
}

pub(crate) trait DecodeAttributeValue {
    fn decode(ctx: AttributeDecoderContext) -> Result<(Self, usize), StunError>
    where
        Self: Sized;
}

/// A STUN attribute type is a hex number in the range 0x0000-0xFFFF.
/// STUN attribute types in the range 0x0000-0x7FFF are considered
/// comprehension-required.
///
/// # Examples
///```rust
/// # use stun_attrs::AttributeType;
/// let attr_type = AttributeType::from(0x0008);
/// assert_eq!(attr_type.as_u16(), 0x0008);
/// assert_eq!(attr_type.to_be_bytes(), [0x00, 0x08]);
/// // This is a comprehension required attribute
/// assert!(attr_type.is_comprehension_required());
/// // This is not a comprehension optional attribute
/// assert!(!attr_type.is_comprehension_optional());
///```
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct AttributeType(u16);
impl AttributeType {
    /// Creates a new [`AttributeType` ]
    pub fn new(attr_type: u16) -> Self {
        AttributeType(attr_type)
    }

    /// Return the [`u16`] representation of this attribute type
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the network byte order representation of this attribute type
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Returns true if this is a comprehension required attribute
    pub fn is_comprehension_required(&self) -> bool {
        // Comprehension-required range (0x0000-0x7FFF):
        self.0 < 0x8000
    }

    /// Returns true if this is a comprehension optional attribute
    pub fn is_comprehension_optional(self) -> bool {
        // Comprehension-optional range (0x8000-0xFFFF)
        !self.is_comprehension_required()
    }
}

impl From<u16> for AttributeType {
    fn from(val: u16) -> Self {
        Self::new(val)
    }
}

impl From<AttributeType> for u16 {
    fn from(val: AttributeType) -> Self {
        val.0
    }
}

impl fmt::Debug for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AttributeType (0x{:04X})", self.0)?;
        Ok(())
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "attribute type (0x{:04X})", self.0)?;
        Ok(())
    }
}

/// Trait implemented by all [`StunAttribute`]
pub trait StunAttributeType {
    /// Returns the STUN attribute type of this instance.
    fn attribute_type(&self) -> AttributeType;

    /// Returns the human readable name of this instance.
    fn attribute_name(&self) -> &'static str;

    /// Returns the STUN attribute type.
    fn get_type() -> AttributeType
    where
        Self: Sized;

    /// Returns the human readable name of the attribute, as registered
    /// in the IANA STUN Attributes registry.
    fn get_name() -> &'static str
    where
        Self: Sized;
}

/// Encoding and decoding contract shared by every attribute kind.
pub trait AttributeCodec: StunAttributeType {
    /// Returns the value-only encoding of this attribute: no header and
    /// no padding.
    fn marshal(&self) -> Vec<u8>;

    /// Parses a value-only byte sequence.
    /// # Arguments:
    /// - `raw_value`: the attribute value, without header or padding.
    /// - `transaction_id`: transaction of the message carrying the attribute,
    ///   only read by kinds whose encoding depends on it.
    fn unmarshal(
        raw_value: &[u8],
        transaction_id: Option<&TransactionId>,
    ) -> Result<Self, StunError>
    where
        Self: Sized;

    /// Appends a complete TLV record to `buffer`.
    /// # Returns:
    /// The number of bytes appended: header, value and the padding
    /// required to end the record on a 4-byte boundary.
    fn write_to_buf(&self, buffer: &mut Vec<u8>) -> usize;

    /// Allocates a new buffer holding a complete TLV record.
    fn to_record(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.write_to_buf(&mut buffer);
        buffer
    }
}

/// Writes `type | length | value | padding` at the end of `buffer`.
pub(crate) fn write_record<A>(buffer: &mut Vec<u8>, attr_type: AttributeType, attr: &A) -> usize
where
    A: EncodeAttributeValue + ?Sized,
{
    let start = buffer.len();
    buffer.resize(start + ATTRIBUTE_HEADER_SIZE, 0);
    attr.encode(buffer);

    let value_size = buffer.len() - start - ATTRIBUTE_HEADER_SIZE;
    // Constructors reject values the length field can not describe
    debug_assert!(value_size <= MAX_VALUE_SIZE);
    BigEndian::write_u16(&mut buffer[start..start + 2], attr_type.as_u16());
    BigEndian::write_u16(&mut buffer[start + 2..start + 4], value_size as u16);

    let padded_size = buffer.len() + padding(value_size);
    buffer.resize(padded_size, DEFAULT_PADDING_VALUE);

    buffer.len() - start
}

macro_rules! stunt_attribute (
    ($attr_class:ident, $attr_type:ident, $attr_name:ident) => {
        impl crate::attributes::StunAttributeType for $attr_class {
            fn get_type() -> crate::attributes::AttributeType where Self: Sized {
                crate::attributes::AttributeType::from($attr_type)
            }
            fn get_name() -> &'static str where Self: Sized {
                $attr_name
            }
            fn attribute_type(&self) -> crate::attributes::AttributeType {
                <$attr_class as crate::attributes::StunAttributeType>::get_type()
            }
            fn attribute_name(&self) -> &'static str {
                <$attr_class as crate::attributes::StunAttributeType>::get_name()
            }
        }
        impl crate::attributes::AttributeCodec for $attr_class {
            fn marshal(&self) -> Vec<u8> {
                let mut buffer = Vec::new();
                crate::attributes::EncodeAttributeValue::encode(self, &mut buffer);
                buffer
            }
            fn unmarshal(
                raw_value: &[u8],
                transaction_id: Option<&crate::TransactionId>,
            ) -> Result<Self, crate::StunError> {
                let ctx = crate::context::AttributeDecoderContext::new(transaction_id, raw_value);
                let (attr, _) =
                    <$attr_class as crate::attributes::DecodeAttributeValue>::decode(ctx)?;
                Ok(attr)
            }
            fn write_to_buf(&self, buffer: &mut Vec<u8>) -> usize {
                let attr_type = <$attr_class as crate::attributes::StunAttributeType>::get_type();
                crate::attributes::write_record(buffer, attr_type, self)
            }
        }
        impl From<$attr_class> for crate::attributes::StunAttribute {
            fn from(value: $attr_class) -> Self {
                crate::attributes::StunAttribute::$attr_class(value)
            }
        }
    }
);
pub(crate) use stunt_attribute;

macro_rules! stunt_attribute_impl (
    ($(($class:ident, $mod:ident)),*) => {
        paste::paste! {
            /// STUN Attributes known by this crate
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub enum StunAttribute {
                $(
                    #[doc = "The `" $class "` attribute"]
                    $class($mod::$class),
                )*
            }
        }

        impl EncodeAttributeValue for StunAttribute {
            fn encode(&self, buffer: &mut Vec<u8>) {
                match self {
                    $(
                        StunAttribute::$class(attr) => attr.encode(buffer),
                    )*
                }
            }
        }

        impl StunAttribute {
            /// Returns the STUN attribute type of this instance.
            pub fn attribute_type(&self) -> AttributeType {
                match self {
                    $(
                        StunAttribute::$class(attr) => attr.attribute_type(),
                    )*
                }
            }

            /// Returns the human readable name of this instance.
            pub fn attribute_name(&self) -> &'static str {
                match self {
                    $(
                        StunAttribute::$class(attr) => attr.attribute_name(),
                    )*
                }
            }

            $(
                paste::paste! {
                    #[doc = "Returns true if this `StunAttribute` is `" $class "`"]
                    pub fn [<is_ $class:snake>] (&self) -> bool {
                        matches!(self, StunAttribute::$class(_))
                    }

                    #[doc = "Returns a reference to the internal attribute value or an error if the type of the attribute is not `" $class "`"]
                    pub fn [<as_ $class:snake>] (&self) -> Result<&$mod::$class, crate::StunError> {
                        match self {
                            StunAttribute::$class(attr) => Ok(attr),
                            #[allow(unreachable_patterns)]
                            _ => Err(crate::error::StunError::new(
                                crate::error::StunErrorType::MalformedAttribute,
                                format!("Attribute is not of type {}", std::stringify!($class))
                            )),
                        }
                    }

                    #[doc = "Returns a reference to the `" $class "` attribute."]
                    #[doc = "# Panics"]
                    #[doc = "Panics if the attribute is not an `" $class  "`"]
                    pub fn [<expect_ $class:snake>](&self) -> &$mod::$class {
                        self.[<as_ $class:snake>]().unwrap()
                    }
                }
            )*
        }
    }
);

stunt_attribute_impl!(
    (Fingerprint, stun),
    (MessageIntegrity, stun),
    (Username, stun)
);

impl StunAttribute {
    /// Returns the value-only encoding of this attribute.
    pub fn marshal(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.encode(&mut buffer);
        buffer
    }

    /// Parses a value-only byte sequence as an attribute of type `attr_type`.
    /// # Returns:
    /// The decoded attribute, or a [`StunError`] if `attr_type` is not
    /// registered or the value does not match the encoding of the kind.
    pub fn unmarshal(
        attr_type: AttributeType,
        raw_value: &[u8],
        transaction_id: Option<&TransactionId>,
    ) -> Result<Self, StunError> {
        lookup(attr_type)?.decode(raw_value, transaction_id)
    }

    /// Appends a complete, padded TLV record to `buffer`.
    /// # Returns:
    /// The number of bytes appended.
    pub fn write_to_buf(&self, buffer: &mut Vec<u8>) -> usize {
        write_record(buffer, self.attribute_type(), self)
    }

    /// Allocates a new buffer holding a complete TLV record.
    pub fn to_record(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.write_to_buf(&mut buffer);
        buffer
    }
}
