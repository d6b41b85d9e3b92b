use crate::attributes::{stunt_attribute, DecodeAttributeValue, EncodeAttributeValue};
use crate::context::AttributeDecoderContext;
use crate::error::{StunError, StunErrorType};
use crate::Decode;
use byteorder::{BigEndian, ByteOrder};

const FINGERPRINT: u16 = 0x8028;
const FINGERPRINT_NAME: &str = "FINGERPRINT";
const FINGERPRINT_SIZE: usize = 4;
const FINGERPRINT_XOR_VALUE: u32 = 0x5354_554e;

/// The [`Fingerprint`] attribute MAY be present in all STUN messages.
/// Its value is the CRC-32 of the STUN message up to (but excluding)
/// the FINGERPRINT attribute itself, Xor'd with the 32-bit value
/// `0x5354554e`. The attribute keeps the value as it travels on the wire.
///
/// # Examples
///```rust
/// # use stun_attrs::{AttributeCodec, AttributeType, StunAttributeType};
/// # use stun_attrs::attributes::stun::Fingerprint;
/// let attr = Fingerprint::new(0xDEADBEEF);
/// assert_eq!(attr.attribute_type(), AttributeType::from(0x8028));
/// assert_eq!(attr.to_record(), [0x80, 0x28, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);
///```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u32);

impl Fingerprint {
    /// Creates a [`Fingerprint`] holding the value carried on the wire
    pub fn new(value: u32) -> Self {
        Fingerprint(value)
    }

    /// Computes the fingerprint of `input`.
    /// # Arguments:
    /// * `input`- the STUN message up to (but excluding) the FINGERPRINT
    ///   attribute itself, with its length field already covering it.
    pub fn compute(input: &[u8]) -> Self {
        let crc32 = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC).checksum(input);
        Fingerprint(crc32 ^ FINGERPRINT_XOR_VALUE)
    }

    /// Validates the input value with the CRC-32 attribute value
    /// # Arguments:
    /// * `input`- the STUN message up to (but excluding) the FINGERPRINT attribute itself.
    /// # Returns:
    /// true if `input` matches the fingerprint value.
    pub fn validate(&self, input: &[u8]) -> bool {
        *self == Fingerprint::compute(input)
    }

    /// Returns the value carried by this attribute
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Fingerprint {
    fn from(value: u32) -> Self {
        Fingerprint::new(value)
    }
}

impl PartialEq<u32> for Fingerprint {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl EncodeAttributeValue for Fingerprint {
    fn encode(&self, buffer: &mut Vec<u8>) {
        let pos = buffer.len();
        buffer.resize(pos + FINGERPRINT_SIZE, 0);
        BigEndian::write_u32(&mut buffer[pos..], self.0);
    }
}

impl DecodeAttributeValue for Fingerprint {
    fn decode(ctx: AttributeDecoderContext) -> Result<(Self, usize), StunError> {
        let raw_value = ctx.raw_value();
        if raw_value.len() != FINGERPRINT_SIZE {
            return Err(StunError::new(
                StunErrorType::MalformedAttribute,
                format!(
                    "Fingerprint value size {} != {}",
                    raw_value.len(),
                    FINGERPRINT_SIZE
                ),
            ));
        }
        let (value, size) = u32::decode(raw_value)?;
        Ok((Fingerprint(value), size))
    }
}

stunt_attribute!(Fingerprint, FINGERPRINT, FINGERPRINT_NAME);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeCodec;
    use crate::StunAttribute;

    #[test]
    fn encode_fingerprint() {
        let fingerprint = Fingerprint::new(0xdead_beef);
        assert_eq!(fingerprint.marshal(), [0xde, 0xad, 0xbe, 0xef]);

        let record = fingerprint.to_record();
        assert_eq!(record, [0x80, 0x28, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_fingerprint() {
        let value = [0xde, 0xad, 0xbe, 0xef];
        let fingerprint = Fingerprint::unmarshal(&value, None).expect("Can not decode Fingerprint");
        assert_eq!(fingerprint, Fingerprint::new(0xdead_beef));
        assert_eq!(fingerprint, 0xdead_beef);

        for value in [0u32, 1, 0x8000_0000, u32::MAX] {
            let fingerprint = Fingerprint::from(value);
            let decoded = Fingerprint::unmarshal(&fingerprint.marshal(), None)
                .expect("Can not decode Fingerprint");
            assert_eq!(fingerprint, decoded);
        }
    }

    #[test]
    fn decode_fingerprint_error() {
        let short = [0xde, 0xad, 0xbe];
        assert_eq!(
            Fingerprint::unmarshal(&short, None).expect_err("Error expected"),
            StunErrorType::MalformedAttribute
        );

        let long = [0xde, 0xad, 0xbe, 0xef, 0x00];
        assert_eq!(
            Fingerprint::unmarshal(&long, None).expect_err("Error expected"),
            StunErrorType::MalformedAttribute
        );

        assert_eq!(
            Fingerprint::unmarshal(&[], None).expect_err("Error expected"),
            StunErrorType::MalformedAttribute
        );
    }

    #[test]
    fn compute_fingerprint() {
        // CRC-32 of an empty input is zero
        let fingerprint = Fingerprint::compute(&[]);
        assert_eq!(fingerprint.as_u32(), FINGERPRINT_XOR_VALUE);
        assert!(fingerprint.validate(&[]));

        // CRC-32/ISO-HDLC check value
        let fingerprint = Fingerprint::compute(b"123456789");
        assert_eq!(fingerprint.as_u32(), 0xcbf4_3926 ^ FINGERPRINT_XOR_VALUE);
        assert!(fingerprint.validate(b"123456789"));
        assert!(!fingerprint.validate(b"12345678"));
    }

    #[test]
    fn fingerprint_stunt_attribute() {
        let attr = StunAttribute::Fingerprint(Fingerprint::new(0x1234));
        assert!(attr.is_fingerprint());
        assert!(attr.as_fingerprint().is_ok());
        assert!(attr.as_username().is_err());
        assert_eq!(attr.attribute_name(), "FINGERPRINT");
        assert!(attr.attribute_type().is_comprehension_optional());

        let dbg_fmt = format!("{:?}", attr);
        assert_eq!("Fingerprint(Fingerprint(4660))", dbg_fmt);
    }
}
