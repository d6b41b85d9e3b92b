use crate::attributes::{
    stunt_attribute, DecodeAttributeValue, EncodeAttributeValue, MAX_VALUE_SIZE,
};
use crate::context::AttributeDecoderContext;
use crate::error::{StunError, StunErrorType};

const MESSAGE_INTEGRITY: u16 = 0x0008;
const MESSAGE_INTEGRITY_NAME: &str = "MESSAGE-INTEGRITY";

/// The [`MessageIntegrity`] attribute contains an `HMAC-SHA1`
/// [`RFC2104`](https://datatracker.ietf.org/doc/html/rfc2104)
/// of the STUN message. The digest is carried as an opaque byte
/// sequence, computing or checking it is left to the credential layer.
///
/// # Examples
///```rust
/// # use stun_attrs::attributes::stun::MessageIntegrity;
/// # use stun_attrs::{AttributeCodec, AttributeType, StunAttributeType};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let attr = MessageIntegrity::new([0x2b, 0x91, 0xf5])?;
/// assert_eq!(attr.attribute_type(), AttributeType::from(0x0008));
/// // Three bytes value plus one byte of padding
/// assert_eq!(attr.to_record(), [0x00, 0x08, 0x00, 0x03, 0x2b, 0x91, 0xf5, 0x00]);
/// #
/// #  Ok(())
/// # }
///```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageIntegrity(Vec<u8>);

impl MessageIntegrity {
    /// Creates a [`MessageIntegrity`] attribute carrying `digest`
    /// # Returns:
    /// The attribute or a [`StunError`] if the digest does not fit in
    /// an attribute value.
    pub fn new<T>(digest: T) -> Result<Self, StunError>
    where
        T: Into<Vec<u8>>,
    {
        let digest = digest.into();
        (digest.len() <= MAX_VALUE_SIZE)
            .then(|| MessageIntegrity(digest))
            .ok_or_else(|| {
                StunError::new(
                    StunErrorType::ValueTooLong,
                    format!("Digest length > max. allowed size {}", MAX_VALUE_SIZE),
                )
            })
    }

    /// Returns the digest carried by this attribute
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for MessageIntegrity {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl EncodeAttributeValue for MessageIntegrity {
    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self.0);
    }
}

impl DecodeAttributeValue for MessageIntegrity {
    fn decode(ctx: AttributeDecoderContext) -> Result<(Self, usize), StunError> {
        let raw_value = ctx.raw_value();
        let attr = MessageIntegrity::new(raw_value)?;
        Ok((attr, raw_value.len()))
    }
}

stunt_attribute!(MessageIntegrity, MESSAGE_INTEGRITY, MESSAGE_INTEGRITY_NAME);
