use crate::attributes::{stunt_attribute, DecodeAttributeValue, EncodeAttributeValue};
use crate::context::AttributeDecoderContext;
use crate::error::{StunError, StunErrorType};
use crate::Decode;

const USER_NAME: u16 = 0x0006;
const USER_NAME_NAME: &str = "USERNAME";
const SEPARATOR: char = ':';

const MAX_ENCODED_SIZE: usize = 509;
const MAX_DECODED_SIZE: usize = 763;

/// The USERNAME attribute identifies the user name and password
/// combination used in the message-integrity check. ICE agents fill it
/// with a user fragment and a password joined by a colon. It MUST contain
/// a UTF-8-encoded [`RFC3629`](https://datatracker.ietf.org/doc/html/rfc3629)
/// sequence of fewer than 509 bytes.
///
/// The user fragment can not contain a colon, the password can: decoding
/// splits the value on its first colon only.
///
/// # Examples
///```rust
/// # use stun_attrs::attributes::stun::Username;
/// # use stun_attrs::{AttributeCodec, StunErrorType};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let username = Username::new("alice", "s3cr:et")?;
/// assert_eq!(username.marshal(), b"alice:s3cr:et");
///
/// let decoded = Username::unmarshal(b"alice:s3cr:et", None)?;
/// assert_eq!(decoded.ufrag(), "alice");
/// assert_eq!(decoded.password(), "s3cr:et");
///
/// // A value without separator is not a valid user name
/// let result = Username::unmarshal(b"alice", None);
/// assert_eq!(result.expect_err("Error expected"), StunErrorType::MalformedUsername);
/// #
/// #  Ok(())
/// # }
///```
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Username {
    ufrag: String,
    password: String,
}

impl Username {
    /// Creates a [`Username`] attribute.
    /// # Returns:
    /// The attribute, or a [`StunError`] if the user fragment contains a
    /// colon or the encoded value would take 509 bytes or more.
    pub fn new<U, P>(ufrag: U, password: P) -> Result<Self, StunError>
    where
        U: Into<String>,
        P: Into<String>,
    {
        let ufrag = ufrag.into();
        let password = password.into();

        if ufrag.contains(SEPARATOR) {
            return Err(StunError::new(
                StunErrorType::MalformedUsername,
                format!("User fragment '{}' contains '{}'", ufrag, SEPARATOR),
            ));
        }

        let size = ufrag.len() + SEPARATOR.len_utf8() + password.len();
        if size >= MAX_ENCODED_SIZE {
            return Err(StunError::new(
                StunErrorType::ValueTooLong,
                format!(
                    "Value length {} >= max. encoded size {}",
                    size, MAX_ENCODED_SIZE
                ),
            ));
        }

        Ok(Username { ufrag, password })
    }

    /// Returns the user fragment
    pub fn ufrag(&self) -> &str {
        &self.ufrag
    }

    /// Returns the password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl EncodeAttributeValue for Username {
    fn encode(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self.ufrag.as_bytes());
        let mut sep = [0u8; 4];
        buffer.extend_from_slice(SEPARATOR.encode_utf8(&mut sep).as_bytes());
        buffer.extend_from_slice(self.password.as_bytes());
    }
}

impl DecodeAttributeValue for Username {
    fn decode(ctx: AttributeDecoderContext) -> Result<(Self, usize), StunError> {
        let (value, size) = <&'_ str as Decode<'_>>::decode(ctx.raw_value())?;

        if size > MAX_DECODED_SIZE {
            return Err(StunError::new(
                StunErrorType::ValueTooLong,
                format!(
                    "Value length {} > max. decoded size {}",
                    size, MAX_DECODED_SIZE
                ),
            ));
        }

        let (ufrag, password) = value.split_once(SEPARATOR).ok_or_else(|| {
            StunError::new(
                StunErrorType::MalformedUsername,
                format!("Separator '{}' not found", SEPARATOR),
            )
        })?;

        let attr = Username {
            ufrag: String::from(ufrag),
            password: String::from(password),
        };
        Ok((attr, size))
    }
}

stunt_attribute!(Username, USER_NAME, USER_NAME_NAME);
