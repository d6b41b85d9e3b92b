//! STUN attributes library.
//!
//! This crate provides the attribute layer of the STUN protocol used by
//! ICE connectivity checks: a type-length-value codec for the attributes
//! and a registry that maps attribute type codes to the kind that decodes
//! them. Message framing (header, magic cookie, message class and method)
//! is left to the caller.
//!
//! The implementation is based on:
//! * [`RFC8489`](https://datatracker.ietf.org/doc/html/rfc8489). Session Traversal Utilities for NAT (STUN).
//! * [`RFC8445`](https://datatracker.ietf.org/doc/html/rfc8445). Interactive Connectivity Establishment (ICE).
//! * [`RFC5769`](https://datatracker.ietf.org/doc/html/rfc5769). Test Vectors for Session Traversal Utilities for NAT (STUN).
//!
//! # Usage
//! Example that encodes a sequence of attributes
//!```rust
//! # use stun_attrs::attributes::stun::{Fingerprint, MessageIntegrity, Username};
//! # use stun_attrs::AttributeCodec;
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let username = Username::new("evtj", "h6vY")?;
//! let integrity = MessageIntegrity::new([0x9a; 20])?;
//!
//! let mut buffer = Vec::new();
//! username.write_to_buf(&mut buffer);
//! integrity.write_to_buf(&mut buffer);
//!
//! let fingerprint = Fingerprint::compute(&buffer);
//! fingerprint.write_to_buf(&mut buffer);
//!
//! // Every record is aligned to a 4-byte boundary
//! assert_eq!(buffer.len(), 16 + 24 + 8);
//! #
//! #   Ok(())
//! # }
//!```
//!
//! Example that decodes the attributes back
//!```rust
//! # use stun_attrs::{AttributeDecoderBuilder, StunErrorType};
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let buffer = [
//!     0x00, 0x06, 0x00, 0x09, // USERNAME attribute header
//!     0x65, 0x76, 0x74, 0x6a, // }
//!     0x3a, 0x68, 0x36, 0x76, // }  Username (9 bytes) and padding (3 bytes)
//!     0x59, 0x20, 0x20, 0x20, // }
//!     0x80, 0x28, 0x00, 0x04, // FINGERPRINT attribute header
//!     0xe5, 0x7a, 0x3b, 0xcf, // CRC32 fingerprint
//! ];
//!
//! let decoder = AttributeDecoderBuilder::default().build();
//! let attributes = decoder.decode_all(&buffer)?;
//! assert_eq!(attributes.len(), 2);
//!
//! let username = attributes[0].as_username()?;
//! assert_eq!(username.ufrag(), "evtj");
//! assert_eq!(username.password(), "h6vY");
//!
//! let fingerprint = attributes[1].as_fingerprint()?;
//! assert_eq!(fingerprint.as_u32(), 0xe57a3bcf);
//!
//! // Types that are not registered can not be decoded
//! let unknown = [0x80, 0x22, 0x00, 0x00];
//! let error = decoder.decode_all(&unknown).expect_err("Error expected");
//! assert_eq!(error, StunErrorType::UnknownAttributeType);
//! #
//! #   Ok(())
//! # }
//!```

#![deny(missing_docs)]

mod common;
mod context;
mod raw;
mod registry;
mod types;

pub mod attributes;
pub mod error;

pub use crate::attributes::{AttributeCodec, AttributeType, StunAttribute, StunAttributeType};
pub use crate::context::{AttributeDecoder, AttributeDecoderBuilder};
pub use crate::error::{StunError, StunErrorType};
pub use crate::raw::{RawAttribute, RawAttributes, RawAttributesIter, ATTRIBUTE_HEADER_SIZE};
pub use crate::registry::{lookup, AttributeKind};
pub use crate::types::{TransactionId, TRANSACTION_ID_SIZE};

/// Provides a simple interface to decode elements from buffers.
pub(crate) trait Decode<'a> {
    /// Decodes an object serialized in binary from a buffer.
    /// # Arguments:
    /// - `buffer`: input buffer were the object is encoded.
    /// # Returns:
    /// The object or a [`StunError`] describing the error.
    fn decode(buffer: &'a [u8]) -> Result<(Self, usize), StunError>
    where
        Self: Sized;
}

/// Decodes the TLV record at the beginning of `buffer`.
/// # Returns:
/// The attribute and the number of bytes taken by the record, padding
/// included.
pub fn decode_attribute(
    buffer: &[u8],
    transaction_id: Option<&TransactionId>,
) -> Result<(StunAttribute, usize), StunError> {
    decoder(transaction_id).decode(buffer)
}

/// Decodes a buffer holding a sequence of padded TLV records.
pub fn decode_attributes(
    buffer: &[u8],
    transaction_id: Option<&TransactionId>,
) -> Result<Vec<StunAttribute>, StunError> {
    decoder(transaction_id).decode_all(buffer)
}

fn decoder(transaction_id: Option<&TransactionId>) -> AttributeDecoder {
    let builder = AttributeDecoderBuilder::default();
    match transaction_id {
        Some(tid) => builder.with_transaction_id(*tid).build(),
        None => builder.build(),
    }
}
