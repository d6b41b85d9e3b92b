use crate::attributes::StunAttribute;
use crate::error::StunError;
use crate::raw::{RawAttribute, RawAttributes};
use crate::registry::lookup;
use crate::TransactionId;
use fallible_iterator::{FallibleIterator, IntoFallibleIterator};

#[derive(Debug, Default)]
pub(crate) struct AttributeDecoderContext<'a> {
    transaction_id: Option<&'a TransactionId>,
    raw_value: &'a [u8],
}

impl<'a> AttributeDecoderContext<'a> {
    pub(crate) fn new(transaction_id: Option<&'a TransactionId>, raw_value: &'a [u8]) -> Self {
        Self {
            transaction_id,
            raw_value,
        }
    }

    // Not read by any kind yet
    #[allow(dead_code)]
    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id
    }

    pub fn raw_value(&self) -> &[u8] {
        self.raw_value
    }
}

/// Builder class used to create an [`AttributeDecoder`]
#[derive(Debug, Default)]
pub struct AttributeDecoderBuilder(AttributeDecoder);

impl AttributeDecoderBuilder {
    /// Transaction identifier handed to attributes whose encoding
    /// depends on the transaction
    pub fn with_transaction_id(mut self, transaction_id: TransactionId) -> Self {
        self.0.transaction_id = Some(transaction_id);
        self
    }

    /// Builds an [`AttributeDecoder`]
    pub fn build(self) -> AttributeDecoder {
        self.0
    }
}

/// Decodes TLV records into [`StunAttribute`] values using the
/// attribute registry.
///
/// # Examples
///```rust
/// # use stun_attrs::AttributeDecoderBuilder;
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let buffer = [
///     0x00, 0x06, 0x00, 0x0d, // USERNAME header
///     0x61, 0x6c, 0x69, 0x63, // }
///     0x65, 0x3a, 0x73, 0x33, // } `alice:s3cr:et`
///     0x63, 0x72, 0x3a, 0x65, // }
///     0x74, 0x00, 0x00, 0x00, // } and padding
/// ];
/// let decoder = AttributeDecoderBuilder::default().build();
/// let (attr, size) = decoder.decode(&buffer)?;
/// assert_eq!(size, buffer.len());
///
/// let username = attr.as_username()?;
/// assert_eq!(username.ufrag(), "alice");
/// assert_eq!(username.password(), "s3cr:et");
/// #
/// #   Ok(())
/// # }
///```
#[derive(Debug, Default, Clone)]
pub struct AttributeDecoder {
    transaction_id: Option<TransactionId>,
}

impl AttributeDecoder {
    /// Decodes the record at the beginning of `buffer`.
    /// # Returns:
    /// The decoded attribute and the number of bytes taken by the record,
    /// padding included, or a [`StunError`] if the record is truncated,
    /// its type is not registered or its value is malformed.
    pub fn decode(&self, buffer: &[u8]) -> Result<(StunAttribute, usize), StunError> {
        let (raw, size) = RawAttribute::parse(buffer)?;
        let attr = self.decode_raw(&raw)?;
        Ok((attr, size))
    }

    /// Decodes a buffer containing a sequence of padded records.
    /// Decoding stops at the first record that can not be decoded.
    pub fn decode_all(&self, buffer: &[u8]) -> Result<Vec<StunAttribute>, StunError> {
        RawAttributes::from(buffer)
            .into_fallible_iter()
            .map(|raw| self.decode_raw(&raw))
            .collect()
    }

    fn decode_raw(&self, raw: &RawAttribute) -> Result<StunAttribute, StunError> {
        let kind = lookup(raw.attr_type)?;
        kind.decode(raw.value, self.transaction_id.as_ref())
    }
}
