use crate::attributes::{AttributeType, DecodeAttributeValue, StunAttribute};
use crate::context::AttributeDecoderContext;
use crate::error::{StunError, StunErrorType};
use crate::{StunAttributeType, TransactionId};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

pub(crate) type DecoderHandler =
    fn(AttributeDecoderContext) -> Result<(StunAttribute, usize), StunError>;

/// An attribute kind known by the registry: its type code, its name
/// and the constructor that decodes its values.
///
/// # Examples
///```rust
/// # use stun_attrs::attributes::stun::Username;
/// # use stun_attrs::{lookup, StunAttributeType};
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let kind = lookup(0x0006)?;
/// assert_eq!(kind.attribute_type(), Username::get_type());
/// assert_eq!(kind.name(), "USERNAME");
///
/// let attr = kind.decode(b"evtj:h6vY", None)?;
/// assert_eq!(attr.as_username()?.ufrag(), "evtj");
/// #
/// #   Ok(())
/// # }
///```
#[derive(Clone, Copy)]
pub struct AttributeKind {
    attr_type: AttributeType,
    name: &'static str,
    handler: DecoderHandler,
}

impl AttributeKind {
    /// Returns the type code of this kind
    pub fn attribute_type(&self) -> AttributeType {
        self.attr_type
    }

    /// Returns the human readable name of this kind
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes a value-only byte sequence as an attribute of this kind
    pub fn decode(
        &self,
        raw_value: &[u8],
        transaction_id: Option<&TransactionId>,
    ) -> Result<StunAttribute, StunError> {
        let ctx = AttributeDecoderContext::new(transaction_id, raw_value);
        let (attr, _) = (self.handler)(ctx)?;
        Ok(attr)
    }
}

impl fmt::Debug for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AttributeKind")
            .field("attr_type", &self.attr_type)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for AttributeKind {
    fn eq(&self, other: &Self) -> bool {
        // The registry holds one kind per type
        self.attr_type == other.attr_type
    }
}

impl Eq for AttributeKind {}

#[derive(Default)]
pub(crate) struct DecoderRegistry(HashMap<AttributeType, AttributeKind>);

impl DecoderRegistry {
    pub fn register<A>(&mut self)
    where
        A: DecodeAttributeValue + StunAttributeType + Into<StunAttribute> + 'static,
    {
        let kind = AttributeKind {
            attr_type: A::get_type(),
            name: A::get_name(),
            handler: |ctx: AttributeDecoderContext| {
                let (val, size) = A::decode(ctx)?;
                Ok((val.into(), size))
            },
        };
        assert!(
            self.0.insert(A::get_type(), kind).is_none(),
            "Could not register attribute type 0x{:04X} becasuse is already registered",
            A::get_type().as_u16()
        );
    }
}

lazy_static! {
    static ref REGISTRY: DecoderRegistry = {
        let mut registry = DecoderRegistry::default();
        crate::attributes::stun::stun_register_attributes(&mut registry);
        registry
    };
}

/// Looks up the attribute kind registered for a type code.
/// # Returns:
/// The registered [`AttributeKind`], or a [`StunError`] of type
/// [`StunErrorType::UnknownAttributeType`] if no kind uses that code.
pub fn lookup<T>(attr_type: T) -> Result<&'static AttributeKind, StunError>
where
    T: Into<AttributeType>,
{
    let attr_type = attr_type.into();
    REGISTRY.0.get(&attr_type).ok_or_else(|| {
        StunError::new(
            StunErrorType::UnknownAttributeType,
            format!("No attribute registered for {}", attr_type),
        )
    })
}
