//! STUN attributes carried by ICE connectivity checks
//! [`RFC8489`](https://datatracker.ietf.org/doc/html/rfc8489#section-14)

mod fingerprint;
mod message_integrity;
mod user_name;

use crate::registry::DecoderRegistry;
pub use fingerprint::Fingerprint;
pub use message_integrity::MessageIntegrity;
pub use user_name::Username;

pub(crate) fn stun_register_attributes(registry: &mut DecoderRegistry) {
    registry.register::<Fingerprint>();
    registry.register::<MessageIntegrity>();
    registry.register::<Username>();
}
