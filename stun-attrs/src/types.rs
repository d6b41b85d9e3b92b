use std::fmt;
use std::ops::Deref;

/// Size in bytes of a STUN transaction identifier
pub const TRANSACTION_ID_SIZE: usize = 12;

/// The transaction ID is a 96-bit identifier, used to uniquely identify
/// STUN transactions. Attributes whose encoding depends on the
/// transaction receive it when they are decoded.
///
/// # Examples
///```rust
/// # use stun_attrs::TransactionId;
/// let tid = TransactionId::from([0x11; 12]);
/// assert_eq!(tid.as_bytes(), &[0x11; 12]);
/// assert_eq!(format!("{}", tid), "transaction id (0x111111111111111111111111)");
///```
#[derive(PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct TransactionId([u8; TRANSACTION_ID_SIZE]);

impl TransactionId {
    /// Returns a reference to the bytes that represents the identifier.
    pub fn as_bytes(&self) -> &[u8; TRANSACTION_ID_SIZE] {
        &self.0
    }
}

fn fmt_transaction_id(bytes: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02X}", byte)?;
    }
    write!(f, ")")
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TransactionId(0x")?;
        fmt_transaction_id(self.as_ref(), f)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "transaction id (0x")?;
        fmt_transaction_id(self.as_ref(), f)
    }
}

impl Deref for TransactionId {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for TransactionId {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<&[u8; TRANSACTION_ID_SIZE]> for TransactionId {
    fn from(buff: &[u8; TRANSACTION_ID_SIZE]) -> Self {
        Self(*buff)
    }
}

impl From<[u8; TRANSACTION_ID_SIZE]> for TransactionId {
    fn from(buff: [u8; TRANSACTION_ID_SIZE]) -> Self {
        Self(buff)
    }
}

impl Default for TransactionId {
    /// Creates a random transaction ID chosen from the interval 0 .. 2**96-1.
    fn default() -> Self {
        Self(rand::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn transaction_id() {
        let tr1 = TransactionId::default();
        let tr2 = TransactionId::default();
        assert_ne!(tr1, tr2);

        let tr3 = TransactionId::from(tr1.as_bytes());
        assert_eq!(tr1, tr3);

        // Check deref
        let slice: &[u8] = &tr3;
        assert_eq!(slice, tr3.as_bytes());

        let tr = TransactionId::from([0xab; TRANSACTION_ID_SIZE]);
        assert_eq!(
            format!("{:?}", tr),
            "TransactionId(0xABABABABABABABABABABABAB)"
        );
    }

    #[test]
    fn check_random() {
        let mut transactions = HashSet::new();

        while transactions.len() < 1000 {
            let tr = TransactionId::default();
            assert!(!transactions.contains(&tr));
            transactions.insert(tr);
        }
    }
}
