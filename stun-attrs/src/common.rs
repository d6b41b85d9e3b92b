use crate::error::{StunError, StunErrorType};
use byteorder::{BigEndian, ByteOrder};

pub const DEFAULT_PADDING_VALUE: u8 = 0x00;

pub fn check_buffer_boundaries(buffer: &[u8], limit: usize) -> Result<(), StunError> {
    (buffer.len() >= limit).then_some(()).ok_or_else(|| {
        StunError::new(
            StunErrorType::SmallBuffer,
            format!("Required size: {}, buffer size: {}", limit, buffer.len()),
        )
    })
}

pub fn padding(value_size: usize) -> usize {
    (4 - (value_size & 3)) & 3
}

const U32_SIZE: usize = 4;
const U16_SIZE: usize = 2;

impl<'a> crate::Decode<'a> for u32 {
    fn decode(raw_value: &[u8]) -> Result<(Self, usize), StunError> {
        check_buffer_boundaries(raw_value, U32_SIZE)?;
        let value = BigEndian::read_u32(&raw_value[..U32_SIZE]);
        Ok((value, U32_SIZE))
    }
}

impl<'a> crate::Decode<'a> for u16 {
    fn decode(raw_value: &[u8]) -> Result<(Self, usize), StunError> {
        check_buffer_boundaries(raw_value, U16_SIZE)?;
        let value = BigEndian::read_u16(&raw_value[..U16_SIZE]);
        Ok((value, U16_SIZE))
    }
}

impl<'a> crate::Decode<'a> for &'a str {
    fn decode(raw_value: &'a [u8]) -> Result<(Self, usize), StunError> {
        let value = std::str::from_utf8(raw_value)?;
        Ok((value, value.len()))
    }
}

#[cfg(test)]
mod tests {
    use crate::common::*;
    use crate::Decode;

    #[test]
    fn test_padding() {
        // Check all u16 range
        for i in 0..u16::MAX {
            let v = i % 4;
            let v = if v == 0 { 0 } else { 4 - v };
            assert_eq!(padding(i.into()), v as usize);
        }
    }

    #[test]
    fn buffer_boundaries() {
        let buffer = [];
        assert!(check_buffer_boundaries(&buffer, 0).is_ok());
        assert_eq!(
            check_buffer_boundaries(&buffer, 1).expect_err("Error expected"),
            StunErrorType::SmallBuffer
        );

        let buffer: [u8; 1] = [0; 1];
        assert!(check_buffer_boundaries(&buffer, 1).is_ok());
        assert_eq!(
            check_buffer_boundaries(&buffer, 2).expect_err("Error expected"),
            StunErrorType::SmallBuffer
        );
    }

    #[test]
    fn decode_integers() {
        let buffer = [0xde, 0xad, 0xbe, 0xef, 0x01];
        let (value, size) = u32::decode(&buffer).expect("Can not decode u32");
        assert_eq!(value, 0xdead_beef);
        assert_eq!(size, 4);

        let (value, size) = u16::decode(&buffer).expect("Can not decode u16");
        assert_eq!(value, 0xdead);
        assert_eq!(size, 2);

        assert_eq!(
            u32::decode(&buffer[..3]).expect_err("Error expected"),
            StunErrorType::SmallBuffer
        );
    }

    #[test]
    fn decode_str() {
        let (value, size) = <&str>::decode(b"evtj:h6vY").expect("Can not decode str");
        assert_eq!(value, "evtj:h6vY");
        assert_eq!(size, 9);

        let buffer = [0x61, 0xc3, 0x28];
        assert_eq!(
            <&str>::decode(&buffer).expect_err("Error expected"),
            StunErrorType::MalformedAttribute
        );
    }
}
