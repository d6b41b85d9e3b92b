use fallible_iterator::{FallibleIterator, IntoFallibleIterator};
use stun_attrs::attributes::stun::{Fingerprint, MessageIntegrity, Username};
use stun_attrs::{
    decode_attributes, AttributeCodec, AttributeDecoderBuilder, AttributeType, RawAttributes,
    StunAttribute, StunAttributeType, StunErrorType, TransactionId,
};

const RAW: [u8; 12] = [0x11; 12];

fn username_values() -> Vec<Username> {
    [
        ("evtj", "h6vY"),
        ("alice", "s3cr:et"),
        ("a", ""),
        ("", ":::"),
        ("\u{30DE}\u{30C8}", "\u{30EA}\u{30C3}\u{30AF}\u{30B9}"),
    ]
    .iter()
    .map(|(ufrag, password)| Username::new(*ufrag, *password).expect("Can not create Username"))
    .collect()
}

fn integrity_values() -> Vec<MessageIntegrity> {
    [Vec::<u8>::new(), vec![0x01], vec![0x9a; 20], vec![0x5c; 32]]
        .into_iter()
        .map(|digest| MessageIntegrity::new(digest).expect("Can not create MessageIntegrity"))
        .collect()
}

fn fingerprint_values() -> Vec<Fingerprint> {
    [0, 1, 0xdead_beef, 0xe57a_3bcf, u32::MAX]
        .into_iter()
        .map(Fingerprint::new)
        .collect()
}

fn all_values() -> Vec<StunAttribute> {
    let mut values: Vec<StunAttribute> = Vec::new();
    values.extend(username_values().into_iter().map(StunAttribute::from));
    values.extend(integrity_values().into_iter().map(StunAttribute::from));
    values.extend(fingerprint_values().into_iter().map(StunAttribute::from));
    values
}

#[test]
fn test_value_round_trip() {
    for attr in username_values() {
        let decoded = Username::unmarshal(&attr.marshal(), None).expect("Can not decode");
        assert_eq!(decoded, attr);
    }
    for attr in integrity_values() {
        let decoded = MessageIntegrity::unmarshal(&attr.marshal(), None).expect("Can not decode");
        assert_eq!(decoded, attr);
    }
    for attr in fingerprint_values() {
        let decoded = Fingerprint::unmarshal(&attr.marshal(), None).expect("Can not decode");
        assert_eq!(decoded, attr);
    }
}

#[test]
fn test_record_layout() {
    for attr in all_values() {
        let value = attr.marshal();
        let record = attr.to_record();

        // Type and unpadded length
        assert_eq!(&record[..2], attr.attribute_type().as_u16().to_be_bytes());
        assert_eq!(
            u16::from_be_bytes([record[2], record[3]]) as usize,
            value.len()
        );

        // Value followed by zero padding up to a 4-byte boundary
        assert_eq!(record.len() % 4, 0);
        assert!(record.len() - 4 - value.len() < 4);
        assert_eq!(&record[4..4 + value.len()], value);
        assert!(record[4 + value.len()..].iter().all(|b| *b == 0));
    }
}

#[test]
fn test_sequence_round_trip() {
    let values = all_values();
    let mut buffer = Vec::new();
    let size: usize = values.iter().map(|attr| attr.write_to_buf(&mut buffer)).sum();
    assert_eq!(size, buffer.len());

    let decoder = AttributeDecoderBuilder::default()
        .with_transaction_id(TransactionId::from(RAW))
        .build();
    let decoded = decoder.decode_all(&buffer).expect("Can not decode attributes");
    assert_eq!(decoded, values);

    let tid = TransactionId::from(RAW);
    let decoded = decode_attributes(&buffer, Some(&tid)).expect("Can not decode attributes");
    assert_eq!(decoded, values);

    let types: Vec<AttributeType> = RawAttributes::from(&buffer[..])
        .into_fallible_iter()
        .map(|raw| Ok(raw.attr_type))
        .collect()
        .expect("Can not iterate attributes");
    let expected: Vec<AttributeType> = values.iter().map(|attr| attr.attribute_type()).collect();
    assert_eq!(types, expected);
}

#[test]
fn test_decode_by_type() {
    for attr in all_values() {
        let decoded = StunAttribute::unmarshal(attr.attribute_type(), &attr.marshal(), None)
            .expect("Can not decode");
        assert_eq!(decoded, attr);
    }

    let result = StunAttribute::unmarshal(AttributeType::from(0xFFFF), &[], None);
    assert_eq!(
        result.expect_err("Error expected"),
        StunErrorType::UnknownAttributeType
    );
}

#[test]
fn test_username_separator() {
    let username = Username::new("alice", "s3cr:et").expect("Can not create Username");
    let record = username.to_record();

    let decoded = decode_attributes(&record, None).expect("Can not decode Username");
    assert_eq!(decoded.len(), 1);
    let decoded = decoded[0].expect_username();
    assert_eq!(decoded.ufrag(), "alice");
    assert_eq!(decoded.password(), "s3cr:et");
    assert_eq!(decoded.attribute_type(), Username::get_type());
}

#[test]
fn test_decode_errors() {
    let mut buffer = Username::new("evtj", "h6vY")
        .expect("Can not create Username")
        .to_record();

    // Padding missing
    let truncated = &buffer[..buffer.len() - 1];
    assert_eq!(
        decode_attributes(truncated, None).expect_err("Error expected"),
        StunErrorType::SmallBuffer
    );

    // Header only
    assert_eq!(
        decode_attributes(&buffer[..3], None).expect_err("Error expected"),
        StunErrorType::SmallBuffer
    );

    // A bad record anywhere fails the whole sequence
    buffer.extend_from_slice(&[0x80, 0x28, 0x00, 0x03, 0xde, 0xad, 0xbe, 0x00]);
    assert_eq!(
        decode_attributes(&buffer, None).expect_err("Error expected"),
        StunErrorType::MalformedAttribute
    );

    // Empty buffers hold no attributes
    let decoded = decode_attributes(&[], None).expect("Can not decode empty buffer");
    assert!(decoded.is_empty());
}
