use stun_attrs::attributes::stun::{Fingerprint, MessageIntegrity, Username};
use stun_attrs::{
    decode_attribute, decode_attributes, AttributeCodec, StunAttributeType, StunErrorType,
    TransactionId,
};

fn sample_request_transaction_id() -> TransactionId {
    let mut tid = [0u8; 12];
    tid.copy_from_slice(&stun_vectors::SAMPLE_REQUEST[8..20]);
    TransactionId::from(tid)
}

// 2.1. Sample Request
#[test]
fn test_sample_request_known_attributes() {
    let tid = sample_request_transaction_id();
    let buffer = &stun_vectors::SAMPLE_REQUEST[stun_vectors::SAMPLE_REQUEST_USERNAME_OFFSET..];

    let attributes = decode_attributes(buffer, Some(&tid)).expect("Can not decode attributes");
    assert_eq!(attributes.len(), 3);

    let mut iter = attributes.iter();
    let attr = iter.next().expect("Expected attribute Username");
    let username = attr.expect_username();
    assert_eq!(username.attribute_type(), Username::get_type());
    assert_eq!(username.ufrag(), "evtj");
    assert_eq!(username.password(), "h6vY");

    let attr = iter.next().expect("Expected attribute MessageIntegrity");
    let integrity = attr.expect_message_integrity();
    assert_eq!(integrity.attribute_type(), MessageIntegrity::get_type());
    assert_eq!(integrity.as_bytes(), stun_vectors::SAMPLE_REQUEST_INTEGRITY);

    let attr = iter.next().expect("Expected attribute Fingerprint");
    let fingerprint = attr.expect_fingerprint();
    assert_eq!(fingerprint.attribute_type(), Fingerprint::get_type());
    assert_eq!(fingerprint.as_u32(), 0xe57a_3bcf);

    assert!(iter.next().is_none());
}

#[test]
fn test_sample_request_fingerprint_validation() {
    let offset = stun_vectors::SAMPLE_REQUEST_FINGERPRINT_OFFSET;
    let (attr, size) = decode_attribute(&stun_vectors::SAMPLE_REQUEST[offset..], None)
        .expect("Can not decode Fingerprint");
    assert_eq!(size, 8);

    // FINGERPRINT is the last attribute, the header length already covers it
    let fingerprint = attr.expect_fingerprint();
    assert!(fingerprint.validate(&stun_vectors::SAMPLE_REQUEST[..offset]));

    let mut corrupted = stun_vectors::SAMPLE_REQUEST;
    corrupted[offset - 1] ^= 0x01;
    assert!(!fingerprint.validate(&corrupted[..offset]));
}

#[test]
fn test_sample_request_unknown_attributes() {
    // SOFTWARE, PRIORITY and ICE-CONTROLLED are not registered
    let buffer = &stun_vectors::SAMPLE_REQUEST[stun_vectors::MESSAGE_HEADER_SIZE..];
    assert_eq!(
        decode_attributes(buffer, None).expect_err("Error expected"),
        StunErrorType::UnknownAttributeType
    );
}

#[test]
fn test_username_with_colon() {
    let (attr, size) =
        decode_attribute(&stun_vectors::USERNAME_WITH_COLON, None).expect("Can not decode");
    assert_eq!(size, stun_vectors::USERNAME_WITH_COLON.len());

    let username = attr.expect_username();
    assert_eq!(username.ufrag(), "alice");
    assert_eq!(username.password(), "s3cr:et");
}

#[test]
fn test_fingerprint_deadbeef() {
    let (attr, size) =
        decode_attribute(&stun_vectors::FINGERPRINT_DEADBEEF, None).expect("Can not decode");
    assert_eq!(size, 8);
    assert_eq!(*attr.expect_fingerprint(), Fingerprint::new(0xdead_beef));
}

#[test]
fn test_malformed_attributes() {
    assert_eq!(
        decode_attribute(&stun_vectors::USERNAME_WITHOUT_SEPARATOR, None)
            .expect_err("Error expected"),
        StunErrorType::MalformedUsername
    );

    assert_eq!(
        decode_attribute(&stun_vectors::SHORT_FINGERPRINT, None).expect_err("Error expected"),
        StunErrorType::MalformedAttribute
    );

    assert_eq!(
        decode_attribute(&stun_vectors::TRUNCATED_USERNAME, None).expect_err("Error expected"),
        StunErrorType::SmallBuffer
    );

    // The value alone is fine, the kind decodes it
    let value = &stun_vectors::USERNAME_WITH_COLON[4..17];
    let username = Username::unmarshal(value, None).expect("Can not decode Username");
    assert_eq!(username.password(), "s3cr:et");
}
