//! Binary test vectors shared by the workspace tests.

/// 2.1. Sample Request
/// [`RFC5769`](https://datatracker.ietf.org/doc/html/rfc5769#section-2.1)
/// Username: `evtj:h6vY`, password: `VOkJxbRl1RmTxUk/WvJxBt`
pub const SAMPLE_REQUEST: [u8; 108] = [
    0x00, 0x01, 0x00, 0x58, // Request type and message length
    0x21, 0x12, 0xa4, 0x42, // Magic cookie
    0xb7, 0xe7, 0xa7, 0x01, // }
    0xbc, 0x34, 0xd6, 0x86, // }  Transaction ID
    0xfa, 0x87, 0xdf, 0xae, // }
    0x80, 0x22, 0x00, 0x10, // SOFTWARE attribute header
    0x53, 0x54, 0x55, 0x4e, // }
    0x20, 0x74, 0x65, 0x73, // }  User-agent...
    0x74, 0x20, 0x63, 0x6c, // }  ...name
    0x69, 0x65, 0x6e, 0x74, // }
    0x00, 0x24, 0x00, 0x04, // PRIORITY attribute header
    0x6e, 0x00, 0x01, 0xff, // ICE priority value
    0x80, 0x29, 0x00, 0x08, // ICE-CONTROLLED attribute header
    0x93, 0x2f, 0xf9, 0xb1, // }  Pseudo-random tie breaker...
    0x51, 0x26, 0x3b, 0x36, // }   ...for ICE control
    0x00, 0x06, 0x00, 0x09, // USERNAME attribute header
    0x65, 0x76, 0x74, 0x6a, // }
    0x3a, 0x68, 0x36, 0x76, // }  Username (9 bytes) and padding (3 bytes)
    0x59, 0x20, 0x20, 0x20, // }
    0x00, 0x08, 0x00, 0x14, // MESSAGE-INTEGRITY attribute header
    0x9a, 0xea, 0xa7, 0x0c, // }
    0xbf, 0xd8, 0xcb, 0x56, // }
    0x78, 0x1e, 0xf2, 0xb5, // }  HMAC-SHA1 fingerprint
    0xb2, 0xd3, 0xf2, 0x49, // }
    0xc1, 0xb5, 0x71, 0xa2, // }
    0x80, 0x28, 0x00, 0x04, // FINGERPRINT attribute header
    0xe5, 0x7a, 0x3b, 0xcf, // CRC32 fingerprint
];

/// Size of the STUN message header that precedes the attributes
pub const MESSAGE_HEADER_SIZE: usize = 20;

/// Offset of the first attribute this crate's registry knows (USERNAME)
/// inside [`SAMPLE_REQUEST`]
pub const SAMPLE_REQUEST_USERNAME_OFFSET: usize = 60;

/// Offset of the FINGERPRINT attribute inside [`SAMPLE_REQUEST`]
pub const SAMPLE_REQUEST_FINGERPRINT_OFFSET: usize = 100;

/// HMAC-SHA1 value carried by the MESSAGE-INTEGRITY attribute of [`SAMPLE_REQUEST`]
pub const SAMPLE_REQUEST_INTEGRITY: [u8; 20] = [
    0x9a, 0xea, 0xa7, 0x0c, 0xbf, 0xd8, 0xcb, 0x56, 0x78, 0x1e, 0xf2, 0xb5, 0xb2, 0xd3, 0xf2, 0x49,
    0xc1, 0xb5, 0x71, 0xa2,
];

/// USERNAME `alice:s3cr:et`, the password holds a colon
pub const USERNAME_WITH_COLON: [u8; 20] = [
    0x00, 0x06, 0x00, 0x0d, // USERNAME attribute header
    0x61, 0x6c, 0x69, 0x63, // }
    0x65, 0x3a, 0x73, 0x33, // }  `alice:s3cr:et` (13 bytes)
    0x63, 0x72, 0x3a, 0x65, // }
    0x74, 0x00, 0x00, 0x00, // }  and padding (3 bytes)
];

/// FINGERPRINT with value `0xDEADBEEF`
pub const FINGERPRINT_DEADBEEF: [u8; 8] = [
    0x80, 0x28, 0x00, 0x04, // FINGERPRINT attribute header
    0xde, 0xad, 0xbe, 0xef, // value
];

/// USERNAME whose value has no `ufrag:password` separator
pub const USERNAME_WITHOUT_SEPARATOR: [u8; 12] = [
    0x00, 0x06, 0x00, 0x05, // USERNAME attribute header
    0x61, 0x6c, 0x69, 0x63, // }  `alice` (5 bytes)
    0x65, 0x00, 0x00, 0x00, // }  and padding (3 bytes)
];

/// FINGERPRINT whose value is two bytes long
pub const SHORT_FINGERPRINT: [u8; 8] = [
    0x80, 0x28, 0x00, 0x02, // FINGERPRINT attribute header
    0xde, 0xad, 0x00, 0x00, // value and padding
];

/// USERNAME whose length points beyond the end of the record
pub const TRUNCATED_USERNAME: [u8; 8] = [
    0x00, 0x06, 0x00, 0x09, // USERNAME attribute header
    0x65, 0x76, 0x74, 0x6a, // Four bytes of the nine announced
];
