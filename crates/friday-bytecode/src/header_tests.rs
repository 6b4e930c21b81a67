use crate::{DEFAULT_REGISTER_COUNT, HEADER_SIZE, Header, VERSION};

#[test]
fn default_header_bytes() {
    let bytes = Header::default().to_bytes();

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(&bytes[0..4], b"FRDY");
    assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), VERSION);
    assert_eq!(bytes[6], DEFAULT_REGISTER_COUNT);
    assert_eq!(bytes[7], 0);
}

#[test]
fn roundtrip_custom_register_count() {
    let header = Header {
        register_count: 7,
        ..Header::default()
    };

    let decoded = Header::from_bytes(&header.to_bytes()).unwrap();
    assert_eq!(decoded, header);
    assert!(decoded.validate_magic());
    assert!(decoded.validate_version());
}

#[test]
fn short_input_is_rejected() {
    assert_eq!(Header::from_bytes(b"FRDY\x01\x00\x04"), None);
}

#[test]
fn foreign_magic_and_version() {
    let header = Header::from_bytes(b"ELF\x7f\x02\x00\x04\x00").unwrap();

    assert!(!header.validate_magic());
    assert!(!header.validate_version());
    assert_eq!(header.version, 2);
}
