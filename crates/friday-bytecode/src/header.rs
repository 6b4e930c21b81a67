//! Program image header (8 bytes).
//!
//! Layout:
//! - 0-3: magic `FRDY`
//! - 4-5: instruction set version (u16, little-endian)
//! - 6: register count
//! - 7: reserved, zero

use crate::{DEFAULT_REGISTER_COUNT, HEADER_SIZE, MAGIC, VERSION, codec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u16,
    pub register_count: u8,
    pub _reserved: u8,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            register_count: DEFAULT_REGISTER_COUNT,
            _reserved: 0,
        }
    }
}

impl Header {
    /// Decode the leading [`HEADER_SIZE`] bytes. Returns `None` if `bytes` is shorter.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; HEADER_SIZE] = codec::read_array(bytes, 0)?;
        Some(Self {
            magic: [raw[0], raw[1], raw[2], raw[3]],
            version: u16::from_le_bytes([raw[4], raw[5]]),
            register_count: raw[6],
            _reserved: raw[7],
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6] = self.register_count;
        bytes[7] = self._reserved;
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }
}
