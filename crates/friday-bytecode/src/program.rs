//! Validated program images.

use std::io;
use std::path::Path;

use crate::header::Header;
use crate::{HEADER_SIZE, MAX_REGISTER_COUNT, VERSION};

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image too small: {0} bytes (minimum {HEADER_SIZE})")]
    TooSmall(usize),

    #[error("invalid magic: expected FRDY")]
    InvalidMagic,

    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u16),

    #[error("image requests {0} registers (maximum {MAX_REGISTER_COUNT})")]
    TooManyRegisters(u8),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A program image whose header has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
    header: Header,
}

impl Program {
    /// Validate the header and take ownership of the image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageError> {
        let header = Self::check_header(&bytes)?;
        Ok(Self { bytes, header })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Validate the header of `bytes` without copying them.
    pub fn check_header(bytes: &[u8]) -> Result<Header, ImageError> {
        let header = Header::from_bytes(bytes).ok_or(ImageError::TooSmall(bytes.len()))?;
        if !header.validate_magic() {
            return Err(ImageError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ImageError::UnsupportedVersion(header.version));
        }
        if header.register_count > MAX_REGISTER_COUNT {
            return Err(ImageError::TooManyRegisters(header.register_count));
        }
        Ok(header)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn register_count(&self) -> u8 {
        self.header.register_count
    }

    /// The full image, header included.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The code section.
    pub fn code(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code().is_empty()
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}
