//! Flat memory region of the machine.
//!
//! Every access is bounds checked; an access that would leave the region
//! yields [`Fault::AccessViolation`].

use friday_bytecode::codec;

use super::status::Status;

/// A condition that stops the machine with a fault status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("illegal instruction")]
    IllegalInstruction,

    #[error("access violation")]
    AccessViolation,

    #[error("division by zero")]
    DivisionByZero,
}

impl Fault {
    pub fn status(self) -> Status {
        match self {
            Fault::IllegalInstruction => Status::FaultedIllegalInstruction,
            Fault::AccessViolation => Status::FaultedAccessViolation,
            Fault::DivisionByZero => Status::FaultedDivisionByZero,
        }
    }
}

/// Zero-initialized byte arena of fixed capacity.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Zero the region, then copy `image` to its start.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Fault> {
        if image.len() > self.bytes.len() {
            return Err(Fault::AccessViolation);
        }
        self.bytes.fill(0);
        self.bytes[..image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn read_u8(&self, at: usize) -> Result<u8, Fault> {
        codec::read_u8(&self.bytes, at).ok_or(Fault::AccessViolation)
    }

    pub fn read_u16(&self, at: usize) -> Result<u16, Fault> {
        codec::read_u16(&self.bytes, at).ok_or(Fault::AccessViolation)
    }

    pub fn read_u32(&self, at: usize) -> Result<u32, Fault> {
        codec::read_u32(&self.bytes, at).ok_or(Fault::AccessViolation)
    }

    pub fn write_u32(&mut self, at: usize, value: u32) -> Result<(), Fault> {
        let end = at.checked_add(4).ok_or(Fault::AccessViolation)?;
        let slot = self
            .bytes
            .get_mut(at..end)
            .ok_or(Fault::AccessViolation)?;
        slot.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
