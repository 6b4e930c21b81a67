//! Operand kinds and decoded operand values.

use std::fmt;

use crate::codec;

/// Shape of one instruction argument in the encoded stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// 4 raw bytes: an i32 or an f32, as the opcode decides.
    Constant,
    /// 1-byte register index.
    Register,
    /// 2-byte absolute code offset.
    Label,
}

impl OperandKind {
    /// Encoded size in bytes.
    pub const fn size(self) -> usize {
        match self {
            OperandKind::Constant => 4,
            OperandKind::Register => 1,
            OperandKind::Label => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            OperandKind::Constant => "CONSTANT",
            OperandKind::Register => "REGISTER",
            OperandKind::Label => "LABEL",
        }
    }

    /// Decode an operand of this kind at `at`.
    pub fn decode(self, bytes: &[u8], at: usize) -> Option<Operand> {
        Some(match self {
            OperandKind::Constant => Operand::Constant(codec::read_u32(bytes, at)?),
            OperandKind::Register => Operand::Register(codec::read_u8(bytes, at)?),
            OperandKind::Label => Operand::Label(codec::read_u16(bytes, at)?),
        })
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded operand value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Constant(u32),
    Register(u8),
    Label(u16),
}

impl Operand {
    pub fn kind(self) -> OperandKind {
        match self {
            Operand::Constant(_) => OperandKind::Constant,
            Operand::Register(_) => OperandKind::Register,
            Operand::Label(_) => OperandKind::Label,
        }
    }

    /// Append the little-endian encoding.
    pub fn encode(self, out: &mut Vec<u8>) {
        match self {
            Operand::Constant(bits) => codec::write_u32(out, bits),
            Operand::Register(index) => codec::write_u8(out, index),
            Operand::Label(address) => codec::write_u16(out, address),
        }
    }
}

/// Listing form: constants as signed integers, `rN`, `<file_start+XXXX>`.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(bits) => write!(f, "{}", codec::bits_to_i32(*bits)),
            Operand::Register(index) => write!(f, "r{index}"),
            Operand::Label(address) => write!(f, "<file_start+{address:04x}>"),
        }
    }
}
