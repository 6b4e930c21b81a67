#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Binary program format and instruction set of the Friday stack machine.
//!
//! A program image is an 8-byte [`Header`] followed by a code section of
//! encoded instructions. The [`Registry`] describes every instruction the
//! assembler may emit and the VM may execute.

pub mod codec;
mod decode;
mod dump;
mod header;
mod invariants;
mod isa;
mod operand;
mod program;

#[cfg(test)]
mod header_tests;

pub use decode::{DecodeError, Decoded, decode_at};
pub use dump::{DumpError, Line, Listing, dump, listing};
pub use header::Header;
pub use isa::{
    ArithOp, Compare, InstructionDef, NumType, Registry, RegistryError, STANDARD_INSTRUCTIONS,
    Semantics, Signature,
};
pub use operand::{Operand, OperandKind};
pub use program::{ImageError, Program};

/// Magic bytes at the start of every program image.
pub const MAGIC: [u8; 4] = *b"FRDY";

/// Instruction set version this crate reads and writes.
pub const VERSION: u16 = 1;

/// Header length; the first instruction starts here.
pub const HEADER_SIZE: usize = 8;

/// Register count written when a program does not request one.
pub const DEFAULT_REGISTER_COUNT: u8 = 4;

/// Largest register count a program may request.
pub const MAX_REGISTER_COUNT: u8 = 8;

/// Highest code offset a label operand can encode.
pub const MAX_ADDRESS: usize = u16::MAX as usize;
