//! Instruction decoding for listings and traces.

use crate::isa::{InstructionDef, Registry};
use crate::operand::Operand;

/// An instruction read back from a code stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<'r> {
    pub def: &'r InstructionDef,
    pub operands: Vec<Operand>,
}

impl Decoded<'_> {
    pub fn size(&self) -> usize {
        self.def.size()
    }
}

impl std::fmt::Display for Decoded<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.def.mnemonic)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown opcode 0x{opcode:02x}")]
    UnknownOpcode { opcode: u8 },

    #[error("instruction `{mnemonic}` needs {needed} bytes, {available} left")]
    Truncated {
        mnemonic: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("offset is past the end of the image")]
    OutOfBounds,
}

/// Decode the instruction starting at `offset` in `bytes`.
pub fn decode_at<'r>(
    registry: &'r Registry,
    bytes: &[u8],
    offset: usize,
) -> Result<Decoded<'r>, DecodeError> {
    let &opcode = bytes.get(offset).ok_or(DecodeError::OutOfBounds)?;
    let def = registry
        .by_opcode(opcode)
        .ok_or(DecodeError::UnknownOpcode { opcode })?;

    let available = bytes.len() - offset;
    if def.size() > available {
        return Err(DecodeError::Truncated {
            mnemonic: def.mnemonic,
            needed: def.size(),
            available,
        });
    }

    let mut at = offset + 1;
    let mut operands = Vec::with_capacity(def.operands.len());
    for kind in def.operands {
        // Length was checked against the full instruction size above.
        let Some(operand) = kind.decode(bytes, at) else {
            return Err(DecodeError::OutOfBounds);
        };
        operands.push(operand);
        at += kind.size();
    }

    Ok(Decoded { def, operands })
}
