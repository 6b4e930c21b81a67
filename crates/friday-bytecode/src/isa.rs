//! Instruction registry.
//!
//! Each [`InstructionDef`] ties a mnemonic and an operand signature to a
//! unique opcode and to the [`Semantics`] the VM carries out. The assembler
//! looks instructions up by `(mnemonic, signature)`, the VM by opcode.
//!
//! # Encoding
//!
//! An instruction is its opcode byte followed by the operands in declared
//! order, each encoded as described by [`OperandKind`].

use std::fmt;

use crate::operand::OperandKind;

use OperandKind::{Constant, Label, Register};

/// Numeric interpretation of stack slots for arithmetic and branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumType {
    Int,
    Float,
}

/// Branch condition, evaluated as `left OP right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compare {
    Above,
    AboveEqual,
    Below,
    BelowEqual,
    Equal,
    NotEqual,
}

impl Compare {
    pub fn holds<T: PartialOrd>(self, left: T, right: T) -> bool {
        match self {
            Compare::Above => left > right,
            Compare::AboveEqual => left >= right,
            Compare::Below => left < right,
            Compare::BelowEqual => left <= right,
            Compare::Equal => left == right,
            Compare::NotEqual => left != right,
        }
    }
}

/// Binary arithmetic, evaluated as `left OP right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// What executing an instruction does to the machine.
///
/// Operands referenced here are the instruction's own, read from the bytes
/// after the opcode. "Pop right, pop left" order applies to every binary form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Semantics {
    /// Stop with a clean exit.
    Halt,
    /// Push the constant operand.
    PushConstant,
    /// Push the register operand's value.
    PushRegister,
    /// Pop into the register operand.
    PopRegister,
    /// Read an integer from input and push it.
    ReadInt,
    /// Read a float from input and push it.
    ReadFloat,
    /// Pop an integer and print it.
    WriteInt,
    /// Pop a float and print it.
    WriteFloat,
    /// Push the address of the next instruction.
    Depart,
    /// Push the address of the next instruction, then jump to the label.
    Call,
    /// Pop an address and jump to it.
    Return,
    IntToFloat,
    FloatToInt,
    /// Jump to the label operand.
    Jump,
    /// Pop right then left; jump to the label when the comparison holds.
    Branch(NumType, Compare),
    /// Pop right then left; push `left OP right`.
    Arith(NumType, ArithOp),
    /// Pop a float and push its square root.
    Sqrt,
}

/// One entry of the instruction table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionDef {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub operands: &'static [OperandKind],
    pub semantics: Semantics,
}

impl InstructionDef {
    pub const fn new(
        mnemonic: &'static str,
        opcode: u8,
        operands: &'static [OperandKind],
        semantics: Semantics,
    ) -> Self {
        Self {
            mnemonic,
            opcode,
            operands,
            semantics,
        }
    }

    /// Encoded size: opcode byte plus all operands.
    pub fn size(&self) -> usize {
        1 + self.operands.iter().map(|k| k.size()).sum::<usize>()
    }

    pub fn signature(&self) -> Signature<'_> {
        Signature(self.operands)
    }
}

/// Display adapter for an operand-kind list: `(CONSTANT, LABEL)` or `()`.
pub struct Signature<'a>(pub &'a [OperandKind]);

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.name())?;
        }
        f.write_str(")")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("opcode 0x{opcode:02x} of `{mnemonic}` is already taken by `{existing}`")]
    DuplicateOpcode {
        opcode: u8,
        mnemonic: &'static str,
        existing: &'static str,
    },

    #[error("`{mnemonic}` with operands {signature} is already registered")]
    DuplicateSignature {
        mnemonic: &'static str,
        signature: String,
    },
}

/// Instruction table with dense opcode lookup.
#[derive(Clone)]
pub struct Registry {
    defs: Vec<InstructionDef>,
    by_opcode: [Option<u8>; 256],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            by_opcode: [None; 256],
        }
    }

    /// Registry holding [`STANDARD_INSTRUCTIONS`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in STANDARD_INSTRUCTIONS {
            registry.ensure_registered(*def);
        }
        registry
    }

    /// Add an instruction. Opcodes and `(mnemonic, signature)` pairs must be unique.
    pub fn register(&mut self, def: InstructionDef) -> Result<(), RegistryError> {
        if let Some(existing) = self.by_opcode(def.opcode) {
            return Err(RegistryError::DuplicateOpcode {
                opcode: def.opcode,
                mnemonic: def.mnemonic,
                existing: existing.mnemonic,
            });
        }
        if self.by_signature(def.mnemonic, def.operands).is_some() {
            return Err(RegistryError::DuplicateSignature {
                mnemonic: def.mnemonic,
                signature: def.signature().to_string(),
            });
        }

        // At most 256 distinct opcodes, so the index fits a byte.
        self.by_opcode[def.opcode as usize] = Some(self.defs.len() as u8);
        self.defs.push(def);
        Ok(())
    }

    #[inline]
    pub fn by_opcode(&self, opcode: u8) -> Option<&InstructionDef> {
        let index = self.by_opcode[opcode as usize]?;
        Some(&self.defs[index as usize])
    }

    pub fn by_signature(&self, mnemonic: &str, operands: &[OperandKind]) -> Option<&InstructionDef> {
        self.defs
            .iter()
            .find(|d| d.mnemonic == mnemonic && d.operands == operands)
    }

    /// Whether any signature is registered under `mnemonic`.
    pub fn knows_mnemonic(&self, mnemonic: &str) -> bool {
        self.defs.iter().any(|d| d.mnemonic == mnemonic)
    }

    /// Instructions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.defs.len())
            .finish_non_exhaustive()
    }
}

const fn branch(mnemonic: &'static str, opcode: u8, ty: NumType, cmp: Compare) -> InstructionDef {
    InstructionDef::new(mnemonic, opcode, &[Label], Semantics::Branch(ty, cmp))
}

const fn arith(mnemonic: &'static str, opcode: u8, ty: NumType, op: ArithOp) -> InstructionDef {
    InstructionDef::new(mnemonic, opcode, &[], Semantics::Arith(ty, op))
}

/// The Friday instruction set.
pub const STANDARD_INSTRUCTIONS: &[InstructionDef] = {
    use ArithOp::*;
    use Compare::*;
    use NumType::*;
    use Semantics as S;

    &[
        // Stack, registers, I/O
        InstructionDef::new("end", 0x00, &[], S::Halt),
        InstructionDef::new("push", 0x01, &[Constant], S::PushConstant),
        InstructionDef::new("push", 0x02, &[Register], S::PushRegister),
        InstructionDef::new("pop", 0x03, &[Register], S::PopRegister),
        InstructionDef::new("in", 0x04, &[], S::ReadInt),
        InstructionDef::new("out", 0x05, &[], S::WriteInt),
        InstructionDef::new("outf", 0x06, &[], S::WriteFloat),
        InstructionDef::new("dep", 0x07, &[], S::Depart),
        InstructionDef::new("call", 0x08, &[Label], S::Call),
        InstructionDef::new("ret", 0x09, &[], S::Return),
        InstructionDef::new("ci2f", 0x0a, &[], S::IntToFloat),
        InstructionDef::new("cf2i", 0x0b, &[], S::FloatToInt),
        InstructionDef::new("in_f", 0x0c, &[], S::ReadFloat),
        // Jumps
        InstructionDef::new("jmp", 0x10, &[Label], S::Jump),
        branch("ja", 0x11, Int, Above),
        branch("jae", 0x12, Int, AboveEqual),
        branch("jb", 0x13, Int, Below),
        branch("jbe", 0x14, Int, BelowEqual),
        branch("je", 0x15, Int, Equal),
        branch("jne", 0x16, Int, NotEqual),
        branch("jaf", 0x1a, Float, Above),
        branch("jaef", 0x1b, Float, AboveEqual),
        branch("jbf", 0x1c, Float, Below),
        branch("jbef", 0x1d, Float, BelowEqual),
        branch("jef", 0x1e, Float, Equal),
        branch("jnef", 0x1f, Float, NotEqual),
        // Arithmetic
        arith("add", 0x20, Int, Add),
        arith("sub", 0x21, Int, Sub),
        arith("mul", 0x22, Int, Mul),
        arith("div", 0x23, Int, Div),
        arith("mod", 0x24, Int, Rem),
        arith("addf", 0x2a, Float, Add),
        arith("subf", 0x2b, Float, Sub),
        arith("mulf", 0x2c, Float, Mul),
        arith("divf", 0x2d, Float, Div),
        InstructionDef::new("sqrt", 0x2e, &[], S::Sqrt),
    ]
};
