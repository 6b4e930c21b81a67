//! Mutable state of one assembly run.
//!
//! A [`Session`] owns the growing program image, the symbol table and the
//! register-count settings. Both passes over every source file go through
//! the same session; see [`crate::assembler`] for the pass loop.

use friday_bytecode::{
    DEFAULT_REGISTER_COUNT, HEADER_SIZE, Header, MAX_ADDRESS, MAX_REGISTER_COUNT, Operand,
    OperandKind, Program, Registry, Signature,
};
use friday_core::HashTable;

use crate::error::AsmError;
use crate::operand::{OperandToken, classify};

/// Label name to absolute code offset.
pub type SymbolTable = HashTable<u16>;

/// Byte offset of the register count inside the header.
const REGISTER_COUNT_OFFSET: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterSettings {
    pub count: u8,
    /// Set once any `.registers` directive has been seen.
    pub custom: bool,
}

impl Default for RegisterSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_REGISTER_COUNT,
            custom: false,
        }
    }
}

/// Outcome of a `.registers` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Count now in effect.
    pub count: u8,
    /// The requested value lay outside `0..=MAX_REGISTER_COUNT`.
    pub clamped: bool,
}

/// Failure of [`Session::encode_instruction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeError {
    pub error: AsmError,
    /// Position of the offending operand token; `None` when the instruction
    /// as a whole has no encoding.
    pub operand: Option<usize>,
}

/// Point to roll a session back to when a file fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    registers: RegisterSettings,
}

impl Checkpoint {
    pub fn offset(&self) -> usize {
        self.offset
    }
}

pub struct Session<'r> {
    registry: &'r Registry,
    image: Vec<u8>,
    symbols: SymbolTable,
    registers: RegisterSettings,
}

impl<'r> Session<'r> {
    /// Start a session with the header already written.
    pub fn new(registry: &'r Registry) -> Self {
        let mut session = Self {
            registry,
            image: Vec::new(),
            symbols: SymbolTable::new(),
            registers: RegisterSettings::default(),
        };
        session.write_header();
        session
    }

    /// Reset the image to a bare header carrying the current register count.
    pub fn write_header(&mut self) {
        let header = Header {
            register_count: self.registers.count,
            ..Header::default()
        };
        self.image.clear();
        self.image.extend_from_slice(&header.to_bytes());
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Offset the next instruction will be written at.
    pub fn offset(&self) -> usize {
        self.image.len()
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn register_count(&self) -> u8 {
        self.registers.count
    }

    pub fn label(&self, name: &str) -> Option<u16> {
        self.symbols.find(name).copied()
    }

    /// Classify, resolve and append one instruction.
    ///
    /// With `resolving` off, labels encode as 0 and need not exist yet.
    /// Nothing is appended on error.
    pub fn encode_instruction(
        &mut self,
        mnemonic: &str,
        operands: &[&str],
        resolving: bool,
    ) -> Result<(), EncodeError> {
        let mut resolved = Vec::with_capacity(operands.len());
        for (index, token) in operands.iter().enumerate() {
            let operand = self
                .classify(token)
                .and_then(|token| self.resolve(token, resolving))
                .map_err(|error| EncodeError {
                    error,
                    operand: Some(index),
                })?;
            resolved.push(operand);
        }
        self.emit(mnemonic, &resolved)
            .map_err(|error| EncodeError {
                error,
                operand: None,
            })
    }

    pub fn classify<'s>(&self, token: &'s str) -> Result<OperandToken<'s>, AsmError> {
        classify(token, self.registers.count)
    }

    /// Turn a classified token into an encodable operand.
    pub fn resolve(&self, token: OperandToken<'_>, resolving: bool) -> Result<Operand, AsmError> {
        Ok(match token {
            OperandToken::Constant(bits) => Operand::Constant(bits),
            OperandToken::Register(index) => Operand::Register(index),
            OperandToken::Label(_) if !resolving => Operand::Label(0),
            OperandToken::Label(name) => {
                let address = self
                    .label(name)
                    .ok_or_else(|| AsmError::UnresolvedLabel(name.to_owned()))?;
                Operand::Label(address)
            }
        })
    }

    /// Look up `(mnemonic, operand kinds)` and append the encoding.
    pub fn emit(&mut self, mnemonic: &str, operands: &[Operand]) -> Result<(), AsmError> {
        let kinds: Vec<OperandKind> = operands.iter().map(|o| o.kind()).collect();
        let def = self.registry.by_signature(mnemonic, &kinds).ok_or_else(|| {
            AsmError::UndefinedInstruction {
                mnemonic: mnemonic.to_owned(),
                signature: Signature(&kinds).to_string(),
            }
        })?;

        self.image.push(def.opcode);
        for operand in operands {
            operand.encode(&mut self.image);
        }
        Ok(())
    }

    /// Record `name` at the current offset.
    pub fn define_label_here(&mut self, name: &str) -> Result<u16, AsmError> {
        let offset = self.checked_offset()?;
        if !self.symbols.insert(name, offset) {
            return Err(AsmError::DuplicateLabel {
                name: name.to_owned(),
                offset: self.label(name).unwrap_or_default(),
            });
        }
        Ok(offset)
    }

    /// Check that `name` still sits at the current offset.
    pub fn confirm_label_here(&self, name: &str) -> Result<(), AsmError> {
        let actual = self.offset();
        match self.label(name) {
            Some(recorded) if usize::from(recorded) == actual => Ok(()),
            Some(recorded) => Err(AsmError::LabelMoved {
                name: name.to_owned(),
                recorded,
                actual,
            }),
            None => Err(AsmError::UnresolvedLabel(name.to_owned())),
        }
    }

    /// Remove a label; used when rolling a failed file back.
    pub fn forget_label(&mut self, name: &str) -> bool {
        self.symbols.delete(name)
    }

    /// Discard code from `offset` onward. The header is never cut.
    pub fn truncate(&mut self, offset: usize) {
        self.image.truncate(offset.max(HEADER_SIZE));
    }

    /// Fail once the image no longer fits label-addressable space.
    pub fn checked_offset(&self) -> Result<u16, AsmError> {
        let offset = self.offset();
        if offset > MAX_ADDRESS {
            return Err(AsmError::AddressSpaceExceeded { offset });
        }
        Ok(offset as u16)
    }

    /// Apply `.registers requested`.
    ///
    /// The value is clamped to `0..=MAX_REGISTER_COUNT`; after the first
    /// request, later ones can only raise the count.
    pub fn request_registers(&mut self, requested: i64) -> RegisterRequest {
        let bounded = requested.clamp(0, i64::from(MAX_REGISTER_COUNT)) as u8;
        let count = if self.registers.custom {
            bounded.max(self.registers.count)
        } else {
            bounded
        };

        self.set_registers(RegisterSettings {
            count,
            custom: true,
        });
        RegisterRequest {
            count,
            clamped: i64::from(bounded) != requested,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset(),
            registers: self.registers,
        }
    }

    /// Undo everything since `checkpoint`, including the given labels.
    pub fn rollback<S: AsRef<str>>(&mut self, checkpoint: Checkpoint, labels: &[S]) {
        self.truncate(checkpoint.offset);
        self.set_registers(checkpoint.registers);
        for name in labels {
            self.forget_label(name.as_ref());
        }
    }

    /// Seal the image.
    pub fn finish(self) -> Program {
        crate::invariants::ensure_valid_image(self.image)
    }

    fn set_registers(&mut self, registers: RegisterSettings) {
        self.registers = registers;
        self.image[REGISTER_COUNT_OFFSET] = registers.count;
    }
}
