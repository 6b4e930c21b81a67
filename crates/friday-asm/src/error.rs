//! Errors that abandon the assembly of one source file.

use crate::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsmError {
    #[error("{0}")]
    Syntax(String),

    #[error("undefined instruction `{mnemonic}` with operands {signature}")]
    UndefinedInstruction { mnemonic: String, signature: String },

    #[error("label not found: `{0}`")]
    UnresolvedLabel(String),

    #[error("register {register} is out of range: the program has {count} registers")]
    RegisterOutOfRange { register: String, count: u8 },

    #[error("code offset {offset:#x} exceeds the 16-bit address space")]
    AddressSpaceExceeded { offset: usize },

    #[error("label `{name}` is already defined at <file_start+{offset:04x}>")]
    DuplicateLabel { name: String, offset: u16 },

    #[error(
        "label `{name}` was recorded at <file_start+{recorded:04x}> but is now at <file_start+{actual:04x}>"
    )]
    LabelMoved {
        name: String,
        recorded: u16,
        actual: usize,
    },

    #[error("unknown directive `{0}`")]
    UnknownDirective(String),
}

impl AsmError {
    pub(crate) fn syntax(msg: impl Into<String>) -> Self {
        AsmError::Syntax(msg.into())
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            AsmError::Syntax(_) => DiagnosticKind::Syntax,
            AsmError::UndefinedInstruction { .. } => DiagnosticKind::UndefinedInstruction,
            AsmError::UnresolvedLabel(_) => DiagnosticKind::UnresolvedLabel,
            AsmError::RegisterOutOfRange { .. } => DiagnosticKind::RegisterOutOfRange,
            AsmError::AddressSpaceExceeded { .. } => DiagnosticKind::AddressSpaceExceeded,
            AsmError::DuplicateLabel { .. } => DiagnosticKind::DuplicateLabel,
            AsmError::LabelMoved { .. } => DiagnosticKind::LabelMoved,
            AsmError::UnknownDirective(_) => DiagnosticKind::UnknownDirective,
        }
    }
}
