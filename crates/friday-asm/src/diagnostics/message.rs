use std::fmt;
use std::ops::Range;

/// What went wrong (or looks suspicious) in an assembly source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    // Errors: the file's assembly attempt is abandoned
    Syntax,
    UndefinedInstruction,
    UnresolvedLabel,
    RegisterOutOfRange,
    AddressSpaceExceeded,
    DuplicateLabel,
    LabelMoved,
    UnknownDirective,
    InvalidEncoding,

    // Warnings: assembly continues
    VersionMismatch,
    RegisterCountClamped,
    RegistersDirective,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::VersionMismatch
            | DiagnosticKind::RegisterCountClamped
            | DiagnosticKind::RegistersDirective => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One reported problem, anchored to a file, a line, and a byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub path: String,
    /// 1-based.
    pub line: usize,
    /// Byte range into the file's text.
    pub span: Range<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Plain form: `path:line: severity: message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.path, self.line, self.severity, self.message
        )
    }
}
