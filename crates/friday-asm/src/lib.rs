//! Friday assembler: lexer, two-pass encoder, and link driver.
//!
//! - `lexer` - line-oriented tokenizer
//! - `operand` - operand classification and numeric literals
//! - `session` - image buffer, symbol table and register settings of one run
//! - `assembler` - discovery and link passes over one file
//! - `linker` - multi-file driver
//! - `diagnostics` - error and warning reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assembler;
pub mod diagnostics;
pub mod directive;
pub mod lexer;
pub mod linker;
pub mod operand;
pub mod session;
pub mod source;

mod error;
mod invariants;

#[cfg(test)]
mod assembler_tests;
#[cfg(test)]
mod directive_tests;
#[cfg(test)]
mod session_tests;

pub use assembler::{Pass, assemble_file};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use error::AsmError;
pub use linker::{LinkError, Linked, Linker, Report, assemble};
pub use session::{EncodeError, Session, SymbolTable};
pub use source::{EncodingError, SourceFile, SourceMap};
