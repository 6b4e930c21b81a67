//! Two-pass assembly of one source file.
//!
//! Pass 1 (discovery) records label offsets and encodes every instruction
//! with placeholder label addresses, then throws the code away. Pass 2
//! (link) re-encodes the file with labels resolved. Labels defined in this
//! file or any earlier one resolve; labels of later files do not.
//!
//! The first error abandons the file: its code, labels and register
//! settings are rolled back and the error is reported.

use std::ops::Range;

use friday_bytecode::VERSION;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::directive::{Directive, parse_directive};
use crate::error::AsmError;
use crate::lexer::{SourceLine, Token, TokenKind, lex, token_text};
use crate::session::{EncodeError, Session};
use crate::source::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Discovery,
    Link,
}

impl Pass {
    /// Whether label operands must resolve in this pass.
    pub fn resolving(self) -> bool {
        matches!(self, Pass::Link)
    }
}

/// An error together with the source bytes it points at.
#[derive(Debug)]
struct Located {
    error: AsmError,
    span: Range<usize>,
}

type LineResult = Result<(), Located>;

trait At<T> {
    fn at(self, span: Range<usize>) -> Result<T, Located>;
}

impl<T> At<T> for Result<T, AsmError> {
    fn at(self, span: Range<usize>) -> Result<T, Located> {
        self.map_err(|error| Located { error, span })
    }
}

/// Assemble `file` into `session`. Returns `false` if the file was rejected.
///
/// Diagnostics (errors and warnings) go to `diagnostics`.
pub fn assemble_file(
    session: &mut Session<'_>,
    file: &SourceFile,
    diagnostics: &mut Diagnostics,
) -> bool {
    let lines = lex(&file.text);
    let checkpoint = session.checkpoint();
    let mut defined = Vec::new();

    for pass in [Pass::Discovery, Pass::Link] {
        if pass == Pass::Link {
            session.truncate(checkpoint.offset());
        }

        let mut file_pass = FilePass {
            session: &mut *session,
            file,
            pass,
            diagnostics: &mut *diagnostics,
            defined: &mut defined,
            line: 0,
        };

        for line in &lines {
            if let Err(Located { error, span }) = file_pass.line(line) {
                diagnostics
                    .report(error.kind(), &file.path, line.number, span)
                    .message(error.to_string())
                    .emit();
                session.rollback(checkpoint, &defined);
                return false;
            }
        }
    }

    true
}

/// One pass over one file.
struct FilePass<'a, 'r> {
    session: &'a mut Session<'r>,
    file: &'a SourceFile,
    pass: Pass,
    diagnostics: &'a mut Diagnostics,
    /// Labels this file added to the symbol table.
    defined: &'a mut Vec<String>,
    /// Number of the line being assembled.
    line: usize,
}

impl<'a> FilePass<'a, '_> {
    fn line(&mut self, line: &SourceLine) -> LineResult {
        self.line = line.number;
        if line.is_blank() {
            return Ok(());
        }

        if let Some(garbage) = line.tokens.iter().find(|t| t.kind == TokenKind::Garbage) {
            return Err(AsmError::syntax("unexpected characters")).at(garbage.span.clone());
        }

        let mut tokens = line.tokens.as_slice();
        if let Some(label) = tokens.first().filter(|t| self.is_label(t)) {
            self.label(label)?;
            tokens = &tokens[1..];
        }

        if !tokens.is_empty() {
            self.statement(tokens)?;
        }

        self.session.checked_offset().map(|_| ()).at(line.span.clone())
    }

    /// A leading `.` always makes a directive, even with a trailing `:`.
    fn is_label(&self, token: &Token) -> bool {
        let text = self.text(token);
        token.kind == TokenKind::Word && text.ends_with(':') && !text.starts_with('.')
    }

    fn label(&mut self, token: &Token) -> LineResult {
        let text = self.text(token);
        let name = &text[..text.len() - 1];
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(AsmError::syntax(format!("invalid label name `{text}`")))
                .at(token.span.clone());
        }

        match self.pass {
            Pass::Discovery => {
                self.session.define_label_here(name).at(token.span.clone())?;
                self.defined.push(name.to_owned());
                Ok(())
            }
            Pass::Link => self.session.confirm_label_here(name).at(token.span.clone()),
        }
    }

    /// A directive or an instruction.
    fn statement(&mut self, tokens: &[Token]) -> LineResult {
        let head = &tokens[0];
        if head.kind == TokenKind::Comma {
            return Err(AsmError::syntax("expected an instruction before comma"))
                .at(head.span.clone());
        }

        let text = self.text(head);
        match text.strip_prefix('.') {
            Some(name) => self.directive(name, tokens),
            None => self.instruction(text, tokens),
        }
    }

    fn directive(&mut self, name: &str, tokens: &[Token]) -> LineResult {
        let span = line_span(tokens);
        if let Some(comma) = tokens.iter().find(|t| t.kind == TokenKind::Comma) {
            return Err(AsmError::syntax("directive arguments are not comma separated"))
                .at(comma.span.clone());
        }

        let args: Vec<&str> = tokens[1..].iter().map(|t| self.text(t)).collect();
        let directive = parse_directive(name, &args).at(span.clone())?;

        match directive {
            Directive::FridayAsm(Some(version)) if version != i64::from(VERSION) => {
                self.warn(
                    DiagnosticKind::VersionMismatch,
                    span,
                    format!(
                        "source targets instruction set version {version}, assembler implements {VERSION}"
                    ),
                );
            }
            Directive::FridayAsm(_) => {}
            Directive::Registers(requested) => {
                let request = self.session.request_registers(requested);
                if request.clamped {
                    self.warn(
                        DiagnosticKind::RegisterCountClamped,
                        span.clone(),
                        format!(
                            "register count {requested} is out of range, using {}",
                            request.count
                        ),
                    );
                }
                self.warn(
                    DiagnosticKind::RegistersDirective,
                    span,
                    format!(
                        "`.{}` is not recommended: programs should use the default register count",
                        directive.name()
                    ),
                );
            }
        }

        Ok(())
    }

    fn instruction(&mut self, mnemonic: &str, tokens: &[Token]) -> LineResult {
        let mut operands = Vec::new();
        let mut previous = &tokens[0];

        for token in &tokens[1..] {
            match (token.kind, previous.kind) {
                (TokenKind::Comma, TokenKind::Comma) => {
                    return Err(AsmError::syntax("argument expected after comma"))
                        .at(token.span.clone());
                }
                (TokenKind::Comma, _) if operands.is_empty() => {
                    return Err(AsmError::syntax("argument expected before comma"))
                        .at(token.span.clone());
                }
                (TokenKind::Comma, _) => {}
                _ => operands.push(token),
            }
            previous = token;
        }

        let words: Vec<&str> = operands.iter().map(|t| self.text(t)).collect();
        self.session
            .encode_instruction(mnemonic, &words, self.pass.resolving())
            .map_err(|EncodeError { error, operand }| Located {
                error,
                span: operand.map_or_else(|| line_span(tokens), |i| operands[i].span.clone()),
            })
    }

    /// Warnings are reported once, during discovery.
    fn warn(&mut self, kind: DiagnosticKind, span: Range<usize>, message: String) {
        if self.pass != Pass::Discovery {
            return;
        }
        self.diagnostics
            .report(kind, &self.file.path, self.line, span)
            .message(message)
            .emit();
    }

    fn text(&self, token: &Token) -> &'a str {
        let file: &'a SourceFile = self.file;
        token_text(&file.text, token)
    }
}

fn line_span(tokens: &[Token]) -> Range<usize> {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.start..last.span.end,
        _ => 0..0,
    }
}
