use super::*;
use crate::source::{SourceFile, SourceMap};

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn severity_follows_kind() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedLabel, "main.asm", 1, 0..3)
        .message("label not found: `foo`")
        .emit();
    diagnostics
        .report(DiagnosticKind::VersionMismatch, "main.asm", 2, 4..8)
        .emit();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::Syntax, "main.asm", 1, 0..1)
        .severity(Severity::Warning)
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn kinds_in_report_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::RegistersDirective, "a.asm", 1, 0..1)
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateLabel, "a.asm", 2, 0..1)
        .emit();

    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::RegistersDirective, DiagnosticKind::DuplicateLabel]
    );
}

#[test]
fn extend_appends() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::Syntax, "a.asm", 1, 0..1).emit();
    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::UnknownDirective, "b.asm", 1, 0..1)
        .emit();

    first.extend(second);
    let paths: Vec<&str> = first.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, ["a.asm", "b.asm"]);
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.printer().render().is_empty());
}

#[test]
fn printer_without_sources_uses_plain_lines() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedLabel, "main.asm", 3, 4..7)
        .message("label not found: `foo`")
        .emit();
    diagnostics
        .report(DiagnosticKind::VersionMismatch, "lib.asm", 1, 0..11)
        .message("source targets instruction set version 2, assembler implements 1")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    main.asm:3: error: label not found: `foo`
    lib.asm:1: warning: source targets instruction set version 2, assembler implements 1
    ");
}

#[test]
fn printer_with_source() {
    let mut sources = SourceMap::new();
    sources.push(SourceFile::new("main.asm", "push r4\n"));

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::RegisterOutOfRange, "main.asm", 1, 5..7)
        .message("register r4 is out of range: the program has 4 registers")
        .emit();

    let result = diagnostics.printer().sources(&sources).render();
    insta::assert_snapshot!(result, @r"
    error: register r4 is out of range: the program has 4 registers
     --> main.asm:1:6
      |
    1 | push r4
      |      ^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut sources = SourceMap::new();
    sources.push(SourceFile::new("main.asm", "hello"));

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::Syntax, "main.asm", 1, 0..0)
        .message("zero width error")
        .emit();

    let result = diagnostics.printer().sources(&sources).render();
    insta::assert_snapshot!(result, @r"
    error: zero width error
     --> main.asm:1:1
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_unknown_file_falls_back() {
    let mut sources = SourceMap::new();
    sources.push(SourceFile::new("other.asm", "end"));

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::Syntax, "main.asm", 7, 0..1)
        .message("unexpected characters")
        .emit();

    let result = diagnostics.printer().sources(&sources).render();
    insta::assert_snapshot!(result, @"main.asm:7: error: unexpected characters");
}
