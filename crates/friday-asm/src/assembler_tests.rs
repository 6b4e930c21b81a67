use friday_bytecode::{HEADER_SIZE, Registry};
use indoc::indoc;

use crate::assembler::{Pass, assemble_file};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::session::Session;
use crate::source::SourceFile;

struct Outcome {
    accepted: bool,
    code: Vec<u8>,
    register_count: u8,
    diagnostics: Diagnostics,
}

fn assemble(text: &str) -> Outcome {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);
    let mut diagnostics = Diagnostics::new();
    let accepted = assemble_file(
        &mut session,
        &SourceFile::new("main.asm", text),
        &mut diagnostics,
    );
    Outcome {
        accepted,
        code: session.image()[HEADER_SIZE..].to_vec(),
        register_count: session.register_count(),
        diagnostics,
    }
}

fn messages(outcome: &Outcome) -> Vec<String> {
    outcome
        .diagnostics
        .iter()
        .map(|d| format!("{}:{}: {}", d.line, d.severity, d.message))
        .collect()
}

#[test]
fn pass_resolving() {
    assert!(!Pass::Discovery.resolving());
    assert!(Pass::Link.resolving());
}

#[test]
fn forward_reference_resolves_to_label_offset() {
    let outcome = assemble(indoc! {"
        jmp done
        push 1
        out
        done:
        end
    "});

    assert!(outcome.accepted);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(
        outcome.code,
        [0x10, 17, 0, 0x01, 1, 0, 0, 0, 0x05, 0x00]
    );
}

#[test]
fn backward_reference() {
    let outcome = assemble(indoc! {"
        top:
            in
            jmp top
    "});

    assert!(outcome.accepted);
    assert_eq!(outcome.code, [0x04, 0x10, 8, 0]);
}

#[test]
fn instruction_after_label_on_same_line() {
    let outcome = assemble(indoc! {"
        start: push 1
        jmp start
    "});

    assert!(outcome.accepted);
    assert_eq!(outcome.code, [0x01, 1, 0, 0, 0, 0x10, 8, 0]);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let outcome = assemble(indoc! {"
        # constants

        push 2   # two
    "});

    assert!(outcome.accepted);
    assert_eq!(outcome.code, [0x01, 2, 0, 0, 0]);
}

#[test]
fn operands_take_one_trailing_comma() {
    let outcome = assemble("push 1,\npush r1 ,\n");

    assert!(outcome.accepted);
    assert_eq!(outcome.code, [0x01, 1, 0, 0, 0, 0x02, 1]);
}

#[test]
fn double_comma_is_syntax_error() {
    let outcome = assemble("push 1,,");

    assert!(!outcome.accepted);
    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::Syntax]);
    assert_eq!(messages(&outcome), ["1:error: argument expected after comma"]);
    assert_eq!(outcome.diagnostics.iter().next().unwrap().span, 7..8);
}

#[test]
fn comma_before_first_operand() {
    let outcome = assemble("push , 1");

    assert_eq!(messages(&outcome), ["1:error: argument expected before comma"]);
}

#[test]
fn register_bound_with_default_count() {
    assert!(assemble("push r3").accepted);

    let outcome = assemble("end\npush r4");
    assert!(!outcome.accepted);
    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::RegisterOutOfRange]);
    assert_eq!(
        messages(&outcome),
        ["2:error: register r4 is out of range: the program has 4 registers"]
    );
}

#[test]
fn constants() {
    let outcome = assemble("push -1\npush 0x10\npush 1.5");

    assert!(outcome.accepted);
    assert_eq!(
        outcome.code,
        [
            0x01, 0xff, 0xff, 0xff, 0xff, //
            0x01, 0x10, 0, 0, 0, //
            0x01, 0x00, 0x00, 0xc0, 0x3f,
        ]
    );
}

#[test]
fn undefined_instruction() {
    let outcome = assemble("push");
    assert_eq!(
        messages(&outcome),
        ["1:error: undefined instruction `push` with operands ()"]
    );

    let outcome = assemble("frob 1, r0");
    assert_eq!(
        messages(&outcome),
        ["1:error: undefined instruction `frob` with operands (CONSTANT, REGISTER)"]
    );
}

#[test]
fn bad_numeric_argument() {
    let outcome = assemble("push 12abc");

    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::Syntax]);
    assert_eq!(messages(&outcome), ["1:error: bad argument `12abc`"]);
}

#[test]
fn unresolved_label_rolls_file_back() {
    let outcome = assemble("push 1\njmp nowhere");

    assert!(!outcome.accepted);
    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::UnresolvedLabel]);
    assert_eq!(messages(&outcome), ["2:error: label not found: `nowhere`"]);
    assert!(outcome.code.is_empty());
}

#[test]
fn duplicate_label() {
    let outcome = assemble("a:\nend\na:");

    assert!(!outcome.accepted);
    assert_eq!(
        messages(&outcome),
        ["3:error: label `a` is already defined at <file_start+0008>"]
    );
}

#[test]
fn invalid_label_names() {
    assert_eq!(
        messages(&assemble("1a:")),
        ["1:error: invalid label name `1a:`"]
    );
    assert_eq!(messages(&assemble(":")), ["1:error: invalid label name `:`"]);
}

#[test]
fn unexpected_characters() {
    let outcome = assemble("push\u{a0}1");

    assert_eq!(messages(&outcome), ["1:error: unexpected characters"]);
}

#[test]
fn version_mismatch_warns_once() {
    let outcome = assemble(".friday_asm 2\nend");

    assert!(outcome.accepted);
    assert_eq!(outcome.code, [0x00]);
    assert_eq!(
        messages(&outcome),
        ["1:warning: source targets instruction set version 2, assembler implements 1"]
    );
}

#[test]
fn matching_version_is_silent() {
    assert!(assemble(".friday_asm 1").diagnostics.is_empty());
    assert!(assemble(".friday_asm").diagnostics.is_empty());
}

#[test]
fn malformed_version_is_error() {
    let outcome = assemble(".friday_asm v1");

    assert!(!outcome.accepted);
    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::Syntax]);
}

#[test]
fn registers_directive() {
    let outcome = assemble(".registers 8\npush r7");

    assert!(outcome.accepted);
    assert_eq!(outcome.register_count, 8);
    assert_eq!(outcome.code, [0x02, 7]);
    assert_eq!(
        messages(&outcome),
        ["1:warning: `.registers` is not recommended: programs should use the default register count"]
    );
}

#[test]
fn registers_directive_clamps() {
    let outcome = assemble(".registers 12");

    assert!(outcome.accepted);
    assert_eq!(outcome.register_count, 8);
    assert_eq!(
        outcome.diagnostics.kinds(),
        [
            DiagnosticKind::RegisterCountClamped,
            DiagnosticKind::RegistersDirective
        ]
    );
}

#[test]
fn registers_apply_from_their_line_on() {
    let outcome = assemble("push r6\n.registers 8");

    assert!(!outcome.accepted);
    assert_eq!(outcome.register_count, 4);
}

#[test]
fn directive_arguments_reject_commas() {
    let outcome = assemble(".registers 4, 5");

    assert_eq!(
        messages(&outcome),
        ["1:error: directive arguments are not comma separated"]
    );
}

#[test]
fn unknown_directive() {
    let outcome = assemble(".data 1");

    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::UnknownDirective]);
    assert_eq!(messages(&outcome), ["1:error: unknown directive `data`"]);
}

#[test]
fn dotted_label_is_a_directive() {
    let outcome = assemble(".loop:\nend\n");

    assert!(!outcome.accepted);
    assert!(outcome.code.is_empty());
    assert_eq!(outcome.diagnostics.kinds(), [DiagnosticKind::UnknownDirective]);
    assert_eq!(messages(&outcome), ["1:error: unknown directive `loop:`"]);
}

#[test]
fn address_space_exceeded() {
    let text = "push 0\n".repeat(13_107);
    let outcome = assemble(&text);

    assert!(!outcome.accepted);
    assert!(outcome.code.is_empty());
    assert_eq!(
        outcome.diagnostics.kinds(),
        [DiagnosticKind::AddressSpaceExceeded]
    );
    assert_eq!(outcome.diagnostics.iter().next().unwrap().line, 13_106);
}

#[test]
fn failed_file_keeps_earlier_files() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);
    let mut diagnostics = Diagnostics::new();

    let first = SourceFile::new("first.asm", "main:\npush 1");
    let second = SourceFile::new("second.asm", "helper:\n.registers 8\npush r7\njmp missing");
    assert!(assemble_file(&mut session, &first, &mut diagnostics));
    assert!(!assemble_file(&mut session, &second, &mut diagnostics));

    assert_eq!(session.offset(), HEADER_SIZE + 5);
    assert_eq!(session.label("main"), Some(8));
    assert_eq!(session.label("helper"), None);
    assert_eq!(session.register_count(), 4);
}

#[test]
fn file_encoding_matches_session_encoding() {
    let outcome = assemble(indoc! {"
        start: push 3
        push r1
        push -7
        pop r0
        call start
        jae start
        end
    "});
    assert!(outcome.accepted);

    let registry = Registry::standard();
    let mut session = Session::new(&registry);
    session.define_label_here("start").unwrap();
    for (mnemonic, operands) in [
        ("push", &["3"][..]),
        ("push", &["r1"]),
        ("push", &["-7"]),
        ("pop", &["r0"]),
        ("call", &["start"]),
        ("jae", &["start"]),
        ("end", &[]),
    ] {
        session.encode_instruction(mnemonic, operands, true).unwrap();
    }

    assert_eq!(outcome.code, &session.image()[HEADER_SIZE..]);
}

#[test]
fn operand_errors_point_at_the_operand() {
    let outcome = assemble("push r1, r9");

    let diagnostic = outcome.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::RegisterOutOfRange);
    assert_eq!(diagnostic.span, 9..11);
}

#[test]
fn signature_errors_point_at_the_instruction() {
    let outcome = assemble("  pop 7, 8");

    let diagnostic = outcome.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::UndefinedInstruction);
    assert_eq!(diagnostic.span, 2..10);
}
