use friday_bytecode::{HEADER_SIZE, MAGIC, Operand, Registry};

use crate::error::AsmError;
use crate::session::{EncodeError, Session};

fn code<'a>(session: &'a Session<'_>) -> &'a [u8] {
    &session.image()[HEADER_SIZE..]
}

#[test]
fn starts_with_default_header() {
    let registry = Registry::standard();
    let session = Session::new(&registry);

    assert_eq!(session.image(), [b'F', b'R', b'D', b'Y', 1, 0, 4, 0]);
    assert_eq!(session.offset(), HEADER_SIZE);
    assert_eq!(session.register_count(), 4);
}

#[test]
fn encode_constant_and_register_operands() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.encode_instruction("push", &["3"], true).unwrap();
    session.encode_instruction("pop", &["r2"], true).unwrap();
    session.encode_instruction("end", &[], true).unwrap();

    assert_eq!(code(&session), [0x01, 3, 0, 0, 0, 0x03, 2, 0x00]);
}

#[test]
fn labels_are_placeholders_until_resolving() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.encode_instruction("jmp", &["later"], false).unwrap();
    assert_eq!(code(&session), [0x10, 0, 0]);

    assert_eq!(
        session.encode_instruction("jmp", &["later"], true),
        Err(EncodeError {
            error: AsmError::UnresolvedLabel("later".to_owned()),
            operand: Some(0),
        })
    );
    assert_eq!(code(&session), [0x10, 0, 0]);
}

#[test]
fn labels_resolve_to_absolute_offsets() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.encode_instruction("push", &["1"], true).unwrap();
    assert_eq!(session.define_label_here("here"), Ok(13));
    session.encode_instruction("call", &["here"], true).unwrap();

    assert_eq!(&code(&session)[5..], [0x08, 13, 0]);
}

#[test]
fn undefined_signature_appends_nothing() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    assert_eq!(
        session.encode_instruction("pop", &["7"], true),
        Err(EncodeError {
            error: AsmError::UndefinedInstruction {
                mnemonic: "pop".to_owned(),
                signature: "(CONSTANT)".to_owned(),
            },
            operand: None,
        })
    );
    assert_eq!(
        session.emit("frob", &[]),
        Err(AsmError::UndefinedInstruction {
            mnemonic: "frob".to_owned(),
            signature: "()".to_owned(),
        })
    );
    assert!(code(&session).is_empty());
}

#[test]
fn emit_resolved_operands() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.emit("jne", &[Operand::Label(0x1234)]).unwrap();

    assert_eq!(code(&session), [0x16, 0x34, 0x12]);
}

#[test]
fn duplicate_label_keeps_first_offset() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.define_label_here("start").unwrap();
    session.encode_instruction("end", &[], true).unwrap();

    assert_eq!(
        session.define_label_here("start"),
        Err(AsmError::DuplicateLabel {
            name: "start".to_owned(),
            offset: 8,
        })
    );
    assert_eq!(session.label("start"), Some(8));
}

#[test]
fn confirm_label_detects_moves() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.define_label_here("top").unwrap();
    assert_eq!(session.confirm_label_here("top"), Ok(()));

    session.encode_instruction("end", &[], true).unwrap();
    assert_eq!(
        session.confirm_label_here("top"),
        Err(AsmError::LabelMoved {
            name: "top".to_owned(),
            recorded: 8,
            actual: 9,
        })
    );
    assert_eq!(
        session.confirm_label_here("missing"),
        Err(AsmError::UnresolvedLabel("missing".to_owned()))
    );
}

#[test]
fn truncate_keeps_header() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.encode_instruction("push", &["1"], true).unwrap();
    session.encode_instruction("push", &["2"], true).unwrap();
    session.truncate(13);
    assert_eq!(code(&session), [0x01, 1, 0, 0, 0]);

    session.truncate(0);
    assert_eq!(session.image().len(), HEADER_SIZE);
    assert_eq!(&session.image()[..4], &MAGIC);
}

#[test]
fn first_register_request_sets_count() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    let request = session.request_registers(2);

    assert_eq!(request.count, 2);
    assert!(!request.clamped);
    assert_eq!(session.register_count(), 2);
    assert_eq!(session.image()[6], 2);
}

#[test]
fn later_register_requests_only_raise() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    session.request_registers(6);
    assert_eq!(session.request_registers(3).count, 6);
    assert_eq!(session.request_registers(7).count, 7);
    assert_eq!(session.image()[6], 7);
}

#[test]
fn register_requests_are_clamped() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    let high = session.request_registers(12);
    assert_eq!(high.count, 8);
    assert!(high.clamped);

    let mut session = Session::new(&registry);
    let low = session.request_registers(-1);
    assert_eq!(low.count, 0);
    assert!(low.clamped);
}

#[test]
fn register_count_gates_operands() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    assert!(session.encode_instruction("push", &["r6"], true).is_err());
    session.request_registers(8);
    session.encode_instruction("push", &["r6"], true).unwrap();

    assert_eq!(code(&session), [0x02, 6]);
}

#[test]
fn rollback_restores_offset_labels_and_registers() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);
    session.define_label_here("kept").unwrap();
    session.encode_instruction("end", &[], true).unwrap();

    let checkpoint = session.checkpoint();
    session.define_label_here("dropped").unwrap();
    session.request_registers(8);
    session.encode_instruction("push", &["1"], true).unwrap();
    session.rollback(checkpoint, &["dropped"]);

    assert_eq!(session.offset(), 9);
    assert_eq!(session.register_count(), 4);
    assert_eq!(session.image()[6], 4);
    assert_eq!(session.label("kept"), Some(8));
    assert_eq!(session.label("dropped"), None);

    // Register requests after a rollback start fresh.
    assert_eq!(session.request_registers(2).count, 2);
}

#[test]
fn address_space_limit() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    while session.offset() + 5 <= 0xffff {
        session.encode_instruction("push", &["0"], true).unwrap();
    }
    assert!(session.checked_offset().is_ok());

    session.encode_instruction("push", &["0"], true).unwrap();
    assert_eq!(
        session.checked_offset(),
        Err(AsmError::AddressSpaceExceeded {
            offset: session.offset()
        })
    );
    assert!(session.define_label_here("late").is_err());
}

#[test]
fn finish_yields_program() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);
    session.request_registers(5);
    session.encode_instruction("end", &[], true).unwrap();

    let program = session.finish();

    assert_eq!(program.register_count(), 5);
    assert_eq!(program.code(), [0x00]);
}

#[test]
fn encode_error_names_the_operand() {
    let registry = Registry::standard();
    let mut session = Session::new(&registry);

    assert_eq!(
        session.encode_instruction("push", &["r1", "r9"], true),
        Err(EncodeError {
            error: AsmError::RegisterOutOfRange {
                register: "r9".to_owned(),
                count: 4,
            },
            operand: Some(1),
        })
    );
    assert!(code(&session).is_empty());
}
