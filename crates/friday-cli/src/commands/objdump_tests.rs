use std::fs;
use std::path::PathBuf;

use friday_asm::SourceFile;
use friday_bytecode::Registry;
use indoc::indoc;

use super::error::CliError;
use super::objdump::{ObjdumpArgs, disassemble};

fn args(program: PathBuf) -> ObjdumpArgs {
    ObjdumpArgs {
        program,
        color: false,
    }
}

#[test]
fn lists_assembled_program() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::standard();
    let source = indoc! {"
        jmp main
        main:
        push 3
        pop r1
        end
    "};
    let linked = friday_asm::assemble(&registry, [SourceFile::new("main.asm", source)]).unwrap();
    let path = dir.path().join("a.friday");
    linked.program.write_to(&path).unwrap();

    let listing = disassemble(&args(path)).unwrap();

    insta::assert_snapshot!(listing, @r"
    0000	4652 4459 0100 0400	{FRIDAY EXECUTABLE} Target arch version = 1; number of registers = 4.
    0008	100b 00            	jmp <file_start+000b>
    000b	0103 0000 00       	push 3
    0010	0301               	pop r1
    0012	00                 	end
    ");
}

#[test]
fn stops_at_unknown_opcode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.friday");
    fs::write(&path, [b'F', b'R', b'D', b'Y', 1, 0, 4, 0, 0x05, 0xee]).unwrap();

    let err = disassemble(&args(path)).unwrap_err();

    let CliError::Dump { listing, source } = &err else {
        panic!("expected a listing error, got {err:?}");
    };
    assert_eq!(listing.lines().count(), 2);
    assert_eq!(source.offset, 9);
    assert_eq!(
        err.to_string(),
        "<file_start+0009> error reading instruction or header"
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    let err = disassemble(&args(dir.path().join("missing.friday"))).unwrap_err();

    assert!(matches!(err, CliError::Read { .. }));
}
