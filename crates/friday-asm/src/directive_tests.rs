use crate::directive::{Directive, parse_directive};
use crate::error::AsmError;

#[test]
fn friday_asm_version_is_optional() {
    assert_eq!(parse_directive("friday_asm", &[]), Ok(Directive::FridayAsm(None)));
    assert_eq!(
        parse_directive("friday_asm", &["1"]),
        Ok(Directive::FridayAsm(Some(1)))
    );
}

#[test]
fn registers_requires_count() {
    assert_eq!(parse_directive("registers", &["6"]), Ok(Directive::Registers(6)));
    assert_eq!(
        parse_directive("registers", &["-2"]),
        Ok(Directive::Registers(-2))
    );
    assert_eq!(
        parse_directive("registers", &[]),
        Err(AsmError::Syntax(
            "`.registers` expects a register count".to_owned()
        ))
    );
}

#[test]
fn malformed_arguments() {
    assert_eq!(
        parse_directive("friday_asm", &["one"]),
        Err(AsmError::Syntax(
            "`.friday_asm` expects an integer, found `one`".to_owned()
        ))
    );
    assert_eq!(
        parse_directive("registers", &["4", "5"]),
        Err(AsmError::Syntax(
            "`.registers` takes one argument, found `5`".to_owned()
        ))
    );
}

#[test]
fn unknown_directive() {
    assert_eq!(
        parse_directive("data", &["1"]),
        Err(AsmError::UnknownDirective("data".to_owned()))
    );
}

#[test]
fn names() {
    assert_eq!(Directive::FridayAsm(None).name(), "friday_asm");
    assert_eq!(Directive::Registers(4).name(), "registers");
}
