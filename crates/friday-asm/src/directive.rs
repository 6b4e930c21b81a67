//! Assembler directives (`.name args...`).

use crate::error::AsmError;
use crate::operand::parse_integer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `.friday_asm [version]`: the instruction set version the source targets.
    FridayAsm(Option<i64>),
    /// `.registers N`: register count for the whole program.
    Registers(i64),
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::FridayAsm(_) => "friday_asm",
            Directive::Registers(_) => "registers",
        }
    }
}

/// Parse a directive from its name (leading `.` stripped) and argument words.
pub fn parse_directive(name: &str, args: &[&str]) -> Result<Directive, AsmError> {
    match name {
        "friday_asm" => {
            let version = optional_integer(name, args)?;
            Ok(Directive::FridayAsm(version))
        }
        "registers" => match optional_integer(name, args)? {
            Some(count) => Ok(Directive::Registers(count)),
            None => Err(AsmError::syntax("`.registers` expects a register count")),
        },
        _ => Err(AsmError::UnknownDirective(name.to_owned())),
    }
}

fn optional_integer(name: &str, args: &[&str]) -> Result<Option<i64>, AsmError> {
    match args {
        [] => Ok(None),
        [arg] => match parse_integer(arg) {
            Some(Some(value)) => Ok(Some(value)),
            _ => Err(AsmError::syntax(format!(
                "`.{name}` expects an integer, found `{arg}`"
            ))),
        },
        [_, extra, ..] => Err(AsmError::syntax(format!(
            "`.{name}` takes one argument, found `{extra}`"
        ))),
    }
}
