//! Operand token classification.
//!
//! Order of attempts: numeric literal, register, label. Integers are
//! decimal (leading zeros included, there is no octal form) or `0x`
//! hexadecimal with an optional sign and must fit in 32 bits
//! (signed or unsigned); floats are anything else Rust parses as `f32` that
//! starts like a number. Constants are stored as raw bit patterns.

use friday_bytecode::OperandKind;

use crate::error::AsmError;

/// An operand token after classification, before label resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperandToken<'s> {
    Constant(u32),
    Register(u8),
    Label(&'s str),
}

impl OperandToken<'_> {
    pub fn kind(&self) -> OperandKind {
        match self {
            OperandToken::Constant(_) => OperandKind::Constant,
            OperandToken::Register(_) => OperandKind::Register,
            OperandToken::Label(_) => OperandKind::Label,
        }
    }
}

/// Classify `token` against a program with `register_count` registers.
pub fn classify(token: &str, register_count: u8) -> Result<OperandToken<'_>, AsmError> {
    if let Some(bits) = parse_constant(token)? {
        return Ok(OperandToken::Constant(bits));
    }

    if let Some(index) = register_index(token) {
        return match index {
            Some(i) if i < u32::from(register_count) => Ok(OperandToken::Register(i as u8)),
            _ => Err(AsmError::RegisterOutOfRange {
                register: token.to_owned(),
                count: register_count,
            }),
        };
    }

    if token.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(AsmError::syntax(format!("bad argument `{token}`")));
    }

    Ok(OperandToken::Label(token))
}

/// Parse a numeric literal into its 32-bit pattern.
///
/// `Ok(None)` means the token is not a number at all.
pub fn parse_constant(token: &str) -> Result<Option<u32>, AsmError> {
    if let Some(int) = parse_integer(token) {
        let value = int.filter(|v| (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(v));
        let Some(value) = value else {
            return Err(AsmError::syntax(format!(
                "integer `{token}` does not fit in 32 bits"
            )));
        };
        return Ok(Some(value as u32));
    }

    if looks_numeric(token) {
        if let Ok(float) = token.parse::<f32>() {
            return Ok(Some(float.to_bits()));
        }
    }

    Ok(None)
}

/// Integer literal syntax. `Some(None)` on overflow.
pub fn parse_integer(token: &str) -> Option<Option<i64>> {
    let (negative, unsigned) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok();
    Some(magnitude.map(|m| if negative { -m } else { m }))
}

/// `rN`: `Some(Some(N))`, or `Some(None)` when N overflows.
fn register_index(token: &str) -> Option<Option<u32>> {
    let digits = token.strip_prefix('r')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().ok())
}

/// Rules out `inf`, `nan` and other words Rust would accept as floats.
fn looks_numeric(token: &str) -> bool {
    let body = token.trim_start_matches(['+', '-']);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && body.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}
