//! Human-readable listing of a program image.
//!
//! One line per header or instruction:
//!
//! ```text
//! 0000	4652 4459 0100 0400	{FRIDAY EXECUTABLE} Target arch version = 1; number of registers = 4.
//! 0008	0103 0000 00       	push 3
//! 000d	1008 00            	jmp <file_start+0008>
//! ```
//!
//! Columns: offset, raw bytes in pairs, then the decoded form.

use std::fmt::Write as _;

use friday_core::Colors;

use crate::decode::{Decoded, decode_at};
use crate::header::Header;
use crate::isa::Registry;
use crate::{HEADER_SIZE, MAGIC};

/// Width of the raw-bytes column (eight bytes grouped in pairs).
const RAW_WIDTH: usize = 19;

/// The listing stopped at `offset`: bad header, unknown opcode, or a
/// truncated instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("<file_start+{offset:04x}> error reading instruction or header")]
pub struct DumpError {
    pub offset: usize,
}

/// One listing entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Line<'b, 'r> {
    Header {
        raw: &'b [u8],
        header: Header,
    },
    Instruction {
        offset: usize,
        raw: &'b [u8],
        decoded: Decoded<'r>,
    },
}

impl Line<'_, '_> {
    pub fn render(&self, colors: Colors) -> String {
        let Colors {
            mnemonic,
            operand: value,
            machine,
            reset,
            ..
        } = colors;

        match self {
            Line::Header { raw, header } => format!(
                "{machine}0000\t{}{reset}\t{{FRIDAY EXECUTABLE}} Target arch version = {}; number of registers = {}.",
                raw_column(raw),
                header.version,
                header.register_count,
            ),
            Line::Instruction {
                offset,
                raw,
                decoded,
            } => {
                let mut out = format!(
                    "{machine}{offset:04x}\t{}{reset}\t{mnemonic}{}{reset}",
                    raw_column(raw),
                    decoded.def.mnemonic
                );
                for (i, operand) in decoded.operands.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write!(out, " {value}{operand}{reset}").expect("String write never fails");
                }
                out
            }
        }
    }
}

/// Iterator over listing lines. Yields one `Err` and then stops on failure.
pub struct Listing<'b, 'r> {
    bytes: &'b [u8],
    registry: &'r Registry,
    offset: usize,
    done: bool,
}

/// List `bytes`, a complete program image, header first.
pub fn listing<'b, 'r>(bytes: &'b [u8], registry: &'r Registry) -> Listing<'b, 'r> {
    Listing {
        bytes,
        registry,
        offset: 0,
        done: false,
    }
}

impl<'b, 'r> Iterator for Listing<'b, 'r> {
    type Item = Result<Line<'b, 'r>, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.offset == 0 {
            let header = Header::from_bytes(self.bytes).filter(|h| h.magic == MAGIC);
            let Some(header) = header else {
                self.done = true;
                return Some(Err(DumpError { offset: 0 }));
            };
            self.offset = HEADER_SIZE;
            return Some(Ok(Line::Header {
                raw: &self.bytes[..HEADER_SIZE],
                header,
            }));
        }

        if self.offset >= self.bytes.len() {
            self.done = true;
            return None;
        }

        let offset = self.offset;
        match decode_at(self.registry, self.bytes, offset) {
            Ok(decoded) => {
                self.offset += decoded.size();
                Some(Ok(Line::Instruction {
                    offset,
                    raw: &self.bytes[offset..self.offset],
                    decoded,
                }))
            }
            Err(_) => {
                self.done = true;
                Some(Err(DumpError { offset }))
            }
        }
    }
}

/// Render the whole listing. A failure is reported as the final line.
pub fn dump(bytes: &[u8], registry: &Registry, colors: Colors) -> String {
    let mut out = String::new();
    for line in listing(bytes, registry) {
        match line {
            Ok(line) => out.push_str(&line.render(colors)),
            Err(err) => write!(out, "{}{err}{}", colors.fault, colors.reset)
                .expect("String write never fails"),
        }
        out.push('\n');
    }
    out
}

fn raw_column(raw: &[u8]) -> String {
    let mut out = String::with_capacity(RAW_WIDTH);
    for (i, byte) in raw.iter().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(' ');
        }
        write!(out, "{byte:02x}").expect("String write never fails");
    }
    format!("{out:<RAW_WIDTH$}")
}
