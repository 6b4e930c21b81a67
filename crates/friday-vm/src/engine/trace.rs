//! Step tracing.
//!
//! The engine calls the tracer before every step and once when the run
//! stops. [`NoopTracer`] compiles away; [`PrintTracer`] writes one line per
//! step. Decoding the next instruction is left to the tracer, so a no-op
//! trace costs nothing.

use std::io::Write;

use friday_bytecode::{DecodeError, Decoded, Registry, decode_at};
use friday_core::Colors;

use super::status::{Halt, Status};

/// Machine state right before a step.
pub struct Step<'a> {
    pub(crate) registry: &'a Registry,
    pub(crate) image: &'a [u8],
    pub ip: usize,
    pub sp: usize,
    /// Operand address of the previous instruction.
    pub ap: usize,
    pub status: Status,
}

/// What the engine is about to execute.
#[derive(Debug, PartialEq)]
pub enum NextInstruction<'r> {
    Decoded(Decoded<'r>),
    /// Unknown opcode, or an instruction cut off by the end of the image.
    Raw(u8),
    OutOfImage,
}

impl<'a> Step<'a> {
    pub fn next_instruction(&self) -> NextInstruction<'a> {
        match decode_at(self.registry, self.image, self.ip) {
            Ok(decoded) => NextInstruction::Decoded(decoded),
            Err(DecodeError::UnknownOpcode { opcode }) => NextInstruction::Raw(opcode),
            Err(_) => match self.image.get(self.ip) {
                Some(&byte) => NextInstruction::Raw(byte),
                None => NextInstruction::OutOfImage,
            },
        }
    }
}

pub trait Tracer {
    /// Called before fetching the instruction at `step.ip`.
    fn trace_step(&mut self, step: &Step<'_>);

    /// Called once the machine leaves the running state.
    fn trace_halt(&mut self, halt: &Halt);
}

/// Tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_step(&mut self, _step: &Step<'_>) {}

    #[inline(always)]
    fn trace_halt(&mut self, _halt: &Halt) {}
}

/// Writes one line per step:
///
/// ```text
/// ip = 0x00000008, sp = 0x00100000, ap = 0x00000000, status = running | push 3
/// ```
///
/// Write errors are ignored; tracing never stops a run.
pub struct PrintTracer<W> {
    out: W,
    colors: Colors,
}

impl<W: Write> PrintTracer<W> {
    pub fn new(out: W, colors: Colors) -> Self {
        Self { out, colors }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Tracer for PrintTracer<W> {
    fn trace_step(&mut self, step: &Step<'_>) {
        let c = self.colors;
        let next = match step.next_instruction() {
            NextInstruction::Decoded(decoded) => format!("{}{decoded}{}", c.mnemonic, c.reset),
            NextInstruction::Raw(byte) => {
                format!("{}unknown instruction 0x{byte:02x}{}", c.fault, c.reset)
            }
            NextInstruction::OutOfImage => format!("{}end of image{}", c.fault, c.reset),
        };
        let _ = writeln!(
            self.out,
            "{}ip = 0x{:08x}, sp = 0x{:08x}, ap = 0x{:08x}{}, status = {} | {next}",
            c.machine, step.ip, step.sp, step.ap, c.reset, step.status
        );
    }

    fn trace_halt(&mut self, halt: &Halt) {
        let c = self.colors;
        let color = if halt.status.is_fault() { c.fault } else { c.machine };
        let _ = writeln!(self.out, "{color}{halt}{}", c.reset);
    }
}
