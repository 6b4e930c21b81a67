//! Fetch/execute loop of the Friday stack machine.
//!
//! Memory layout: the loaded image sits at address 0 and the stack grows
//! down from the top of the region. Every stack slot is 32 bits. The
//! instruction pointer is advanced past the current instruction before it
//! executes, so `dep` and `call` push the address of the next instruction.

use std::io;

use friday_bytecode::{
    ArithOp, HEADER_SIZE, NumType, Program, Registry, Semantics, codec,
};

use super::error::{LoadError, RuntimeError};
use super::io::IoPort;
use super::memory::{Fault, Memory};
use super::status::{Halt, Status};
use super::trace::{NoopTracer, Step, Tracer};

/// Size of the flat memory region unless configured otherwise (1 MiB).
pub const DEFAULT_MEMORY_SIZE: usize = 1 << 20;

/// Width of a stack slot.
const SLOT: usize = 4;

/// Builder for [`Engine`] instances.
#[derive(Clone, Copy, Debug)]
pub struct EngineBuilder {
    memory_size: usize,
    exec_fuel: Option<u64>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            exec_fuel: None,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size of the flat memory region in bytes.
    pub fn memory_size(mut self, size: usize) -> Self {
        self.memory_size = size;
        self
    }

    /// Limit each run to `fuel` steps.
    pub fn exec_fuel(mut self, fuel: u64) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    pub fn build(self, registry: &Registry) -> Engine<'_> {
        Engine {
            registry,
            memory: Memory::new(self.memory_size),
            registers: Vec::new(),
            ip: 0,
            sp: 0,
            ap: 0,
            image_end: 0,
            status: Status::NotReady,
            exec_fuel: self.exec_fuel,
        }
    }
}

/// Stops the current instruction.
enum Trap {
    Fault(Fault),
    Io(io::Error),
}

impl From<Fault> for Trap {
    fn from(fault: Fault) -> Self {
        Trap::Fault(fault)
    }
}

impl From<io::Error> for Trap {
    fn from(err: io::Error) -> Self {
        Trap::Io(err)
    }
}

pub struct Engine<'r> {
    registry: &'r Registry,
    memory: Memory,
    registers: Vec<u32>,
    /// Address of the next instruction.
    ip: usize,
    /// Address of the top stack slot; equals the memory size when empty.
    sp: usize,
    /// Address of the current instruction's first operand.
    ap: usize,
    image_end: usize,
    status: Status,
    exec_fuel: Option<u64>,
}

impl<'r> Engine<'r> {
    /// Engine with default memory size and no step limit.
    pub fn new(registry: &'r Registry) -> Self {
        EngineBuilder::new().build(registry)
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Copy an image into memory and reset the machine to run it.
    ///
    /// On error the engine is left `NotReady`.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        self.status = Status::NotReady;

        let header = Program::check_header(bytes)?;
        let too_large = LoadError::TooLarge {
            size: bytes.len(),
            capacity: self.memory.len(),
        };
        self.memory.load(bytes).map_err(|_| too_large)?;

        self.registers = vec![0; usize::from(header.register_count)];
        self.image_end = bytes.len();
        self.ip = HEADER_SIZE;
        self.sp = self.memory.len();
        self.ap = 0;
        self.status = Status::Running;
        Ok(())
    }

    pub fn load_program(&mut self, program: &Program) -> Result<(), LoadError> {
        self.load_image(program.bytes())
    }

    /// Run until the machine stops.
    pub fn run(&mut self, io: &mut impl IoPort) -> Result<Halt, RuntimeError> {
        self.run_with(io, &mut NoopTracer)
    }

    /// Run until the machine stops, reporting every step to `tracer`.
    ///
    /// Faults are not errors: they come back as the [`Halt`] status.
    pub fn run_with<T: Tracer>(
        &mut self,
        io: &mut impl IoPort,
        tracer: &mut T,
    ) -> Result<Halt, RuntimeError> {
        if self.status == Status::NotReady {
            return Err(RuntimeError::NotReady);
        }

        let mut fuel = self.exec_fuel;
        while self.status == Status::Running {
            if let Some(remaining) = fuel.as_mut() {
                if *remaining == 0 {
                    return Err(RuntimeError::ExecFuelExhausted(
                        self.exec_fuel.unwrap_or_default(),
                    ));
                }
                *remaining -= 1;
            }

            tracer.trace_step(&self.snapshot());
            self.step(io)?;
        }

        let halt = self.halt();
        tracer.trace_halt(&halt);
        Ok(halt)
    }

    /// Execute one instruction. Does nothing once the machine has stopped.
    pub fn step(&mut self, io: &mut impl IoPort) -> Result<Status, RuntimeError> {
        match self.status {
            Status::NotReady => return Err(RuntimeError::NotReady),
            Status::Running => {}
            status => return Ok(status),
        }

        match self.execute_next(io) {
            Ok(()) => {}
            Err(Trap::Fault(fault)) => self.status = fault.status(),
            Err(Trap::Io(err)) => return Err(err.into()),
        }
        Ok(self.status)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    pub fn ap(&self) -> usize {
        self.ap
    }

    pub fn registers(&self) -> &[u32] {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// End of the loaded image; the stack may not grow below it.
    pub fn image_end(&self) -> usize {
        self.image_end
    }

    pub fn halt(&self) -> Halt {
        Halt {
            status: self.status,
            ip: self.ip,
            sp: self.sp,
        }
    }

    fn snapshot(&self) -> Step<'_> {
        Step {
            registry: self.registry,
            image: &self.memory.as_slice()[..self.image_end],
            ip: self.ip,
            sp: self.sp,
            ap: self.ap,
            status: self.status,
        }
    }

    fn execute_next(&mut self, io: &mut impl IoPort) -> Result<(), Trap> {
        if self.ip >= self.image_end {
            return Err(Fault::AccessViolation.into());
        }
        let opcode = self.memory.read_u8(self.ip)?;
        let def = self
            .registry
            .by_opcode(opcode)
            .ok_or(Fault::IllegalInstruction)?;

        let next = self.ip + def.size();
        if next > self.image_end {
            return Err(Fault::AccessViolation.into());
        }
        self.ap = self.ip + 1;
        self.ip = next;

        self.execute(def.semantics, io)
    }

    fn execute(&mut self, semantics: Semantics, io: &mut impl IoPort) -> Result<(), Trap> {
        match semantics {
            Semantics::Halt => self.status = Status::HaltedExit,
            Semantics::PushConstant => {
                let value = self.memory.read_u32(self.ap)?;
                self.push(value)?;
            }
            Semantics::PushRegister => {
                let index = self.register_operand()?;
                self.push(self.registers[index])?;
            }
            Semantics::PopRegister => {
                let index = self.register_operand()?;
                self.registers[index] = self.pop()?;
            }
            Semantics::ReadInt => {
                let value = io.read_int();
                self.push(value as u32)?;
            }
            Semantics::ReadFloat => {
                let value = io.read_float();
                self.push(value.to_bits())?;
            }
            Semantics::WriteInt => {
                let value = codec::bits_to_i32(self.pop()?);
                io.write_int(value)?;
            }
            Semantics::WriteFloat => {
                let value = codec::bits_to_f32(self.pop()?);
                io.write_float(value)?;
            }
            Semantics::Depart => self.push(self.ip as u32)?,
            Semantics::Call => {
                let target = self.label_operand()?;
                self.push(self.ip as u32)?;
                self.ip = target;
            }
            Semantics::Return => self.ip = self.pop()? as usize,
            Semantics::IntToFloat => {
                let value = codec::bits_to_i32(self.pop()?);
                self.push((value as f32).to_bits())?;
            }
            Semantics::FloatToInt => {
                let value = codec::bits_to_f32(self.pop()?);
                self.push(value as i32 as u32)?;
            }
            Semantics::Jump => self.ip = self.label_operand()?,
            Semantics::Branch(ty, compare) => {
                let right = self.pop()?;
                let left = self.pop()?;
                let taken = match ty {
                    NumType::Int => {
                        compare.holds(codec::bits_to_i32(left), codec::bits_to_i32(right))
                    }
                    NumType::Float => {
                        compare.holds(codec::bits_to_f32(left), codec::bits_to_f32(right))
                    }
                };
                if taken {
                    self.ip = self.label_operand()?;
                }
            }
            Semantics::Arith(ty, op) => {
                let right = self.pop()?;
                let left = self.pop()?;
                let result = match ty {
                    NumType::Int => {
                        int_arith(op, codec::bits_to_i32(left), codec::bits_to_i32(right))? as u32
                    }
                    NumType::Float => {
                        float_arith(op, codec::bits_to_f32(left), codec::bits_to_f32(right))
                            .to_bits()
                    }
                };
                self.push(result)?;
            }
            Semantics::Sqrt => {
                let value = codec::bits_to_f32(self.pop()?);
                self.push(value.sqrt().to_bits())?;
            }
        }
        Ok(())
    }

    fn push(&mut self, value: u32) -> Result<(), Fault> {
        let sp = self
            .sp
            .checked_sub(SLOT)
            .filter(|&sp| sp >= self.image_end)
            .ok_or(Fault::AccessViolation)?;
        self.memory.write_u32(sp, value)?;
        self.sp = sp;
        Ok(())
    }

    fn pop(&mut self) -> Result<u32, Fault> {
        if self.sp + SLOT > self.memory.len() {
            return Err(Fault::AccessViolation);
        }
        let value = self.memory.read_u32(self.sp)?;
        self.sp += SLOT;
        Ok(value)
    }

    fn register_operand(&self) -> Result<usize, Fault> {
        let index = usize::from(self.memory.read_u8(self.ap)?);
        if index >= self.registers.len() {
            return Err(Fault::AccessViolation);
        }
        Ok(index)
    }

    fn label_operand(&self) -> Result<usize, Fault> {
        Ok(usize::from(self.memory.read_u16(self.ap)?))
    }
}

/// Two's-complement arithmetic; overflow wraps.
fn int_arith(op: ArithOp, left: i32, right: i32) -> Result<i32, Fault> {
    Ok(match op {
        ArithOp::Add => left.wrapping_add(right),
        ArithOp::Sub => left.wrapping_sub(right),
        ArithOp::Mul => left.wrapping_mul(right),
        ArithOp::Div if right == 0 => return Err(Fault::DivisionByZero),
        ArithOp::Div => left.wrapping_div(right),
        ArithOp::Rem if right == 0 => return Err(Fault::DivisionByZero),
        ArithOp::Rem => left.wrapping_rem(right),
    })
}

/// IEEE arithmetic; no faults.
fn float_arith(op: ArithOp, left: f32, right: f32) -> f32 {
    match op {
        ArithOp::Add => left + right,
        ArithOp::Sub => left - right,
        ArithOp::Mul => left * right,
        ArithOp::Div => left / right,
        ArithOp::Rem => left % right,
    }
}
