//! Machine status and the final state of a run.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// No image loaded.
    #[default]
    NotReady,
    Running,
    /// `end` was executed.
    HaltedExit,
    FaultedIllegalInstruction,
    FaultedAccessViolation,
    FaultedDivisionByZero,
}

impl Status {
    /// Terminal statuses never change until a new image is loaded.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::NotReady | Status::Running)
    }

    pub fn is_fault(self) -> bool {
        matches!(
            self,
            Status::FaultedIllegalInstruction
                | Status::FaultedAccessViolation
                | Status::FaultedDivisionByZero
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::NotReady => "not ready",
            Status::Running => "running",
            Status::HaltedExit => "halted",
            Status::FaultedIllegalInstruction => "illegal instruction",
            Status::FaultedAccessViolation => "access violation",
            Status::FaultedDivisionByZero => "division by zero",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where and how a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Halt {
    pub status: Status,
    /// Next fetch address. A fault raised while fetching (unknown opcode,
    /// ip outside the image, truncated instruction) leaves it on the faulting
    /// opcode; a fault raised while executing leaves it already advanced
    /// past that instruction, or on its jump target.
    pub ip: usize,
    pub sp: usize,
}

impl Halt {
    pub fn is_clean(&self) -> bool {
        self.status == Status::HaltedExit
    }
}

/// `access violation: ip = 0x0000000d, sp = 0x00100000`
impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ip = 0x{:08x}, sp = 0x{:08x}",
            self.status, self.ip, self.sp
        )
    }
}
