//! Terminal styling for `friday objdump` listings and `friday emu -d` traces.

/// Escape sequences keyed by what they highlight, not by hue.
///
/// [`Colors::OFF`] holds empty strings, so callers interpolate the fields
/// unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    /// Mnemonics and decoded instructions (blue).
    pub mnemonic: &'static str,
    /// Operand values (green).
    pub operand: &'static str,
    /// Offsets, raw bytes and machine registers (dim).
    pub machine: &'static str,
    /// Faults and listing errors (red).
    pub fault: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        mnemonic: "\x1b[34m",
        operand: "\x1b[32m",
        machine: "\x1b[2m",
        fault: "\x1b[31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        mnemonic: "",
        operand: "",
        machine: "",
        fault: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
