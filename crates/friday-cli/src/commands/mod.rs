pub mod asm;
pub mod emu;
pub mod error;
pub mod objdump;

#[cfg(test)]
mod objdump_tests;
