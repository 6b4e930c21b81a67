//! Runtime engine for Friday programs.
//!
//! `vm` holds the fetch/execute loop, `memory` the bounds-checked arena,
//! `io` the console port, and `trace` the step tracer.

mod error;
mod io;
mod memory;
mod status;
mod trace;
mod vm;

#[cfg(test)]
mod io_tests;

pub use error::{LoadError, RuntimeError};
pub use io::{BufferIo, IoPort, StreamIo, format_g};
pub use memory::{Fault, Memory};
pub use status::{Halt, Status};
pub use trace::{NextInstruction, NoopTracer, PrintTracer, Step, Tracer};
pub use vm::{DEFAULT_MEMORY_SIZE, Engine, EngineBuilder};
