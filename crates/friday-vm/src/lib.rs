//! Interpreter for Friday program images.
//!
//! The engine loads an image into a fixed-size flat memory region and runs
//! it as a stack machine: code at the bottom, stack growing down from the top.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    BufferIo, DEFAULT_MEMORY_SIZE, Engine, EngineBuilder, Fault, Halt, IoPort, LoadError, Memory,
    NextInstruction, NoopTracer, PrintTracer, RuntimeError, Status, Step, StreamIo, Tracer,
    format_g,
};
