//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use friday_bytecode::Program;

/// Wrap an image built by a session. Sessions always write a valid header.
pub(crate) fn ensure_valid_image(bytes: Vec<u8>) -> Program {
    match Program::from_bytes(bytes) {
        Ok(program) => program,
        Err(err) => panic!("assembled image has an invalid header: {err}"),
    }
}
