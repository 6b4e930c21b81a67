//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::isa::{InstructionDef, Registry};

impl Registry {
    /// Register a built-in instruction. A conflict means the static table is broken.
    pub(crate) fn ensure_registered(&mut self, def: InstructionDef) {
        if let Err(err) = self.register(def) {
            panic!("built-in instruction table is inconsistent: {err}");
        }
    }
}
