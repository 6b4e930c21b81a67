#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Friday assembler, VM and CLI.

mod colors;
mod hash_table;

#[cfg(test)]
mod colors_tests;

pub use colors::Colors;
pub use hash_table::{
    DEFAULT_MAX_LOAD_FACTOR, HashTable, INITIAL_CAPACITY, ProbeStrategy, RollingProbe,
};
