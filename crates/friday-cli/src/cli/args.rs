//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that subcommands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Artifact written when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "a.friday";

/// Assembly sources (positional, one or more).
pub fn sources_arg() -> Arg {
    Arg::new("sources")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("Assembly files; the first one holds the entry point")
}

/// Program image (positional).
pub fn program_arg() -> Arg {
    Arg::new("program")
        .value_name("PROGRAM")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Program image produced by `friday asm`")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_OUTPUT)
        .help("Write the program image to FILE")
}

/// Step tracing (-d/--debug).
pub fn debug_arg() -> Arg {
    Arg::new("debug")
        .short('d')
        .long("debug")
        .action(ArgAction::SetTrue)
        .help("Trace every step on stderr")
}

/// Execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Stop after N instructions")
}

/// Memory size of the machine (--memory).
pub fn memory_arg() -> Arg {
    Arg::new("memory")
        .long("memory")
        .value_name("BYTES")
        .value_parser(value_parser!(usize))
        .help("Size of machine memory in bytes (default 1 MiB)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
