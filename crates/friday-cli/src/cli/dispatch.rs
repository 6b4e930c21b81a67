//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but keep the raw
//! [`ColorChoice`]; the `From` impls resolve it against the terminal.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use super::args::DEFAULT_OUTPUT;
use crate::commands::asm::AsmArgs;
use crate::commands::emu::EmuArgs;
use crate::commands::objdump::ObjdumpArgs;

pub struct AsmParams {
    pub sources: Vec<PathBuf>,
    pub output: PathBuf,
    pub color: ColorChoice,
}

impl AsmParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            sources: m
                .get_many::<PathBuf>("sources")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            output: m
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            color: parse_color(m),
        }
    }
}

impl From<AsmParams> for AsmArgs {
    fn from(p: AsmParams) -> Self {
        Self {
            sources: p.sources,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EmuParams {
    pub program: PathBuf,
    pub debug: bool,
    pub fuel: Option<u64>,
    pub memory: Option<usize>,
    pub color: ColorChoice,
}

impl EmuParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program: program_path(m),
            debug: m.get_flag("debug"),
            fuel: m.get_one::<u64>("fuel").copied(),
            memory: m.get_one::<usize>("memory").copied(),
            color: parse_color(m),
        }
    }
}

impl From<EmuParams> for EmuArgs {
    fn from(p: EmuParams) -> Self {
        Self {
            program: p.program,
            debug: p.debug,
            fuel: p.fuel,
            memory: p.memory,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ObjdumpParams {
    pub program: PathBuf,
    pub color: ColorChoice,
}

impl ObjdumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program: program_path(m),
            color: parse_color(m),
        }
    }
}

impl From<ObjdumpParams> for ObjdumpArgs {
    fn from(p: ObjdumpParams) -> Self {
        Self {
            program: p.program,
            color: p.color.should_colorize(),
        }
    }
}

fn program_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("program").cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
