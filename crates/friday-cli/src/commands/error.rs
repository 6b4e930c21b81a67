use std::io;

use friday_asm::LinkError;
use friday_bytecode::{DumpError, ImageError};
use friday_vm::{Halt, LoadError, RuntimeError};

/// Exit code for assembly, usage and file failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the program faulted or did not finish.
pub const EXIT_FAULT: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{path}`: {source}")]
    Read { path: String, source: io::Error },

    #[error("cannot load `{path}`: {source}")]
    Image { path: String, source: ImageError },

    #[error("cannot write `{path}`: {source}")]
    Write { path: String, source: ImageError },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("{0}")]
    Fault(Halt),

    /// The listing stopped early; `listing` holds the lines printed so far.
    #[error("{source}")]
    Dump { listing: String, source: DumpError },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Runtime(_) | CliError::Fault(_) => EXIT_FAULT,
            _ => EXIT_FAILURE,
        }
    }

    /// Print `error: <message>` on stderr and leave the process.
    pub fn exit(&self) -> ! {
        eprintln!("error: {self}");
        std::process::exit(self.exit_code());
    }
}
