mod args;
mod commands;
mod dispatch;


pub use commands::build_cli;
pub use dispatch::{AsmParams, EmuParams, ObjdumpParams};

/// Value of `--color`: whether `objdump` and `emu -d` listings carry escape codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Both streams must be terminals: `friday emu prog.friday | cat`
            // pipes program output while traces still reach the terminal.
            ColorChoice::Auto => {
                std::io::IsTerminal::is_terminal(&std::io::stdout())
                    && std::io::IsTerminal::is_terminal(&std::io::stderr())
            }
        }
    }
}
