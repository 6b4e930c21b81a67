use std::fs;
use std::path::PathBuf;

use friday_bytecode::{Registry, listing};
use friday_core::Colors;

use super::error::CliError;

pub struct ObjdumpArgs {
    pub program: PathBuf,
    pub color: bool,
}

pub fn run(args: ObjdumpArgs) {
    match disassemble(&args) {
        Ok(text) => print!("{text}"),
        Err(err) => {
            if let CliError::Dump { listing, .. } = &err {
                print!("{listing}");
            }
            err.exit();
        }
    }
}

/// Render the listing of `args.program`, one line per instruction.
pub fn disassemble(args: &ObjdumpArgs) -> Result<String, CliError> {
    let bytes = fs::read(&args.program).map_err(|source| CliError::Read {
        path: args.program.display().to_string(),
        source,
    })?;

    let registry = Registry::standard();
    let colors = Colors::new(args.color);
    let mut out = String::new();
    for line in listing(&bytes, &registry) {
        match line {
            Ok(line) => {
                out.push_str(&line.render(colors));
                out.push('\n');
            }
            Err(source) => {
                return Err(CliError::Dump {
                    listing: out,
                    source,
                });
            }
        }
    }
    Ok(out)
}
