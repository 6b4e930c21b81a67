use std::path::PathBuf;

use friday_asm::{Linker, Report};
use friday_bytecode::Registry;

use super::error::CliError;

pub struct AsmArgs {
    pub sources: Vec<PathBuf>,
    pub output: PathBuf,
    pub color: bool,
}

pub fn run(args: AsmArgs) {
    match assemble(&args) {
        Ok(report) => print_report(&report, args.color),
        Err(err) => {
            if let CliError::Link(link) = &err {
                print_report(link.report(), args.color);
            }
            err.exit();
        }
    }
}

/// Link `args.sources` and write the image to `args.output`.
///
/// Nothing is written when any file fails. The returned report carries the
/// warnings of a successful link.
pub fn assemble(args: &AsmArgs) -> Result<Report, CliError> {
    let registry = Registry::standard();
    let linked = Linker::new(&registry).link_paths(&args.sources)?;

    linked
        .program
        .write_to(&args.output)
        .map_err(|source| CliError::Write {
            path: args.output.display().to_string(),
            source,
        })?;
    Ok(linked.report)
}

fn print_report(report: &Report, color: bool) {
    if !report.diagnostics.is_empty() {
        eprintln!("{}", report.render(color));
    }
}
