//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("friday")
        .about("Assembler, emulator and disassembler for the Friday instruction set")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(asm_command())
        .subcommand(emu_command())
        .subcommand(objdump_command())
}

/// Assemble and link source files into one program image.
pub fn asm_command() -> Command {
    Command::new("asm")
        .about("Assemble source files into a program image")
        .override_usage("  friday asm [-o <FILE>] <MAIN> [OTHER]...")
        .after_help(
            r#"EXAMPLES:
  friday asm main.s                  # writes a.friday
  friday asm -o prog.friday main.s lib.s
  friday asm main.s --color never    # plain diagnostics"#,
        )
        .arg(sources_arg())
        .arg(output_file_arg())
        .arg(color_arg())
}

/// Run a program image.
pub fn emu_command() -> Command {
    Command::new("emu")
        .about("Run a program image")
        .override_usage("  friday emu [-d] <PROGRAM>")
        .after_help(
            r#"EXAMPLES:
  friday emu a.friday
  friday emu -d a.friday             # trace each step on stderr
  friday emu a.friday --fuel 10000   # stop runaway loops"#,
        )
        .arg(program_arg())
        .arg(debug_arg())
        .arg(fuel_arg())
        .arg(memory_arg())
        .arg(color_arg())
}

/// Print the listing of a program image.
pub fn objdump_command() -> Command {
    Command::new("objdump")
        .about("Disassemble a program image")
        .override_usage("  friday objdump <PROGRAM>")
        .arg(program_arg())
        .arg(color_arg())
}
