mod cli;
mod commands;

use cli::{AsmParams, EmuParams, ObjdumpParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("asm", m)) => {
            let params = AsmParams::from_matches(m);
            commands::asm::run(params.into());
        }
        Some(("emu", m)) => {
            let params = EmuParams::from_matches(m);
            commands::emu::run(params.into());
        }
        Some(("objdump", m)) => {
            let params = ObjdumpParams::from_matches(m);
            commands::objdump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
