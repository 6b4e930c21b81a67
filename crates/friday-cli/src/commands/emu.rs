use std::io;
use std::path::PathBuf;

use friday_bytecode::{Program, Registry};
use friday_core::Colors;
use friday_vm::{Engine, Halt, IoPort, NoopTracer, PrintTracer, StreamIo, Tracer};

use super::error::CliError;

pub struct EmuArgs {
    pub program: PathBuf,
    pub debug: bool,
    pub fuel: Option<u64>,
    pub memory: Option<usize>,
    pub color: bool,
}

pub fn run(args: EmuArgs) {
    let mut port = StreamIo::stdio();
    let result = if args.debug {
        let mut tracer = PrintTracer::new(io::stderr().lock(), Colors::new(args.color));
        emulate(&args, &mut port, &mut tracer)
    } else {
        emulate(&args, &mut port, &mut NoopTracer)
    };

    match result {
        Ok(halt) if halt.is_clean() => {}
        Ok(halt) => CliError::Fault(halt).exit(),
        Err(err) => err.exit(),
    }
}

/// Load `args.program` and run it to completion.
///
/// A fault is not an error here: the returned [`Halt`] says how the
/// machine stopped.
pub fn emulate<T: Tracer>(
    args: &EmuArgs,
    port: &mut impl IoPort,
    tracer: &mut T,
) -> Result<Halt, CliError> {
    let program = Program::from_path(&args.program).map_err(|source| CliError::Image {
        path: args.program.display().to_string(),
        source,
    })?;

    let registry = Registry::standard();
    let mut builder = Engine::builder();
    if let Some(size) = args.memory {
        builder = builder.memory_size(size);
    }
    if let Some(fuel) = args.fuel {
        builder = builder.exec_fuel(fuel);
    }

    let mut engine = builder.build(&registry);
    engine.load_program(&program)?;
    Ok(engine.run_with(port, tracer)?)
}
