//! Errors raised by the engine outside of machine faults.

use friday_bytecode::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("image of {size} bytes does not fit in {capacity} bytes of memory")]
    TooLarge { size: usize, capacity: usize },
}

/// Errors that end a run without a machine fault.
///
/// Faults (illegal instruction, access violation, division by zero) are not
/// errors: they are terminal statuses reported through [`crate::Halt`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no program is loaded")]
    NotReady,

    /// The step budget ran out; the machine is still running.
    #[error("execution limit of {0} steps exceeded")]
    ExecFuelExhausted(u64),

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
