//! Runtime error types for the MMIX machine

use crate::state::HaltReason;
use mmix_spec::MmixError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] MmixError),

    #[error("Instruction at {pc:#018x} failed: {source}")]
    Fault {
        pc: u64,
        #[source]
        source: MmixError,
    },

    #[error("Machine already halted: {reason:?}")]
    Halted { reason: HaltReason },
}

impl RuntimeError {
    /// Underlying value or memory error, if any
    pub fn spec_error(&self) -> Option<&MmixError> {
        match self {
            RuntimeError::SpecError(err) | RuntimeError::Fault { source: err, .. } => Some(err),
            RuntimeError::Halted { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
