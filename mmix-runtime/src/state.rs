//! Halt bookkeeping for the MMIX machine

use serde::{Deserialize, Serialize};

/// Why a machine stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HaltReason {
    /// TRAP instruction
    Trap { pc: u64 },
    /// Opcode outside the implemented table
    UnimplementedOpcode { pc: u64, opcode: u8 },
    /// `max_steps` reached
    StepLimit,
}

/// Outcome of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance to the next instruction
    Continue,
    /// Stop the machine
    Halt(HaltReason),
}

impl Flow {
    pub fn is_halt(&self) -> bool {
        matches!(self, Flow::Halt(_))
    }
}
