//! # MMIX Runtime
//!
//! Memory, registers and load/store execution for a 64-bit MMIX machine.
//!
//! ## Features
//!
//! - **Sparse memory**: 2^64 byte addresses, unwritten bytes read as zero
//! - **Register file**: 256 general-purpose and 32 special-purpose Octas
//! - **Loads and stores**: LDB..LDOU, LDHT, LDA, STB..STOU, STHT
//! - **Memory dumps**: deterministic text listing at any width
//!
//! ## Example
//!
//! ```rust
//! use mmix_runtime::{HaltReason, Machine};
//! use mmix_spec::{Instruction, Opcode};
//!
//! let program = [
//!     Instruction::new(Opcode::Ldai, 1, 0, 42).encode().unwrap(),
//!     Instruction::new(Opcode::Trap, 0, 0, 0).encode().unwrap(),
//! ];
//! let mut machine = Machine::new();
//! machine.load_program(0, &program).unwrap();
//! let result = machine.run().unwrap();
//! assert_eq!(result.halt_reason, HaltReason::Trap { pc: 4 });
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod registers;
pub mod addressing;
pub mod execute;
pub mod vm;

pub use addressing::{effective_address, z_operand};
pub use error::{Result, RuntimeError};
pub use execute::execute;
pub use memory::Memory;
pub use registers::RegisterFile;
pub use state::{Flow, HaltReason};
pub use vm::{ExecutionResult, Machine, MachineConfig};

/// Simple execution helper
///
/// Loads `words` at the default entry point and runs them to completion.
pub fn run(words: &[mmix_spec::Tetra]) -> Result<Machine> {
    let mut machine = Machine::new();
    let entry_point = machine.config().entry_point;
    machine.load_program(entry_point, words)?;
    machine.run()?;
    Ok(machine)
}
