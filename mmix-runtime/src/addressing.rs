//! Operand and effective-address computation
//!
//! Address arithmetic is modular: the sum of two register contents (or a
//! register and a signed immediate) wraps at 2^64 instead of overflowing.

use crate::registers::RegisterFile;
use mmix_spec::{AddressingMode, Byte, Octa};

/// Effective address `$Y + Z` (direct) or `$Y + $Z` (indirect)
pub fn effective_address(registers: &RegisterFile, y: Byte, z: Byte, mode: AddressingMode) -> u64 {
    let base = registers.general(y).uint();
    match mode {
        AddressingMode::Direct => base.wrapping_add_signed(z.int()),
        AddressingMode::Indirect => base.wrapping_add(registers.general(z).uint()),
    }
}

/// Second arithmetic operand: the sign-extended Z byte or `$Z`
pub fn z_operand(registers: &RegisterFile, z: Byte, mode: AddressingMode) -> Octa {
    match mode {
        AddressingMode::Direct => Octa::from_i64(z.int()),
        AddressingMode::Indirect => registers.general(z),
    }
}
