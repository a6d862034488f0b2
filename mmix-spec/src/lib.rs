//! # MMIX Core Types
//!
//! Bit-exact building blocks for a 64-bit MMIX machine.
//!
//! ## Key Features
//! - Fixed-width integers: Byte (8), Wyde (16), Tetra (32), Octa (64)
//! - Range-checked construction and overflow-checked signed arithmetic
//! - Big-endian byte slicing and splicing
//! - 256 general-purpose and 32 named special-purpose registers
//! - 32-bit instruction words: `[opcode][X][Y][Z]`

pub mod error;
pub mod value;
pub mod width;
pub mod register;
pub mod opcode;
pub mod instruction;

pub use error::{ErrorKind, MmixError, Result};
pub use value::{Byte, Numeric, Octa, Tetra, Wyde, BYTE_SIZE_IN_BIT};
pub use width::{Value, Width};
pub use register::{
    special_register_index, SpecialRegister, NUM_GENERAL_REGISTERS, NUM_SPECIAL_REGISTERS,
};
pub use opcode::{AddressingMode, Opcode, Operation};
pub use instruction::{Instruction, INSTRUCTION_SIZE};

/// Width of a memory address in bits
pub const ADDRESS_WIDTH_IN_BIT: u32 = 64;

/// Width of every register in bits
pub const REGISTER_WIDTH_IN_BIT: u32 = 64;
