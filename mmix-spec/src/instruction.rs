//! MMIX Instruction Words
//!
//! Every instruction is one Tetra, most significant byte first:
//!
//! ```text
//! [opcode:8][X:8][Y:8][Z:8]
//! ```
//!
//! X, Y and Z are plain Bytes. Whether Z names a register or is a direct
//! operand depends on the opcode.

use crate::error::Result;
use crate::opcode::{AddressingMode, Opcode};
use crate::value::{Byte, Tetra};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset of each field within the instruction Tetra
pub const OPCODE_BYTE: usize = 0;
pub const X_BYTE: usize = 1;
pub const Y_BYTE: usize = 2;
pub const Z_BYTE: usize = 3;

/// Size of one instruction in bytes
pub const INSTRUCTION_SIZE: u64 = 4;

/// One decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Byte,
    pub x: Byte,
    pub y: Byte,
    pub z: Byte,
}

impl Instruction {
    pub fn new(opcode: Opcode, x: u8, y: u8, z: u8) -> Self {
        Self {
            opcode: Byte::from(opcode.to_u8()),
            x: Byte::from(x),
            y: Byte::from(y),
            z: Byte::from(z),
        }
    }

    /// Split an instruction word into its four fields
    pub fn decode(word: Tetra) -> Result<Self> {
        Ok(Self {
            opcode: word.byte_at(OPCODE_BYTE)?,
            x: word.byte_at(X_BYTE)?,
            y: word.byte_at(Y_BYTE)?,
            z: word.byte_at(Z_BYTE)?,
        })
    }

    /// Assemble the four fields into an instruction word
    pub fn encode(&self) -> Result<Tetra> {
        Tetra::zero()
            .with_byte(OPCODE_BYTE, self.opcode)?
            .with_byte(X_BYTE, self.x)?
            .with_byte(Y_BYTE, self.y)?
            .with_byte(Z_BYTE, self.z)
    }

    /// Known opcode, if any
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode.as_u8())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(opcode) = self.opcode() else {
            return write!(
                f,
                "TETRA #{}{}{}{}",
                self.opcode.to_hex(),
                self.x.to_hex(),
                self.y.to_hex(),
                self.z.to_hex()
            );
        };
        if opcode == Opcode::Trap {
            return write!(f, "TRAP {},{},{}", self.x.as_u8(), self.y.as_u8(), self.z.as_u8());
        }
        match opcode.addressing_mode() {
            AddressingMode::Indirect => write!(
                f,
                "{} ${},${},${}",
                opcode.mnemonic(),
                self.x.as_u8(),
                self.y.as_u8(),
                self.z.as_u8()
            ),
            // the direct operand is signed, as the machine reads it
            AddressingMode::Direct => write!(
                f,
                "{} ${},${},{}",
                opcode.mnemonic(),
                self.x.as_u8(),
                self.y.as_u8(),
                self.z.int()
            ),
        }
    }
}
