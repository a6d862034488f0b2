//! # MMIX Opcode Definitions
//!
//! Opcodes are the first byte of an instruction word. Each instruction
//! comes as a pair: the even code takes Z as a register number, the odd
//! code (variant suffix `i`) takes Z as a direct operand.
//!
//! ## Implemented families
//! - 0x00: TRAP
//! - 0x20-0x25: ADD, LDA (same code as ADDU), SUB
//! - 0x80-0x93: Loads (LDB, LDBU, LDW, LDWU, LDT, LDTU, LDO, LDOU, LDHT)
//! - 0xA0-0xB3: Stores (STB, STBU, STW, STWU, STT, STTU, STO, STOU, STHT)
//!
//! Every other code decodes to `None`.

use crate::width::Width;
use serde::{Deserialize, Serialize};

/// How the Z field of an instruction is interpreted
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressingMode {
    /// Z is a signed immediate byte
    Direct,
    /// Z names a general-purpose register
    Indirect,
}

/// What an opcode does, independent of its addressing mode
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Stop the machine
    Trap,
    /// $X = $Y + Z, signed, overflow is an error
    Add,
    /// $X = $Y - Z, signed, overflow is an error
    Sub,
    /// $X = $Y + Z, modular (address arithmetic)
    LoadAddress,
    /// $X = M[$Y + Z], sign- or zero-extended
    Load { width: Width, signed: bool },
    /// $X = M4[$Y + Z] << 32
    LoadHighTetra,
    /// M[$Y + Z] = low-order bits of $X
    Store { width: Width, signed: bool },
    /// M4[$Y + Z] = $X >> 32
    StoreHighTetra,
}

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== System (0x00) ==========
    /// TRAP X,Y,Z
    Trap = 0x00,

    // ========== Arithmetic (0x20-0x25) ==========
    /// ADD: $X = $Y + $Z
    Add = 0x20,
    /// ADDI: $X = $Y + Z
    Addi = 0x21,
    /// LDA: $X = $Y + $Z (ADDU)
    Lda = 0x22,
    /// LDAI: $X = $Y + Z (ADDUI)
    Ldai = 0x23,
    /// SUB: $X = $Y - $Z
    Sub = 0x24,
    /// SUBI: $X = $Y - Z
    Subi = 0x25,

    // ========== Load (0x80-0x93) ==========
    /// LDB: $X = s(M1[$Y + $Z])
    Ldb = 0x80,
    Ldbi = 0x81,
    /// LDBU: $X = u(M1[$Y + $Z])
    Ldbu = 0x82,
    Ldbui = 0x83,
    /// LDW: $X = s(M2[$Y + $Z])
    Ldw = 0x84,
    Ldwi = 0x85,
    /// LDWU: $X = u(M2[$Y + $Z])
    Ldwu = 0x86,
    Ldwui = 0x87,
    /// LDT: $X = s(M4[$Y + $Z])
    Ldt = 0x88,
    Ldti = 0x89,
    /// LDTU: $X = u(M4[$Y + $Z])
    Ldtu = 0x8A,
    Ldtui = 0x8B,
    /// LDO: $X = M8[$Y + $Z]
    Ldo = 0x8C,
    Ldoi = 0x8D,
    /// LDOU: $X = M8[$Y + $Z]
    Ldou = 0x8E,
    Ldoui = 0x8F,
    /// LDHT: $X = M4[$Y + $Z] << 32
    Ldht = 0x92,
    Ldhti = 0x93,

    // ========== Store (0xA0-0xB3) ==========
    /// STB: M1[$Y + $Z] = $X
    Stb = 0xA0,
    Stbi = 0xA1,
    /// STBU: M1[$Y + $Z] = $X
    Stbu = 0xA2,
    Stbui = 0xA3,
    /// STW: M2[$Y + $Z] = $X
    Stw = 0xA4,
    Stwi = 0xA5,
    /// STWU: M2[$Y + $Z] = $X
    Stwu = 0xA6,
    Stwui = 0xA7,
    /// STT: M4[$Y + $Z] = $X
    Stt = 0xA8,
    Stti = 0xA9,
    /// STTU: M4[$Y + $Z] = $X
    Sttu = 0xAA,
    Sttui = 0xAB,
    /// STO: M8[$Y + $Z] = $X
    Sto = 0xAC,
    Stoi = 0xAD,
    /// STOU: M8[$Y + $Z] = $X
    Stou = 0xAE,
    Stoui = 0xAF,
    /// STHT: M4[$Y + $Z] = $X >> 32
    Stht = 0xB2,
    Sthti = 0xB3,
}

impl Opcode {
    /// Decode an opcode byte; `None` for codes outside the table
    pub fn from_u8(byte: u8) -> Option<Self> {
        use Opcode::*;
        Some(match byte {
            0x00 => Trap,
            0x20 => Add,
            0x21 => Addi,
            0x22 => Lda,
            0x23 => Ldai,
            0x24 => Sub,
            0x25 => Subi,
            0x80 => Ldb,
            0x81 => Ldbi,
            0x82 => Ldbu,
            0x83 => Ldbui,
            0x84 => Ldw,
            0x85 => Ldwi,
            0x86 => Ldwu,
            0x87 => Ldwui,
            0x88 => Ldt,
            0x89 => Ldti,
            0x8A => Ldtu,
            0x8B => Ldtui,
            0x8C => Ldo,
            0x8D => Ldoi,
            0x8E => Ldou,
            0x8F => Ldoui,
            0x92 => Ldht,
            0x93 => Ldhti,
            0xA0 => Stb,
            0xA1 => Stbi,
            0xA2 => Stbu,
            0xA3 => Stbui,
            0xA4 => Stw,
            0xA5 => Stwi,
            0xA6 => Stwu,
            0xA7 => Stwui,
            0xA8 => Stt,
            0xA9 => Stti,
            0xAA => Sttu,
            0xAB => Sttui,
            0xAC => Sto,
            0xAD => Stoi,
            0xAE => Stou,
            0xAF => Stoui,
            0xB2 => Stht,
            0xB3 => Sthti,
            _ => return None,
        })
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Whether Z is a direct operand. TRAP has no register operands.
    #[inline]
    pub fn addressing_mode(self) -> AddressingMode {
        if self != Opcode::Trap && self.to_u8() & 1 == 1 {
            AddressingMode::Direct
        } else {
            AddressingMode::Indirect
        }
    }

    pub fn operation(self) -> Operation {
        use Opcode::*;
        match self {
            Trap => Operation::Trap,
            Add | Addi => Operation::Add,
            Sub | Subi => Operation::Sub,
            Lda | Ldai => Operation::LoadAddress,
            Ldb | Ldbi => Operation::Load { width: Width::Byte, signed: true },
            Ldbu | Ldbui => Operation::Load { width: Width::Byte, signed: false },
            Ldw | Ldwi => Operation::Load { width: Width::Wyde, signed: true },
            Ldwu | Ldwui => Operation::Load { width: Width::Wyde, signed: false },
            Ldt | Ldti => Operation::Load { width: Width::Tetra, signed: true },
            Ldtu | Ldtui => Operation::Load { width: Width::Tetra, signed: false },
            Ldo | Ldoi => Operation::Load { width: Width::Octa, signed: true },
            Ldou | Ldoui => Operation::Load { width: Width::Octa, signed: false },
            Ldht | Ldhti => Operation::LoadHighTetra,
            Stb | Stbi => Operation::Store { width: Width::Byte, signed: true },
            Stbu | Stbui => Operation::Store { width: Width::Byte, signed: false },
            Stw | Stwi => Operation::Store { width: Width::Wyde, signed: true },
            Stwu | Stwui => Operation::Store { width: Width::Wyde, signed: false },
            Stt | Stti => Operation::Store { width: Width::Tetra, signed: true },
            Sttu | Sttui => Operation::Store { width: Width::Tetra, signed: false },
            Sto | Stoi => Operation::Store { width: Width::Octa, signed: true },
            Stou | Stoui => Operation::Store { width: Width::Octa, signed: false },
            Stht | Sthti => Operation::StoreHighTetra,
        }
    }

    /// Assembler mnemonic, shared by the register and direct forms
    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Trap => "TRAP",
            Add | Addi => "ADD",
            Lda | Ldai => "LDA",
            Sub | Subi => "SUB",
            Ldb | Ldbi => "LDB",
            Ldbu | Ldbui => "LDBU",
            Ldw | Ldwi => "LDW",
            Ldwu | Ldwui => "LDWU",
            Ldt | Ldti => "LDT",
            Ldtu | Ldtui => "LDTU",
            Ldo | Ldoi => "LDO",
            Ldou | Ldoui => "LDOU",
            Ldht | Ldhti => "LDHT",
            Stb | Stbi => "STB",
            Stbu | Stbui => "STBU",
            Stw | Stwi => "STW",
            Stwu | Stwui => "STWU",
            Stt | Stti => "STT",
            Sttu | Sttui => "STTU",
            Sto | Stoi => "STO",
            Stou | Stoui => "STOU",
            Stht | Sthti => "STHT",
        }
    }
}
