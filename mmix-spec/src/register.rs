//! Register definitions for MMIX

use crate::error::{MmixError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of general-purpose registers ($0-$255)
pub const NUM_GENERAL_REGISTERS: usize = 256;

/// Number of special-purpose registers (rB-rZZ)
pub const NUM_SPECIAL_REGISTERS: usize = 32;

/// Special-purpose register, numbered by its MMIX code
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpecialRegister {
    RB = 0,   // bootstrap register (trip)
    RD = 1,   // dividend register
    RE = 2,   // epsilon register
    RH = 3,   // himult register
    RJ = 4,   // return-jump register
    RM = 5,   // multiplex mask register
    RR = 6,   // remainder register
    RBB = 7,  // bootstrap register (trap)
    RC = 8,   // cycle counter
    RN = 9,   // serial number
    RO = 10,  // register stack offset
    RS = 11,  // register stack pointer
    RI = 12,  // interval counter
    RT = 13,  // trap address register
    RTT = 14, // dynamic trap address register
    RK = 15,  // interrupt mask register
    RQ = 16,  // interrupt request register
    RU = 17,  // usage counter
    RV = 18,  // virtual translation register
    RG = 19,  // global threshold register
    RL = 20,  // local threshold register
    RA = 21,  // arithmetic status register
    RF = 22,  // failure location register
    RP = 23,  // prediction register
    RW = 24,  // where-interrupted register (trip)
    RX = 25,  // execution register (trip)
    RY = 26,  // Y operand (trip)
    RZ = 27,  // Z operand (trip)
    RWW = 28, // where-interrupted register (trap)
    RXX = 29, // execution register (trap)
    RYY = 30, // Y operand (trap)
    RZZ = 31, // Z operand (trap)
}

impl SpecialRegister {
    /// All special registers in code order
    pub const ALL: [SpecialRegister; NUM_SPECIAL_REGISTERS] = [
        Self::RB,
        Self::RD,
        Self::RE,
        Self::RH,
        Self::RJ,
        Self::RM,
        Self::RR,
        Self::RBB,
        Self::RC,
        Self::RN,
        Self::RO,
        Self::RS,
        Self::RI,
        Self::RT,
        Self::RTT,
        Self::RK,
        Self::RQ,
        Self::RU,
        Self::RV,
        Self::RG,
        Self::RL,
        Self::RA,
        Self::RF,
        Self::RP,
        Self::RW,
        Self::RX,
        Self::RY,
        Self::RZ,
        Self::RWW,
        Self::RXX,
        Self::RYY,
        Self::RZZ,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a register up by its symbolic name, e.g. `"rA"`
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|register| register.name() == name)
            .ok_or_else(|| MmixError::UnknownSpecialRegister(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RB => "rB",
            Self::RD => "rD",
            Self::RE => "rE",
            Self::RH => "rH",
            Self::RJ => "rJ",
            Self::RM => "rM",
            Self::RR => "rR",
            Self::RBB => "rBB",
            Self::RC => "rC",
            Self::RN => "rN",
            Self::RO => "rO",
            Self::RS => "rS",
            Self::RI => "rI",
            Self::RT => "rT",
            Self::RTT => "rTT",
            Self::RK => "rK",
            Self::RQ => "rQ",
            Self::RU => "rU",
            Self::RV => "rV",
            Self::RG => "rG",
            Self::RL => "rL",
            Self::RA => "rA",
            Self::RF => "rF",
            Self::RP => "rP",
            Self::RW => "rW",
            Self::RX => "rX",
            Self::RY => "rY",
            Self::RZ => "rZ",
            Self::RWW => "rWW",
            Self::RXX => "rXX",
            Self::RYY => "rYY",
            Self::RZZ => "rZZ",
        }
    }
}

impl fmt::Display for SpecialRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Index of a special-purpose register by name
pub fn special_register_index(name: &str) -> Result<usize> {
    SpecialRegister::from_name(name).map(SpecialRegister::index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_all_in_code_order() {
        assert_eq!(SpecialRegister::ALL.len(), NUM_SPECIAL_REGISTERS);
        for (i, register) in SpecialRegister::ALL.iter().enumerate() {
            assert_eq!(register.index(), i);
            assert_eq!(SpecialRegister::from_index(i), Some(*register));
        }
        assert_eq!(SpecialRegister::from_index(NUM_SPECIAL_REGISTERS), None);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(special_register_index("rB").unwrap(), 0);
        assert_eq!(special_register_index("rBB").unwrap(), 7);
        assert_eq!(special_register_index("rA").unwrap(), 21);
        assert_eq!(special_register_index("rZZ").unwrap(), 31);
        assert_eq!(SpecialRegister::from_name("rL").unwrap(), SpecialRegister::RL);
    }

    #[test]
    fn test_names_roundtrip() {
        for register in SpecialRegister::ALL {
            assert_eq!(SpecialRegister::from_name(register.name()).unwrap(), register);
            assert_eq!(register.to_string(), register.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = special_register_index("rQQ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);
        // names are case sensitive
        assert!(special_register_index("ra").is_err());
    }
}
