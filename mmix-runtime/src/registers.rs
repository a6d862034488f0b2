//! Register file: 256 general-purpose and 32 special-purpose Octas

use mmix_spec::{
    Byte, Octa, Result, SpecialRegister, NUM_GENERAL_REGISTERS, NUM_SPECIAL_REGISTERS,
};

/// All machine registers, zero at power-on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    general: [Octa; NUM_GENERAL_REGISTERS],
    special: [Octa; NUM_SPECIAL_REGISTERS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            general: [Octa::zero(); NUM_GENERAL_REGISTERS],
            special: [Octa::zero(); NUM_SPECIAL_REGISTERS],
        }
    }

    /// General register `$index`
    #[inline]
    pub fn general(&self, index: Byte) -> Octa {
        self.general[index.as_u8() as usize]
    }

    #[inline]
    pub fn set_general(&mut self, index: Byte, value: Octa) {
        self.general[index.as_u8() as usize] = value;
    }

    #[inline]
    pub fn special(&self, register: SpecialRegister) -> Octa {
        self.special[register.index()]
    }

    #[inline]
    pub fn set_special(&mut self, register: SpecialRegister, value: Octa) {
        self.special[register.index()] = value;
    }

    /// Special register looked up by its name, e.g. `"rJ"`
    pub fn special_by_name(&self, name: &str) -> Result<Octa> {
        Ok(self.special(SpecialRegister::from_name(name)?))
    }

    pub fn set_special_by_name(&mut self, name: &str, value: Octa) -> Result<()> {
        self.set_special(SpecialRegister::from_name(name)?, value);
        Ok(())
    }

    /// General registers as an ordered slice
    pub fn general_registers(&self) -> &[Octa] {
        &self.general
    }

    /// One `0x<index>:\t0x<value>` line per general register
    pub fn dump_general(&self) -> String {
        self.general
            .iter()
            .enumerate()
            .map(|(index, value)| format!("0x{:x}:\t0x{}\n", index, value.to_hex()))
            .collect()
    }

    /// One `<name>:\t0x<value>` line per special register, in code order
    pub fn dump_special(&self) -> String {
        SpecialRegister::ALL
            .iter()
            .map(|register| format!("{}:\t0x{}\n", register.name(), self.special(*register).to_hex()))
            .collect()
    }
}
