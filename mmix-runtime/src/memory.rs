//! Memory subsystem
//!
//! MMIX memory is a function from a 64-bit address to a Byte. Only bytes
//! that have been written are stored; every other address reads as zero.
//! Multi-byte values are composed big-endian: the byte at the lowest
//! address is the most significant.

use std::collections::HashMap;

use mmix_spec::{Byte, MmixError, Numeric, Octa, Result, Tetra, Value, Width, Wyde};

/// Line marking a run of unwritten memory in a dump
pub const ELLIPSIS: &str = "...";

/// Sparse byte-addressable memory
#[derive(Debug, Clone, Default)]
pub struct Memory {
    data: HashMap<u64, Byte>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `bytes` bytes starting at `address` stay below 2^64
    fn check_span(address: u64, bytes: usize) -> Result<()> {
        match address.checked_add(bytes as u64 - 1) {
            Some(_) => Ok(()),
            None => Err(MmixError::AddressOutOfRange { address, bytes }),
        }
    }

    #[inline]
    fn byte(&self, address: u64) -> Byte {
        self.data.get(&address).copied().unwrap_or_default()
    }

    /// Assemble a value without the boundary check
    fn compose<const BYTES: usize>(&self, address: u64) -> Result<Numeric<BYTES>> {
        let mut result = Numeric::<BYTES>::zero();
        for offset in 0..BYTES {
            result = result.with_byte(offset, self.byte(address.wrapping_add(offset as u64)))?;
        }
        Ok(result)
    }

    /// Read `BYTES` bytes starting at `address`, most significant first
    pub fn read<const BYTES: usize>(&self, address: u64) -> Result<Numeric<BYTES>> {
        Self::check_span(address, BYTES)?;
        self.compose(address)
    }

    /// Store `value` byte by byte starting at `address`
    pub fn write<const BYTES: usize>(&mut self, address: u64, value: Numeric<BYTES>) -> Result<()> {
        Self::check_span(address, BYTES)?;
        for (offset, byte) in value.bytes().enumerate() {
            self.data.insert(address + offset as u64, byte);
        }
        Ok(())
    }

    pub fn read_byte(&self, address: u64) -> Result<Byte> {
        self.read(address)
    }

    pub fn read_wyde(&self, address: u64) -> Result<Wyde> {
        self.read(address)
    }

    pub fn read_tetra(&self, address: u64) -> Result<Tetra> {
        self.read(address)
    }

    pub fn read_octa(&self, address: u64) -> Result<Octa> {
        self.read(address)
    }

    pub fn write_byte(&mut self, address: u64, value: Byte) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_wyde(&mut self, address: u64, value: Wyde) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_tetra(&mut self, address: u64, value: Tetra) -> Result<()> {
        self.write(address, value)
    }

    pub fn write_octa(&mut self, address: u64, value: Octa) -> Result<()> {
        self.write(address, value)
    }

    /// Read with a width chosen at run time
    pub fn read_value(&self, address: u64, width: Width) -> Result<Value> {
        Ok(match width {
            Width::Byte => Value::Byte(self.read(address)?),
            Width::Wyde => Value::Wyde(self.read(address)?),
            Width::Tetra => Value::Tetra(self.read(address)?),
            Width::Octa => Value::Octa(self.read(address)?),
        })
    }

    /// Write a value of any width
    pub fn write_value(&mut self, address: u64, value: Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.write(address, v),
            Value::Wyde(v) => self.write(address, v),
            Value::Tetra(v) => self.write(address, v),
            Value::Octa(v) => self.write(address, v),
        }
    }

    /// Whether the byte at `address` was ever written
    pub fn is_written(&self, address: u64) -> bool {
        self.data.contains_key(&address)
    }

    /// Number of written bytes
    pub fn written_len(&self) -> usize {
        self.data.len()
    }

    /// Text listing of written memory at `width` granularity.
    ///
    /// One `0x<address>:\t0x<value>` line per aligned slot that contains a
    /// written byte, with `...` standing for every run of unwritten slots,
    /// including the runs before the first and after the last listed slot.
    pub fn dump(&self, width: Width) -> Result<String> {
        let granularity = width.bytes() as u64;
        let mut slots: Vec<u64> = self
            .data
            .keys()
            .map(|address| address - address % granularity)
            .collect();
        slots.sort_unstable();
        slots.dedup();

        let mut result = String::new();
        let mut previous: Option<u64> = None;
        for slot in slots {
            let contiguous = match previous {
                None => slot == 0,
                Some(previous) => previous.checked_add(granularity) == Some(slot),
            };
            if !contiguous {
                result.push_str(ELLIPSIS);
                result.push('\n');
            }
            let value = self.read_value(slot, width)?;
            result.push_str(&format!("0x{}:\t0x{}\n", Octa::from_u64(slot).to_hex(), value.to_hex()));
            previous = Some(slot);
        }

        let last_slot = u64::MAX - (granularity - 1);
        if previous != Some(last_slot) {
            result.push_str(ELLIPSIS);
            result.push('\n');
        }
        Ok(result)
    }
}
