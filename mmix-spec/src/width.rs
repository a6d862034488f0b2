//! Access widths and the width-erased [`Value`]

use crate::error::{MmixError, Result};
use crate::value::{Byte, Numeric, Octa, Tetra, Wyde};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four MMIX data widths
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Width {
    Byte,
    Wyde,
    Tetra,
    Octa,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Byte, Width::Wyde, Width::Tetra, Width::Octa];

    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Wyde => 2,
            Width::Tetra => 4,
            Width::Octa => 8,
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Digits in the zero-padded hex form
    #[inline]
    pub const fn hex_digits(self) -> usize {
        self.bytes() * 2
    }

    pub const fn name(self) -> &'static str {
        match self {
            Width::Byte => "Byte",
            Width::Wyde => "Wyde",
            Width::Tetra => "Tetra",
            Width::Octa => "Octa",
        }
    }

    pub fn from_bytes(bytes: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|width| width.bytes() == bytes)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fixed-width value whose width is only known at run time.
///
/// Used wherever the width comes from an opcode or a caller argument
/// rather than from the type system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Byte(Byte),
    Wyde(Wyde),
    Tetra(Tetra),
    Octa(Octa),
}

macro_rules! with_value {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Value::Byte($inner) => $body,
            Value::Wyde($inner) => $body,
            Value::Tetra($inner) => $body,
            Value::Octa($inner) => $body,
        }
    };
}

impl Value {
    pub fn zero(width: Width) -> Self {
        match width {
            Width::Byte => Value::Byte(Byte::zero()),
            Width::Wyde => Value::Wyde(Wyde::zero()),
            Width::Tetra => Value::Tetra(Tetra::zero()),
            Width::Octa => Value::Octa(Octa::zero()),
        }
    }

    pub fn from_int(width: Width, value: i128) -> Result<Self> {
        Ok(match width {
            Width::Byte => Value::Byte(Byte::from_int(value)?),
            Width::Wyde => Value::Wyde(Wyde::from_int(value)?),
            Width::Tetra => Value::Tetra(Tetra::from_int(value)?),
            Width::Octa => Value::Octa(Octa::from_int(value)?),
        })
    }

    pub fn from_uint(width: Width, value: u128) -> Result<Self> {
        Ok(match width {
            Width::Byte => Value::Byte(Byte::from_uint(value)?),
            Width::Wyde => Value::Wyde(Wyde::from_uint(value)?),
            Width::Tetra => Value::Tetra(Tetra::from_uint(value)?),
            Width::Octa => Value::Octa(Octa::from_uint(value)?),
        })
    }

    pub fn width(&self) -> Width {
        with_value!(self, v => v.width())
    }

    pub fn int(&self) -> i64 {
        with_value!(self, v => v.int())
    }

    pub fn uint(&self) -> u64 {
        with_value!(self, v => v.uint())
    }

    pub fn to_hex(&self) -> String {
        with_value!(self, v => v.to_hex())
    }

    pub fn to_binary(&self) -> String {
        with_value!(self, v => v.to_binary())
    }

    pub fn byte_at(&self, index: usize) -> Result<Byte> {
        with_value!(self, v => v.byte_at(index))
    }

    pub fn with_byte(self, index: usize, byte: Byte) -> Result<Self> {
        Ok(with_value!(self, v => v.with_byte(index, byte)?.into()))
    }

    /// Bit-pattern equality; widths must agree
    pub fn try_eq(&self, other: &Value) -> Result<bool> {
        if self.width() != other.width() {
            return Err(MmixError::WidthMismatch {
                left: self.width().bits(),
                right: other.width().bits(),
            });
        }
        Ok(self.uint() == other.uint())
    }

    /// Low-order `width` bits of an Octa
    pub fn truncate(octa: Octa, width: Width) -> Self {
        match width {
            Width::Byte => Value::Byte(low_part(octa)),
            Width::Wyde => Value::Wyde(low_part(octa)),
            Width::Tetra => Value::Tetra(low_part(octa)),
            Width::Octa => Value::Octa(octa),
        }
    }
}

fn low_part<const BYTES: usize>(octa: Octa) -> Numeric<BYTES> {
    Numeric::from_bits(octa.uint() & Numeric::<BYTES>::MASK)
}

impl From<Byte> for Value {
    fn from(v: Byte) -> Self {
        Value::Byte(v)
    }
}

impl From<Wyde> for Value {
    fn from(v: Wyde) -> Self {
        Value::Wyde(v)
    }
}

impl From<Tetra> for Value {
    fn from(v: Tetra) -> Self {
        Value::Tetra(v)
    }
}

impl From<Octa> for Value {
    fn from(v: Octa) -> Self {
        Value::Octa(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_value!(self, v => write!(f, "{}", v))
    }
}
