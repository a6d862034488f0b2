//! # Fixed-Width Integer Values
//!
//! Every MMIX quantity is a bit pattern of exactly 8, 16, 32 or 64 bits.
//! All four widths share one engine, [`Numeric`], parameterized by the
//! number of bytes:
//!
//! ```ignore
//! type Byte  = Numeric<1>;  //  8 bits
//! type Wyde  = Numeric<2>;  // 16 bits
//! type Tetra = Numeric<4>;  // 32 bits
//! type Octa  = Numeric<8>;  // 64 bits
//! ```
//!
//! ## Conventions
//!
//! - Construction is range checked against the chosen view: `from_int`
//!   accepts `[-2^(N-1), 2^(N-1) - 1]`, `from_uint` accepts `[0, 2^N - 1]`.
//! - `checked_add` / `checked_sub` work on the signed view and report
//!   overflow instead of wrapping.
//! - Bytes are numbered from the most significant end: byte 0 is the top
//!   byte. `slice` and `splice` address spans the same way, which is what
//!   makes memory composition big-endian.

use crate::error::{MmixError, Result};
use crate::width::Width;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl};

/// Bits per byte
pub const BYTE_SIZE_IN_BIT: u32 = 8;

/// Fixed-width integer of `BYTES` bytes.
///
/// The canonical bit pattern is kept in the low `8 * BYTES` bits of a `u64`;
/// the bits above are always zero. Only 1, 2, 4 and 8 byte widths exist;
/// any other `BYTES` is rejected when the type is used:
///
/// ```compile_fail
/// let _ = mmix_spec::Numeric::<3>::zero();
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Numeric<const BYTES: usize> {
    bits: u64,
}

/// 8-bit value
pub type Byte = Numeric<1>;

/// 16-bit value
pub type Wyde = Numeric<2>;

/// 32-bit value
pub type Tetra = Numeric<4>;

/// 64-bit value
pub type Octa = Numeric<8>;

impl<const BYTES: usize> Default for Numeric<BYTES> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const BYTES: usize> Numeric<BYTES> {
    /// Evaluated by every constructor; fails the build for unsupported widths
    const VALID: () = assert!(
        matches!(BYTES, 1 | 2 | 4 | 8),
        "Numeric width must be 1, 2, 4 or 8 bytes"
    );

    /// Size in bytes
    pub const SIZE_IN_BYTE: usize = BYTES;

    /// Size in bits
    pub const SIZE_IN_BIT: u32 = BYTES as u32 * BYTE_SIZE_IN_BIT;

    /// All ones for this width
    pub const MASK: u64 = if BYTES >= 8 {
        u64::MAX
    } else {
        (1u64 << (BYTES as u32 * BYTE_SIZE_IN_BIT)) - 1
    };

    /// Smallest value of the signed view
    pub const MIN_INT: i128 = -(1i128 << (Self::SIZE_IN_BIT - 1));

    /// Largest value of the signed view
    pub const MAX_INT: i128 = (1i128 << (Self::SIZE_IN_BIT - 1)) - 1;

    /// Largest value of the unsigned view
    pub const MAX_UINT: u128 = (1u128 << Self::SIZE_IN_BIT) - 1;

    /// Width tag for this type
    pub const WIDTH: Width = match BYTES {
        1 => Width::Byte,
        2 => Width::Wyde,
        4 => Width::Tetra,
        _ => Width::Octa,
    };

    /// The zero value
    #[inline]
    pub const fn zero() -> Self {
        let () = Self::VALID;
        Self { bits: 0 }
    }

    /// Wrap a bit pattern already known to fit this width
    #[inline]
    pub(crate) fn from_bits(bits: u64) -> Self {
        let () = Self::VALID;
        debug_assert_eq!(bits & !Self::MASK, 0, "bit pattern wider than {} bits", Self::SIZE_IN_BIT);
        Self { bits }
    }

    /// Create from the signed view
    pub fn from_int(value: i128) -> Result<Self> {
        if value < Self::MIN_INT || value > Self::MAX_INT {
            return Err(MmixError::SignedOutOfRange {
                value,
                bits: Self::SIZE_IN_BIT,
            });
        }
        // two's complement truncation of an in-range value
        Ok(Self::from_bits(value as u64 & Self::MASK))
    }

    /// Create from the unsigned view
    pub fn from_uint(value: u128) -> Result<Self> {
        if value > Self::MAX_UINT {
            return Err(MmixError::UnsignedOutOfRange {
                value,
                bits: Self::SIZE_IN_BIT,
            });
        }
        Ok(Self::from_bits(value as u64))
    }

    /// Signed view of the bit pattern
    #[inline]
    pub fn int(self) -> i64 {
        let shift = 64 - Self::SIZE_IN_BIT;
        ((self.bits << shift) as i64) >> shift
    }

    /// Unsigned view of the bit pattern
    #[inline]
    pub fn uint(self) -> u64 {
        self.bits
    }

    #[inline]
    pub fn width(self) -> Width {
        Self::WIDTH
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.bits == 0
    }

    /// Signed addition; fails instead of wrapping
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        let sum = self.int() as i128 + rhs.int() as i128;
        Self::from_int(sum).map_err(|_| MmixError::Overflow {
            op: '+',
            lhs: self.int(),
            rhs: rhs.int(),
            bits: Self::SIZE_IN_BIT,
        })
    }

    /// Signed subtraction; fails instead of wrapping
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        let difference = self.int() as i128 - rhs.int() as i128;
        Self::from_int(difference).map_err(|_| MmixError::Overflow {
            op: '-',
            lhs: self.int(),
            rhs: rhs.int(),
            bits: Self::SIZE_IN_BIT,
        })
    }

    /// Compare bit patterns with a value of possibly different width.
    ///
    /// Values of different widths are never comparable.
    pub fn try_eq<const OTHER: usize>(self, other: Numeric<OTHER>) -> Result<bool> {
        if BYTES != OTHER {
            return Err(MmixError::WidthMismatch {
                left: Self::SIZE_IN_BIT,
                right: Numeric::<OTHER>::SIZE_IN_BIT,
            });
        }
        Ok(self.bits == other.bits)
    }

    /// Logical left shift; bits pushed past the top are dropped
    #[inline]
    pub fn shift_left(self, amount: u32) -> Self {
        if amount >= Self::SIZE_IN_BIT {
            return Self::zero();
        }
        Self::from_bits((self.bits << amount) & Self::MASK)
    }

    /// Byte at `index`, counted from the most significant byte
    pub fn byte_at(self, index: usize) -> Result<Byte> {
        Self::check_index(index)?;
        self.slice::<1>(index)
    }

    /// Copy of this value with the byte at `index` replaced
    pub fn with_byte(self, index: usize, byte: Byte) -> Result<Self> {
        Self::check_index(index)?;
        self.splice(index, byte)
    }

    /// Extract `SPAN` contiguous bytes starting at byte `offset`
    pub fn slice<const SPAN: usize>(self, offset: usize) -> Result<Numeric<SPAN>> {
        let (mask, shift) = Self::span_mask(offset, SPAN)?;
        let bits = (self.bits as u128 & mask) >> shift;
        Ok(Numeric::<SPAN>::from_bits(bits as u64))
    }

    /// Copy of this value with `value`'s bytes written at byte `offset`
    pub fn splice<const SPAN: usize>(self, offset: usize, value: Numeric<SPAN>) -> Result<Self> {
        let (mask, shift) = Self::span_mask(offset, SPAN)?;
        let bits = (self.bits as u128 & !mask) | ((value.bits as u128) << shift);
        Ok(Self::from_bits(bits as u64))
    }

    /// Iterate over the bytes, most significant first
    pub fn bytes(self) -> impl Iterator<Item = Byte> {
        (0..BYTES).map(move |index| {
            let shift = (BYTES - 1 - index) as u32 * BYTE_SIZE_IN_BIT;
            Byte::from_bits((self.bits >> shift) & 0xFF)
        })
    }

    /// Zero-padded hex digits, `2 * BYTES` characters, no prefix
    pub fn to_hex(self) -> String {
        format!("{:0width$x}", self.bits, width = BYTES * 2)
    }

    /// Zero-padded binary digits, `8 * BYTES` characters, no prefix
    pub fn to_binary(self) -> String {
        format!("{:0width$b}", self.bits, width = BYTES * 8)
    }

    fn check_index(index: usize) -> Result<()> {
        if index >= BYTES {
            return Err(MmixError::ByteIndexOutOfRange {
                index,
                bytes: BYTES,
            });
        }
        Ok(())
    }

    /// Mask and shift selecting `span` bytes at `offset`, MSB first:
    /// `mask = (2^(8*span) - 1) << shift`, `shift = (BYTES - offset - span) * 8`.
    fn span_mask(offset: usize, span: usize) -> Result<(u128, u32)> {
        let end = offset.checked_add(span);
        if span == 0 || end.map_or(true, |end| end > BYTES) {
            return Err(MmixError::SpanOutOfRange {
                offset,
                len: span,
                bytes: BYTES,
            });
        }
        let shift = (BYTES - offset - span) as u32 * BYTE_SIZE_IN_BIT;
        let mask = ((1u128 << (span as u32 * BYTE_SIZE_IN_BIT)) - 1) << shift;
        Ok((mask, shift))
    }
}

impl Byte {
    #[inline]
    pub fn as_u8(self) -> u8 {
        self.bits as u8
    }

    #[inline]
    pub fn as_i8(self) -> i8 {
        self.bits as u8 as i8
    }
}

impl Octa {
    /// Every `u64` is a valid Octa
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self::from_bits(value)
    }

    /// Every `i64` is a valid Octa
    #[inline]
    pub fn from_i64(value: i64) -> Self {
        Self::from_bits(value as u64)
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Self::from_bits(value as u64)
    }
}

impl From<u16> for Wyde {
    fn from(value: u16) -> Self {
        Self::from_bits(value as u64)
    }
}

impl From<u32> for Tetra {
    fn from(value: u32) -> Self {
        Self::from_bits(value as u64)
    }
}

impl<const BYTES: usize> TryFrom<u64> for Numeric<BYTES> {
    type Error = MmixError;

    fn try_from(value: u64) -> Result<Self> {
        Self::from_uint(value as u128)
    }
}

impl<const BYTES: usize> From<Numeric<BYTES>> for u64 {
    fn from(value: Numeric<BYTES>) -> Self {
        value.bits
    }
}

impl<const BYTES: usize> BitAnd for Numeric<BYTES> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_bits(self.bits & rhs.bits)
    }
}

impl<const BYTES: usize> BitOr for Numeric<BYTES> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl<const BYTES: usize> BitXor for Numeric<BYTES> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits ^ rhs.bits)
    }
}

impl<const BYTES: usize> Not for Numeric<BYTES> {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(!self.bits & Self::MASK)
    }
}

impl<const BYTES: usize> Shl<u32> for Numeric<BYTES> {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        self.shift_left(amount)
    }
}

impl<const BYTES: usize> fmt::Display for Numeric<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl<const BYTES: usize> fmt::Debug for Numeric<BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{})", Self::WIDTH.name(), self.to_hex())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_octa() -> impl Strategy<Value = Octa> {
        any::<u64>().prop_map(Octa::from_u64)
    }

    fn arb_tetra() -> impl Strategy<Value = Tetra> {
        any::<u32>().prop_map(Tetra::from)
    }

    proptest! {
        #[test]
        fn test_int_roundtrip_byte(v in i8::MIN as i128..=i8::MAX as i128) {
            let x = Byte::from_int(v).unwrap();
            prop_assert_eq!(x.int() as i128, v);
            prop_assert_eq!(Byte::from_uint(x.uint() as u128).unwrap(), x);
        }

        #[test]
        fn test_int_roundtrip_wyde(v in i16::MIN as i128..=i16::MAX as i128) {
            let x = Wyde::from_int(v).unwrap();
            prop_assert_eq!(x.int() as i128, v);
            prop_assert_eq!(Wyde::from_uint(x.uint() as u128).unwrap(), x);
        }

        #[test]
        fn test_int_roundtrip_tetra(v in i32::MIN as i128..=i32::MAX as i128) {
            let x = Tetra::from_int(v).unwrap();
            prop_assert_eq!(x.int() as i128, v);
            prop_assert_eq!(Tetra::from_uint(x.uint() as u128).unwrap(), x);
        }

        #[test]
        fn test_int_roundtrip_octa(v in any::<i64>()) {
            let x = Octa::from_int(v as i128).unwrap();
            prop_assert_eq!(x.int(), v);
            prop_assert_eq!(x.uint(), v as u64);
        }

        #[test]
        fn test_slice_splice_identity(x in arb_octa(), offset in 0usize..=4) {
            let part: Tetra = x.slice::<4>(offset).unwrap();
            prop_assert_eq!(x.splice(offset, part).unwrap(), x);
        }

        #[test]
        fn test_byte_splice_identity(x in arb_tetra(), index in 0usize..4) {
            let byte = x.byte_at(index).unwrap();
            prop_assert_eq!(x.with_byte(index, byte).unwrap(), x);
        }

        #[test]
        fn test_add_sub_inverse(a in any::<i32>(), b in any::<i32>()) {
            let x = Octa::from_i64(a as i64);
            let y = Octa::from_i64(b as i64);
            let sum = x.checked_add(y).unwrap();
            prop_assert_eq!(sum.checked_sub(y).unwrap(), x);
        }

        #[test]
        fn test_hex_matches_uint(x in arb_octa()) {
            prop_assert_eq!(u64::from_str_radix(&x.to_hex(), 16).unwrap(), x.uint());
            prop_assert_eq!(x.to_binary().len(), 64);
        }
    }
}
