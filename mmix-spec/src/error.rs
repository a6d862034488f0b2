//! # Error Types for MMIX core values

use thiserror::Error;

/// Broad classification of a [`MmixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value or byte span does not fit the requested width
    Range,
    /// Signed arithmetic left the representable range
    Overflow,
    /// Two values of different widths were combined
    WidthMismatch,
    /// Byte index outside a value
    Index,
    /// Memory access crosses the top of the 64-bit address space
    AddressRange,
    /// Unknown special-purpose register name
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MmixError {
    // Construction errors
    #[error("Signed value {value} does not fit in {bits} bits")]
    SignedOutOfRange { value: i128, bits: u32 },

    #[error("Unsigned value {value} does not fit in {bits} bits")]
    UnsignedOutOfRange { value: u128, bits: u32 },

    #[error("Byte span [{offset}, {offset}+{len}) exceeds a {bytes}-byte value")]
    SpanOutOfRange { offset: usize, len: usize, bytes: usize },

    // Arithmetic errors
    #[error("Overflow: {lhs} {op} {rhs} does not fit in {bits} signed bits")]
    Overflow {
        op: char,
        lhs: i64,
        rhs: i64,
        bits: u32,
    },

    #[error("Width mismatch: {left}-bit value vs {right}-bit value")]
    WidthMismatch { left: u32, right: u32 },

    #[error("Byte index {index} out of range for a {bytes}-byte value")]
    ByteIndexOutOfRange { index: usize, bytes: usize },

    // Memory errors
    #[error("Memory access at {address:#018x} of {bytes} bytes crosses the end of the address space")]
    AddressOutOfRange { address: u64, bytes: usize },

    // Register errors
    #[error("Special purpose register {0} is not defined")]
    UnknownSpecialRegister(String),
}

impl MmixError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MmixError::SignedOutOfRange { .. }
            | MmixError::UnsignedOutOfRange { .. }
            | MmixError::SpanOutOfRange { .. } => ErrorKind::Range,
            MmixError::Overflow { .. } => ErrorKind::Overflow,
            MmixError::WidthMismatch { .. } => ErrorKind::WidthMismatch,
            MmixError::ByteIndexOutOfRange { .. } => ErrorKind::Index,
            MmixError::AddressOutOfRange { .. } => ErrorKind::AddressRange,
            MmixError::UnknownSpecialRegister(_) => ErrorKind::Name,
        }
    }
}

pub type Result<T> = std::result::Result<T, MmixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MmixError::SignedOutOfRange { value: 128, bits: 8 };
        assert_eq!(err.to_string(), "Signed value 128 does not fit in 8 bits");

        let err = MmixError::AddressOutOfRange {
            address: u64::MAX,
            bytes: 2,
        };
        assert_eq!(
            err.to_string(),
            "Memory access at 0xffffffffffffffff of 2 bytes crosses the end of the address space"
        );

        let err = MmixError::UnknownSpecialRegister("rQQ".to_string());
        assert_eq!(err.to_string(), "Special purpose register rQQ is not defined");
    }

    #[test]
    fn test_overflow_display() {
        let err = MmixError::Overflow {
            op: '+',
            lhs: 127,
            rhs: 1,
            bits: 8,
        };
        assert_eq!(err.to_string(), "Overflow: 127 + 1 does not fit in 8 signed bits");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            MmixError::UnsignedOutOfRange { value: 256, bits: 8 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(
            MmixError::SpanOutOfRange { offset: 3, len: 2, bytes: 4 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(
            MmixError::WidthMismatch { left: 8, right: 16 }.kind(),
            ErrorKind::WidthMismatch
        );
        assert_eq!(
            MmixError::ByteIndexOutOfRange { index: 1, bytes: 1 }.kind(),
            ErrorKind::Index
        );
        assert_eq!(
            MmixError::AddressOutOfRange { address: 0, bytes: 8 }.kind(),
            ErrorKind::AddressRange
        );
        assert_eq!(
            MmixError::UnknownSpecialRegister(String::new()).kind(),
            ErrorKind::Name
        );
    }
}
