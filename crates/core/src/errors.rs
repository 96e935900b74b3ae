//! Error types for packed-digit conversion and buffer construction
//!
//! Every fallible operation returns one of these enums by value; callers decide
//! whether a malformed chunk is fatal or skippable.

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// Byte-to-integer conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("non-decimal character found in input")]
    NonDecimal,

    #[error("input length {len} exceeds {max} bytes")]
    LengthExceeded { len: usize, max: usize },

    #[error("cannot parse integer from empty input")]
    Empty,

    #[error("integer overflow")]
    Overflow,

    #[error("invalid point location at index {index}")]
    InvalidPointLocation { index: usize },

    #[error("invalid length {len} (minimum {min})")]
    InvalidLength { len: usize, min: usize },

    #[error("invalid size: {decimal_places} decimal places (max {max})")]
    InvalidSize { decimal_places: u32, max: u32 },
}

/// Worker-aware buffer construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("duplicate worker id: {0}")]
    DuplicateWorkerId(u32),

    #[error("worker id {id} out of range (max: {max})")]
    WorkerIdOutOfRange { id: u32, max: u32 },
}
