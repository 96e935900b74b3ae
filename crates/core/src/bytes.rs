//! Little-endian byte-to-integer primitives
//!
//! Inputs shorter than the target width are padded with trailing zero bytes.
//! Inputs longer than the target width are rejected with
//! [`ConversionError::LengthExceeded`].

use crate::errors::{ConversionError, Result};

/// Copy `input` into a zero-padded `N`-byte array.
#[inline(always)]
fn pad_le<const N: usize>(input: &[u8]) -> Result<[u8; N]> {
    if input.len() > N {
        return Err(ConversionError::LengthExceeded {
            len: input.len(),
            max: N,
        });
    }

    let mut bytes = [0u8; N];
    bytes[..input.len()].copy_from_slice(input);
    Ok(bytes)
}

/// Read up to 2 bytes as a little-endian `u16`.
///
/// ```
/// # use quantkit_core::bytes::bytes_to_u16_le;
/// assert_eq!(bytes_to_u16_le(&[0x12, 0x34]).unwrap(), 0x3412);
/// assert_eq!(bytes_to_u16_le(&[0x42]).unwrap(), 0x42);
/// assert!(bytes_to_u16_le(&[1, 2, 3]).is_err());
/// ```
#[inline(always)]
pub fn bytes_to_u16_le(input: &[u8]) -> Result<u16> {
    pad_le::<2>(input).map(u16::from_le_bytes)
}

/// Read up to 4 bytes as a little-endian `u32`.
#[inline(always)]
pub fn bytes_to_u32_le(input: &[u8]) -> Result<u32> {
    pad_le::<4>(input).map(u32::from_le_bytes)
}

/// Read up to 8 bytes as a little-endian `u64`.
#[inline(always)]
pub fn bytes_to_u64_le(input: &[u8]) -> Result<u64> {
    pad_le::<8>(input).map(u64::from_le_bytes)
}

/// Read up to 16 bytes as a little-endian `u128`.
#[inline(always)]
pub fn bytes_to_u128_le(input: &[u8]) -> Result<u128> {
    pad_le::<16>(input).map(u128::from_le_bytes)
}
