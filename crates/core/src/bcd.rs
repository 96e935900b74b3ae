//! Packed-digit (one ASCII digit per byte) validation and decoding
//!
//! A chunk is an integer read little-endian from a byte slice, so the first
//! byte of the input lands in the least significant byte of the chunk and is
//! the most significant decimal digit of the result:
//!
//! ```
//! # use quantkit_core::bcd::*;
//! assert_eq!(checked_conversion_u32(b"1234").unwrap(), 1234);
//! assert_eq!(eight_to_u64(0x0807_0605_0403_0201), 12_345_678);
//! ```
//!
//! Validation and decoding are separate passes. The `*_to_*` decoders only look
//! at the low nibble of every byte and never re-validate; feed them unchecked
//! input and they return garbage, not an error.
//!
//! # Validation trick
//!
//! For every byte `b` of the chunk, `b - 0x3A` and `0x2F - b` are both negative
//! iff `b` is in `'0'..='9'`. Both subtractions run across all lanes at once.
//! While the lower lanes hold digits each of them borrows exactly one from the
//! next lane, so the constants carry that borrow in their lowest lane only:
//! `0x39..39 + 1` and `0x30..30 - 1`.

use crate::bytes::{bytes_to_u128_le, bytes_to_u16_le, bytes_to_u32_le, bytes_to_u64_le};
use crate::errors::{ConversionError, Result};

const ABOVE_U16: u16 = 0x3939 + 1;
const BELOW_U16: u16 = 0x3030 - 1;
const SIGN_U16: u16 = 0x8080;

const ABOVE_U32: u32 = 0x3939_3939 + 1;
const BELOW_U32: u32 = 0x3030_3030 - 1;
const SIGN_U32: u32 = 0x8080_8080;

const ABOVE_U64: u64 = 0x3939_3939_3939_3939 + 1;
const BELOW_U64: u64 = 0x3030_3030_3030_3030 - 1;
const SIGN_U64: u64 = 0x8080_8080_8080_8080;

/// Single-byte digit check
#[inline(always)]
pub fn is_decimal_digit(b: u8) -> bool {
    (b'0'..=b'9').contains(&b)
}

/// True iff both bytes of `chunk` are ASCII digits.
#[inline(always)]
pub fn check_decimal_u16(chunk: u16) -> bool {
    let not_above = chunk.wrapping_sub(ABOVE_U16);
    let not_below = BELOW_U16.wrapping_sub(chunk);
    not_above & not_below & SIGN_U16 == SIGN_U16
}

/// True iff all four bytes of `chunk` are ASCII digits.
#[inline(always)]
pub fn check_decimal_u32(chunk: u32) -> bool {
    let not_above = chunk.wrapping_sub(ABOVE_U32);
    let not_below = BELOW_U32.wrapping_sub(chunk);
    not_above & not_below & SIGN_U32 == SIGN_U32
}

/// True iff all eight bytes of `chunk` are ASCII digits.
#[inline(always)]
pub fn check_decimal_u64(chunk: u64) -> bool {
    let not_above = chunk.wrapping_sub(ABOVE_U64);
    let not_below = BELOW_U64.wrapping_sub(chunk);
    not_above & not_below & SIGN_U64 == SIGN_U64
}

/// Decode two packed digits (0..=99).
///
/// ```
/// # use quantkit_core::bcd::two_to_u16;
/// assert_eq!(two_to_u16(0x0201), 12);
/// assert_eq!(two_to_u16(0x3234), 42);
/// ```
#[inline(always)]
pub fn two_to_u16(chunk: u16) -> u16 {
    ((chunk & 0x0f00) >> 8) + (chunk & 0x000f) * 10
}

/// Decode four packed digits (0..=9999).
#[inline(always)]
pub fn four_to_u32(chunk: u32) -> u32 {
    // digit pairs -> 16-bit lanes
    let lower = (chunk & 0x0f00_0f00) >> 8;
    let upper = (chunk & 0x000f_000f) * 10;
    let chunk = lower + upper;

    let lower = (chunk & 0x00ff_0000) >> 16;
    let upper = (chunk & 0x0000_00ff) * 100;
    lower + upper
}

/// Decode eight packed digits (0..=99_999_999).
#[inline(always)]
pub fn eight_to_u64(chunk: u64) -> u64 {
    let lower = (chunk & 0x0f00_0f00_0f00_0f00) >> 8;
    let upper = (chunk & 0x000f_000f_000f_000f) * 10;
    let chunk = lower + upper;

    let lower = (chunk & 0x00ff_0000_00ff_0000) >> 16;
    let upper = (chunk & 0x0000_00ff_0000_00ff) * 100;
    let chunk = lower + upper;

    let lower = (chunk & 0x0000_ffff_0000_0000) >> 32;
    let upper = (chunk & 0x0000_0000_0000_ffff) * 10_000;
    lower + upper
}

/// Combine two eight-digit halves into a sixteen-digit value.
///
/// `lower` is the chunk read from the first eight input bytes and supplies the
/// high-order digits; `upper` supplies the low-order digits. This matches a
/// little-endian 128-bit read split into its low and high words.
///
/// ```
/// # use quantkit_core::bcd::sixteen_to_u64;
/// let upper = u64::from_le_bytes(*b"87654321");
/// let lower = u64::from_le_bytes(*b"12345678");
/// assert_eq!(sixteen_to_u64(upper, lower), 1_234_567_887_654_321);
/// ```
#[inline(always)]
pub fn sixteen_to_u64(upper: u64, lower: u64) -> u64 {
    eight_to_u64(lower) * 100_000_000 + eight_to_u64(upper)
}

/// Validate and decode a single digit byte.
#[inline]
pub fn checked_conversion_u8(input: &[u8]) -> Result<u8> {
    match input {
        [] => Err(ConversionError::Empty),
        [b] if is_decimal_digit(*b) => Ok(b - b'0'),
        [_] => Err(ConversionError::NonDecimal),
        _ => Err(ConversionError::LengthExceeded {
            len: input.len(),
            max: 1,
        }),
    }
}

/// Read, validate and decode up to two digit bytes.
#[inline]
pub fn checked_conversion_u16(input: &[u8]) -> Result<u16> {
    let chunk = bytes_to_u16_le(input)?;
    if check_decimal_u16(chunk) {
        Ok(two_to_u16(chunk))
    } else {
        Err(ConversionError::NonDecimal)
    }
}

/// Read, validate and decode up to four digit bytes.
#[inline]
pub fn checked_conversion_u32(input: &[u8]) -> Result<u32> {
    let chunk = bytes_to_u32_le(input)?;
    if check_decimal_u32(chunk) {
        Ok(four_to_u32(chunk))
    } else {
        Err(ConversionError::NonDecimal)
    }
}

/// Read, validate and decode up to eight digit bytes.
#[inline]
pub fn checked_conversion_u64(input: &[u8]) -> Result<u64> {
    let chunk = bytes_to_u64_le(input)?;
    if check_decimal_u64(chunk) {
        Ok(eight_to_u64(chunk))
    } else {
        Err(ConversionError::NonDecimal)
    }
}

/// Read, validate and decode up to sixteen digit bytes.
#[inline]
pub fn checked_conversion_16_digits(input: &[u8]) -> Result<u64> {
    let chunk = bytes_to_u128_le(input)?;
    let lower = chunk as u64;
    let upper = (chunk >> 64) as u64;
    if check_decimal_u64(lower) && check_decimal_u64(upper) {
        Ok(sixteen_to_u64(upper, lower))
    } else {
        Err(ConversionError::NonDecimal)
    }
}

/// Fixed-width packed-digit chunk.
///
/// Lets callers pick the width at the type level:
///
/// ```
/// # use quantkit_core::bcd::checked_conversion;
/// assert_eq!(checked_conversion::<u16>(b"42").unwrap(), 42);
/// assert_eq!(checked_conversion::<u64>(b"00000042").unwrap(), 42);
/// ```
pub trait DigitChunk: Copy {
    /// Number of digit bytes in one chunk
    const WIDTH: usize;

    fn from_le_slice(input: &[u8]) -> Result<Self>;

    fn is_decimal(self) -> bool;

    /// Unchecked decode; see the module docs.
    fn decode_digits(self) -> Self;
}

impl DigitChunk for u16 {
    const WIDTH: usize = 2;

    #[inline(always)]
    fn from_le_slice(input: &[u8]) -> Result<Self> {
        bytes_to_u16_le(input)
    }

    #[inline(always)]
    fn is_decimal(self) -> bool {
        check_decimal_u16(self)
    }

    #[inline(always)]
    fn decode_digits(self) -> Self {
        two_to_u16(self)
    }
}

impl DigitChunk for u32 {
    const WIDTH: usize = 4;

    #[inline(always)]
    fn from_le_slice(input: &[u8]) -> Result<Self> {
        bytes_to_u32_le(input)
    }

    #[inline(always)]
    fn is_decimal(self) -> bool {
        check_decimal_u32(self)
    }

    #[inline(always)]
    fn decode_digits(self) -> Self {
        four_to_u32(self)
    }
}

impl DigitChunk for u64 {
    const WIDTH: usize = 8;

    #[inline(always)]
    fn from_le_slice(input: &[u8]) -> Result<Self> {
        bytes_to_u64_le(input)
    }

    #[inline(always)]
    fn is_decimal(self) -> bool {
        check_decimal_u64(self)
    }

    #[inline(always)]
    fn decode_digits(self) -> Self {
        eight_to_u64(self)
    }
}

/// Generic read-validate-decode for any [`DigitChunk`] width.
#[inline]
pub fn checked_conversion<C: DigitChunk>(input: &[u8]) -> Result<C> {
    let chunk = C::from_le_slice(input)?;
    if chunk.is_decimal() {
        Ok(chunk.decode_digits())
    } else {
        Err(ConversionError::NonDecimal)
    }
}
