//! Fixed decimal-place extraction
//!
//! Parses prices and quantities that arrive with a known number of fractional
//! digits (`"123.45"` at two places) into scaled integers (`12345`), the form
//! the hot path works with. [`FixedSpecExtractor::to_decimal`] lifts the
//! scaled integer into a `rust_decimal::Decimal` for exact arithmetic off the
//! hot path.

use rust_decimal::Decimal;

use crate::bcd::is_decimal_digit;
use crate::errors::{ConversionError, Result};

const POWERS_OF_TEN: [i64; 18] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
];

/// Parser for `<int>.<frac>` input with exactly `decimal_places` fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedSpecExtractor {
    decimal_places: u32,
}

impl FixedSpecExtractor {
    /// Largest supported number of fractional digits
    pub const MAX_DECIMAL_PLACES: u32 = POWERS_OF_TEN.len() as u32 - 1;

    pub fn new(decimal_places: u32) -> Result<Self> {
        if decimal_places > Self::MAX_DECIMAL_PLACES {
            return Err(ConversionError::InvalidSize {
                decimal_places,
                max: Self::MAX_DECIMAL_PLACES,
            });
        }
        Ok(Self { decimal_places })
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// `10^decimal_places`
    pub fn scale(&self) -> i64 {
        POWERS_OF_TEN[self.decimal_places as usize]
    }

    /// Parse into a scaled `i64`.
    ///
    /// With zero decimal places the whole input is the integer part; a single
    /// trailing `'.'` is tolerated.
    ///
    /// ```
    /// # use quantkit_core::fixed::FixedSpecExtractor;
    /// let extractor = FixedSpecExtractor::new(2).unwrap();
    /// assert_eq!(extractor.bytes_to_i64(b"123.45").unwrap(), 12345);
    /// assert_eq!(extractor.bytes_to_i64(b".05").unwrap(), 5);
    /// ```
    pub fn bytes_to_i64(&self, bytes: &[u8]) -> Result<i64> {
        if bytes.is_empty() {
            return Err(ConversionError::Empty);
        }

        if self.decimal_places == 0 {
            let digits = bytes.strip_suffix(b".").unwrap_or(bytes);
            if digits.is_empty() {
                return Err(ConversionError::Empty);
            }
            return accumulate(digits);
        }

        let places = self.decimal_places as usize;
        let min = places + 1;
        if bytes.len() < min {
            return Err(ConversionError::InvalidLength {
                len: bytes.len(),
                min,
            });
        }

        let dot_pos = bytes.len() - places - 1;
        if bytes[dot_pos] != b'.' {
            return Err(ConversionError::InvalidPointLocation { index: dot_pos });
        }

        let integer_part = accumulate(&bytes[..dot_pos])?;
        let fractional_part = accumulate(&bytes[dot_pos + 1..])?;

        integer_part
            .checked_mul(self.scale())
            .and_then(|v| v.checked_add(fractional_part))
            .ok_or(ConversionError::Overflow)
    }

    /// Parse into a scaled `i32`; values outside `i32` fail with `Overflow`
    pub fn bytes_to_i32(&self, bytes: &[u8]) -> Result<i32> {
        let value = self.bytes_to_i64(bytes)?;
        i32::try_from(value).map_err(|_| ConversionError::Overflow)
    }

    pub fn str_to_i64(&self, s: &str) -> Result<i64> {
        self.bytes_to_i64(s.as_bytes())
    }

    pub fn str_to_i32(&self, s: &str) -> Result<i32> {
        self.bytes_to_i32(s.as_bytes())
    }

    /// Parse into an exact `Decimal` carrying `decimal_places` as its scale
    pub fn to_decimal(&self, bytes: &[u8]) -> Result<Decimal> {
        let scaled = self.bytes_to_i64(bytes)?;
        Ok(Decimal::new(scaled, self.decimal_places))
    }
}

/// Accumulate ASCII digits into an `i64`; empty input is zero.
#[inline]
fn accumulate(digits: &[u8]) -> Result<i64> {
    let mut acc: i64 = 0;
    for &b in digits {
        if !is_decimal_digit(b) {
            return Err(ConversionError::NonDecimal);
        }
        acc = acc
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i64))
            .ok_or(ConversionError::Overflow)?;
    }
    Ok(acc)
}
