//! # QuantKit Core
//!
//! Hot-path value types for a latency-sensitive trading system.
//!
//! ## Components
//!
//! 1. **Packed-digit decoding** - branchless validation and decoding of
//!    fixed-width ASCII digit chunks (`bytes`, `bcd`)
//! 2. **Worker-aware buffer** - lock-free single-slot hand-off between one
//!    writer and up to 64 readers (`worker`, `buffer`)
//! 3. **Fixed decimal places** - scaled-integer parsing of prices (`fixed`)
//! 4. **Identifiers** - bit-packed order ids and string interning
//!    (`id_gen`, `intern`)
//! 5. **Nanosecond timestamps** (`timing`)
//! 6. **Unified logging** - ftlog or tracing-subscriber (`logging`)

pub mod bcd;
pub mod buffer;
pub mod bytes;
pub mod errors;
pub mod fixed;
pub mod id_gen;
pub mod intern;
pub mod logging;
pub mod timing;
pub mod worker;

// Re-export commonly used items
pub use buffer::{WorkerAwareBuffer, WriteAccess};
pub use errors::{BufferError, ConversionError};
pub use fixed::FixedSpecExtractor;
pub use id_gen::{OrderId, OrderSequence, Venue};
pub use intern::{StringInterner, UniqueId};
pub use logging::init_logging;
pub use timing::{nanos, Timestamp};
pub use worker::WorkerId;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bcd::{
        check_decimal_u16, check_decimal_u32, check_decimal_u64, checked_conversion,
        checked_conversion_16_digits, checked_conversion_u16, checked_conversion_u32,
        checked_conversion_u64, checked_conversion_u8, eight_to_u64, four_to_u32,
        is_decimal_digit, sixteen_to_u64, two_to_u16, DigitChunk,
    };
    pub use crate::buffer::{WorkerAwareBuffer, WriteAccess};
    pub use crate::bytes::{bytes_to_u128_le, bytes_to_u16_le, bytes_to_u32_le, bytes_to_u64_le};
    pub use crate::errors::{BufferError, ConversionError};
    pub use crate::fixed::FixedSpecExtractor;
    pub use crate::id_gen::{OrderId, OrderSequence, Venue};
    pub use crate::intern::{StringInterner, UniqueId};
    pub use crate::logging::init_logging;
    pub use crate::timing::{nanos, Timestamp, DEFAULT_OFFSET_HOURS};
    pub use crate::worker::WorkerId;
}
