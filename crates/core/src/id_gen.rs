//! Bit-packed order identifiers
//!
//! An [`OrderId`] packs the venue into the top 8 bits and the venue-local
//! order number into the low 56 bits of a single `u64`, so ids hash and
//! compare as plain integers.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

const VENUE_SHIFT: u32 = 56;
const VENUE_MASK: u64 = 0xFF << VENUE_SHIFT;
const ORDER_MASK: u64 = !VENUE_MASK;

/// Execution venue carried in the top byte of an [`OrderId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Dummy,
    KrxDrv,
    KrxKts,
    Smb,
    Other(u8),
}

impl Venue {
    pub fn code(&self) -> u8 {
        match self {
            Venue::Dummy => 0,
            Venue::KrxDrv => 1,
            Venue::KrxKts => 2,
            Venue::Smb => 3,
            Venue::Other(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Dummy => "dummy",
            Venue::KrxDrv => "krxDrv",
            Venue::KrxKts => "krxKts",
            Venue::Smb => "smb",
            Venue::Other(_) => "unknown",
        }
    }
}

impl From<u8> for Venue {
    fn from(code: u8) -> Self {
        match code {
            0 => Venue::Dummy,
            1 => Venue::KrxDrv,
            2 => Venue::KrxKts,
            3 => Venue::Smb,
            other => Venue::Other(other),
        }
    }
}

/// Venue + order number packed into one `u64`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Largest order number that fits in 56 bits
    pub const MAX_ORDER: u64 = ORDER_MASK;

    /// Pack `venue` and `order`; order bits above 56 are dropped
    pub fn new(venue: Venue, order: u64) -> Self {
        Self(((venue.code() as u64) << VENUE_SHIFT) | (order & ORDER_MASK))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn order_id(&self) -> u64 {
        self.0 & ORDER_MASK
    }

    pub fn venue(&self) -> Venue {
        Venue::from(((self.0 & VENUE_MASK) >> VENUE_SHIFT) as u8)
    }

    pub fn venue_name(&self) -> &'static str {
        self.venue().name()
    }

    /// Split back into `(venue, order)`
    pub fn decode(&self) -> (Venue, u64) {
        (self.venue(), self.order_id())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.venue_name(), self.order_id())
    }
}

/// Monotonic order-number source for one venue.
///
/// Owned by whoever routes orders to the venue and shared by reference; there
/// is no process-wide counter.
#[derive(Debug)]
pub struct OrderSequence {
    venue: Venue,
    counter: AtomicU64,
}

impl OrderSequence {
    /// Sequence whose first id carries order number `start`
    pub fn new(venue: Venue, start: u64) -> Self {
        Self {
            venue,
            counter: AtomicU64::new(start),
        }
    }

    pub fn venue(&self) -> Venue {
        self.venue
    }

    /// Next order id; wraps within 56 bits
    pub fn next_id(&self) -> OrderId {
        let order = self.counter.fetch_add(1, Ordering::Relaxed);
        OrderId::new(self.venue, order)
    }
}
