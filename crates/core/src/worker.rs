//! Worker identity for bitmask-based coordination
//!
//! Each worker owns one bit of a 64-bit mask, so ids are limited to `0..=63`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::errors::BufferError;

/// Identity of a reader thread registered with a [`WorkerAwareBuffer`](crate::buffer::WorkerAwareBuffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WorkerId {
    id: u32,
    id_bit: u64,
}

impl WorkerId {
    /// Largest valid worker id
    pub const ID_BOUND: u32 = 63;

    /// Create a worker id, rejecting anything above [`Self::ID_BOUND`]
    pub fn new(id: u32) -> Result<Self, BufferError> {
        if id > Self::ID_BOUND {
            return Err(BufferError::WorkerIdOutOfRange {
                id,
                max: Self::ID_BOUND,
            });
        }
        Ok(Self { id, id_bit: 1u64 << id })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Single-bit mask `1 << id`
    #[inline(always)]
    pub fn id_bit(&self) -> u64 {
        self.id_bit
    }

    /// Complement mask used to clear this worker's bits
    #[inline(always)]
    pub fn work_done_mask(&self) -> u64 {
        !self.id_bit
    }
}

impl TryFrom<u32> for WorkerId {
    type Error = BufferError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<WorkerId> for u32 {
    fn from(worker: WorkerId) -> Self {
        worker.id
    }
}

impl Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
