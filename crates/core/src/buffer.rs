//! Worker-aware single-slot data buffer
//!
//! One writer publishes a value, up to 64 registered readers drain it. State
//! lives in two 64-bit masks, one bit per worker:
//!
//! | notifying | reading | worker state |
//! |-----------|---------|--------------|
//! | 0         | 0       | idle         |
//! | 1         | 0       | notified     |
//! | 1         | 1       | reading      |
//!
//! The writer may publish only while `reading == 0`. Readers may read only
//! after [`WorkerAwareBuffer::notify_all`] has set their bit. Both blocking
//! variants busy-spin with [`std::thread::yield_now`] between attempts and
//! have no timeout.
//!
//! ```
//! # use quantkit_core::buffer::WorkerAwareBuffer;
//! # use quantkit_core::worker::WorkerId;
//! let reader = WorkerId::new(0).unwrap();
//! let buffer = WorkerAwareBuffer::new(1u64, &[reader]).unwrap();
//!
//! buffer.try_acquire_for_write().unwrap().replace(2);
//! buffer.notify_all();
//!
//! assert_eq!(*buffer.try_read(&reader).unwrap(), 2);
//! assert!(!buffer.ready_to_update());
//! buffer.read_done(&reader);
//! assert!(buffer.ready_to_update());
//! ```

use arc_swap::ArcSwap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tracing::debug;

use crate::errors::BufferError;
use crate::worker::WorkerId;

/// Lock-free single-slot buffer shared between one writer and registered readers
pub struct WorkerAwareBuffer<T> {
    data: ArcSwap<T>,
    /// Workers with an unconsumed notification
    notifying: AtomicU64,
    /// Workers between a granted read and `read_done`
    reading: AtomicU64,
    full_mask: u64,
}

impl<T> WorkerAwareBuffer<T> {
    /// Create a buffer holding `initial` for the given reader set.
    ///
    /// Fails with [`BufferError::DuplicateWorkerId`] if two workers share an id.
    /// An empty worker set is allowed; writes are then always permitted.
    pub fn new(initial: T, workers: &[WorkerId]) -> Result<Self, BufferError> {
        let mut full_mask = 0u64;
        for worker in workers {
            if full_mask & worker.id_bit() != 0 {
                return Err(BufferError::DuplicateWorkerId(worker.id()));
            }
            full_mask |= worker.id_bit();
        }

        debug!(
            "Created worker-aware buffer for {} workers (mask {:#018x})",
            workers.len(),
            full_mask
        );

        Ok(Self {
            data: ArcSwap::from_pointee(initial),
            notifying: AtomicU64::new(0),
            reading: AtomicU64::new(0),
            full_mask,
        })
    }

    /// Writer access, granted only while no worker is reading
    pub fn try_acquire_for_write(&self) -> Option<WriteAccess<'_, T>> {
        if self.ready_to_update() {
            return Some(WriteAccess {
                buffer: self,
                current: self.data.load_full(),
            });
        }
        None
    }

    /// Spin until writer access is granted
    pub fn blocking_acquire_for_write(&self) -> WriteAccess<'_, T> {
        loop {
            if let Some(access) = self.try_acquire_for_write() {
                return access;
            }
            thread::yield_now();
        }
    }

    /// Flag every registered worker as having fresh data.
    ///
    /// Call once per update cycle, after the new value has been published.
    pub fn notify_all(&self) {
        self.notifying.store(self.full_mask, Ordering::Release);
    }

    /// Claim a read for `worker` if it has been notified.
    ///
    /// Repeated calls before [`Self::read_done`] re-mark the same bit and do
    /// not nest.
    pub fn try_read(&self, worker: &WorkerId) -> Option<Arc<T>> {
        if self.ready_to_read(worker) {
            self.reading.fetch_or(worker.id_bit(), Ordering::AcqRel);
            return Some(self.data.load_full());
        }
        None
    }

    /// Spin until `worker` is notified, then claim the read
    pub fn blocking_read(&self, worker: &WorkerId) -> Arc<T> {
        loop {
            if let Some(data) = self.try_read(worker) {
                return data;
            }
            thread::yield_now();
        }
    }

    /// Release `worker`'s read and consume its notification.
    ///
    /// A no-op for a worker that was never notified.
    pub fn read_done(&self, worker: &WorkerId) {
        let mask = worker.work_done_mask();
        self.reading.fetch_and(mask, Ordering::AcqRel);
        self.notifying.fetch_and(mask, Ordering::AcqRel);
    }

    /// True when no worker is reading
    #[inline]
    pub fn ready_to_update(&self) -> bool {
        self.reading.load(Ordering::Acquire) == 0
    }

    /// True when `worker` has an unconsumed notification
    #[inline]
    pub fn ready_to_read(&self, worker: &WorkerId) -> bool {
        self.notifying.load(Ordering::Acquire) & worker.id_bit() != 0
    }

    /// Current payload with no state check. Debugging only.
    pub fn peek_unchecked(&self) -> Arc<T> {
        self.data.load_full()
    }

    pub fn notifying_status(&self) -> u64 {
        self.notifying.load(Ordering::Acquire)
    }

    pub fn reading_status(&self) -> u64 {
        self.reading.load(Ordering::Acquire)
    }

    /// OR of all registered worker bits
    pub fn full_mask(&self) -> u64 {
        self.full_mask
    }

    /// Dump all three masks at debug level
    pub fn log_status(&self) {
        debug!("Full status:      {:064b}", self.full_mask);
        debug!("Notifying status: {:064b}", self.notifying_status());
        debug!("Reading status:   {:064b}", self.reading_status());
    }
}

impl<T: fmt::Debug> fmt::Debug for WorkerAwareBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerAwareBuffer")
            .field("data", &self.data.load_full())
            .field("notifying", &format_args!("{:#x}", self.notifying_status()))
            .field("reading", &format_args!("{:#x}", self.reading_status()))
            .field("full_mask", &format_args!("{:#x}", self.full_mask))
            .finish()
    }
}

/// Writer handle returned while no worker is reading.
///
/// Derefs to the payload as it was when access was granted. Publishing goes
/// through [`Self::replace`] or [`Self::update`]; follow it with
/// [`WorkerAwareBuffer::notify_all`].
///
/// The `reading == 0` check happens when access is granted, not when the value
/// is published. A worker still holding an earlier notification can claim a
/// read in between; it gets the snapshot that was current at that moment and
/// never a partially written payload.
pub struct WriteAccess<'a, T> {
    buffer: &'a WorkerAwareBuffer<T>,
    current: Arc<T>,
}

impl<'a, T> WriteAccess<'a, T> {
    /// Publish a new payload
    pub fn replace(self, value: T) {
        self.buffer.data.store(Arc::new(value));
    }

    /// Publish a modified copy of the current payload
    pub fn update<F>(self, f: F)
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let mut value = T::clone(&self.current);
        f(&mut value);
        self.buffer.data.store(Arc::new(value));
    }

    /// Give up write access and keep the current payload
    pub fn into_inner(self) -> Arc<T> {
        self.current
    }
}

impl<T> Deref for WriteAccess<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.current
    }
}
