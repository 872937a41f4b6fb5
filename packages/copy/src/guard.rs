//! Counting guard that bounds simultaneous copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Limits how many copy tasks may be in flight at once.
///
/// Tasks call [`CopyGuard::acquire`] before touching any file and hold the
/// returned [`CopyPermit`] for the whole copy. The slot is released when the
/// permit is dropped, so an early return or a failed copy still frees it.
#[derive(Debug)]
pub struct CopyGuard {
    in_flight: Mutex<usize>,
    freed: Condvar,
    capacity: usize,
    peak: AtomicUsize,
}

/// A reserved copy slot. Dropping it releases the slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct CopyPermit<'a> {
    guard: &'a CopyGuard,
}

impl CopyGuard {
    /// Create a guard allowing `capacity` simultaneous holders (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            in_flight: Mutex::new(0),
            freed: Condvar::new(),
            capacity: capacity.max(1),
            peak: AtomicUsize::new(0),
        }
    }

    /// Block until a slot is free, then reserve it.
    pub fn acquire(&self) -> CopyPermit<'_> {
        let in_flight = self.lock();
        let mut in_flight = self
            .freed
            .wait_while(in_flight, |n| *n >= self.capacity)
            .unwrap_or_else(PoisonError::into_inner);

        *in_flight += 1;
        self.peak.fetch_max(*in_flight, Ordering::Relaxed);

        CopyPermit { guard: self }
    }

    fn release(&self) {
        let mut in_flight = self.lock();
        *in_flight = in_flight.saturating_sub(1);
        drop(in_flight);
        self.freed.notify_one();
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Maximum simultaneous holders.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    /// Highest number of slots ever held at the same time.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

impl Drop for CopyPermit<'_> {
    fn drop(&mut self) {
        self.guard.release();
    }
}
