//! `gate` — admission control for concurrent searches.
//!
//! A bounded counting semaphore: at most `capacity` searches run at once,
//! and a request arriving while the gate is full is turned away immediately
//! rather than queued (the caller is expected to retry). This is advisory
//! capacity protection around the engine, not a correctness requirement —
//! the engine itself is stateless and safe under any concurrency.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counting semaphore with a fixed capacity and non-blocking acquire.
#[derive(Debug)]
pub struct AdmissionGate {
    capacity: usize,
    in_flight: AtomicUsize,
}

/// Proof of admission. The slot is released when the permit is dropped,
/// which covers early returns and panics alike.
#[derive(Debug)]
pub struct SearchPermit<'a> {
    gate: &'a AdmissionGate,
}

impl AdmissionGate {
    pub const DEFAULT_CAPACITY: usize = 4;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        AdmissionGate {
            capacity,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Claim a slot, or `None` when all slots are taken.
    ///
    /// Compare-exchange loop rather than a plain `fetch_add` so the counter
    /// can never overshoot `capacity`, no matter how many threads race here.
    #[must_use]
    pub fn try_acquire(&self) -> Option<SearchPermit<'_>> {
        let mut current = self.in_flight.load(Ordering::Relaxed);
        loop {
            if current >= self.capacity {
                return None;
            }
            match self.in_flight.compare_exchange_weak(
                current,
                current + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(SearchPermit { gate: self }),
                Err(observed) => current = observed,
            }
        }
    }

    /// Number of currently admitted searches.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

impl Drop for SearchPermit<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.fetch_sub(1, Ordering::Release);
    }
}
