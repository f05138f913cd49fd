//! Timing utilities for inflation phases.
//!
//! An RAII timer that adds the elapsed time to a slot when dropped, so phase
//! durations are recorded even when a phase exits early through `?`.

use std::time::{Duration, Instant};

/// RAII timer that records elapsed time to a mutable slot on Drop.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// let mut load = Duration::ZERO;
/// {
///     let _timer = PhaseTimer::new(&mut load);
///     // ... resolve the menu tree ...
/// } // timer is dropped here, load is updated
/// ```
pub struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}
