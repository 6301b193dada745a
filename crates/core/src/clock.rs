//! Clock module - virtual time and cancellable timers
//!
//! The clock never reads the wall clock. Time moves only when the owner releases
//! due timers with [`Clock::pop_due`] and then calls [`Clock::advance_to`]. Timers
//! carry a plain event value instead of a callback, so firing a timer is just
//! handing that value back to the owner.
//!
//! Due timers are released one at a time in `(due time, creation order)` order.
//! Because the owner handles each event before asking for the next one, a timer
//! cancelled while an earlier event is being handled is never released, even if it
//! was already due.

use serde::Serialize;

/// Handle returned by [`Clock::start`] and [`Clock::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Timer<E> {
    handle: TimerHandle,
    due_ms: u64,
    /// `Some` for repeating timers
    period_ms: Option<u64>,
    event: E,
}

/// Single-threaded virtual timer queue
#[derive(Debug, Clone)]
pub struct Clock<E> {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Clone> Clock<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a repeating timer that first fires `interval_ms` from now
    pub fn start(&mut self, interval_ms: u32, event: E) -> TimerHandle {
        // A zero period would release the same timer forever within one advance.
        let period = u64::from(interval_ms.max(1));
        self.insert(period, Some(period), event)
    }

    /// Schedule a one-shot timer `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u32, event: E) -> TimerHandle {
        self.insert(u64::from(delay_ms), None, event)
    }

    fn insert(&mut self, delay_ms: u64, period_ms: Option<u64>, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            event,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before; calling it again is harmless.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel every pending timer, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Release the earliest timer due at or before `until_ms`.
    ///
    /// Moves `now` to the timer's due time. Repeating timers are re-armed one
    /// period later; one-shot timers are removed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, E)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        let due_ms = self.timers[idx].due_ms;
        self.now_ms = self.now_ms.max(due_ms);

        let event = match self.timers[idx].period_ms {
            Some(period) => {
                let timer = &mut self.timers[idx];
                timer.due_ms += period;
                timer.event.clone()
            }
            None => self.timers.swap_remove(idx).event,
        };

        Some((due_ms, event))
    }

    /// Move `now` forward (never backwards) once due timers are drained
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl<E: Clone> Default for Clock<E> {
    fn default() -> Self {
        Self::new()
    }
}
