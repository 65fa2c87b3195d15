//! Deadline timer scheduling for the interface driver.
//!
//! Time is **virtual**: monotonic nanoseconds supplied by the embedding at
//! every call that reads or arms a deadline. There is no wall clock in this
//! crate, so unit tests drive the whole driver deterministically by passing
//! explicit `now_ns` values.
//!
//! A [`TimerQueue`] holds the armed timers of one device; each armed timer
//! carries a caller-defined payload identifying which timer it is. Owners
//! keep the returned [`TimerId`] (typically in an `Option<TimerId>`) so an
//! armed timer can be cancelled or re-armed; ids are never reused, so a
//! stale id can never cancel a newer timer.
#![forbid(unsafe_code)]

/// Handle for one armed timer. Monotonic, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// One armed timer: a deadline plus the owner's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent<T> {
    pub deadline_ns: u64,
    pub id: TimerId,
    pub payload: T,
}

/// Set of armed timers for one device.
///
/// Expiry is pulled, not pushed: the embedding calls
/// [`pop_due`](TimerQueue::pop_due) with the current virtual time and
/// dispatches on each returned payload. Events fire in deadline order, and
/// in arming order among equal deadlines.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    armed: Vec<TimerEvent<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            armed: Vec::new(),
        }
    }

    /// Arm a timer for `deadline_ns`.
    pub fn schedule(&mut self, deadline_ns: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.push(TimerEvent {
            deadline_ns,
            id,
            payload,
        });
        id
    }

    /// Disarm a timer. Unconditional and idempotent: cancelling an id that
    /// already fired or was already cancelled returns `false`, never errors.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.armed.len();
        self.armed.retain(|ev| ev.id != id);
        self.armed.len() != before
    }

    /// Pop the next timer whose deadline is at or before `now_ns`.
    pub fn pop_due(&mut self, now_ns: u64) -> Option<TimerEvent<T>> {
        let idx = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, ev)| ev.deadline_ns <= now_ns)
            .min_by_key(|(_, ev)| (ev.deadline_ns, ev.id))
            .map(|(idx, _)| idx)?;
        Some(self.armed.swap_remove(idx))
    }

    /// Earliest armed deadline, if any. Embeddings use this to decide when
    /// to call back into `pop_due`.
    pub fn next_deadline(&self) -> Option<u64> {
        self.armed.iter().map(|ev| ev.deadline_ns).min()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.iter().any(|ev| ev.id == id)
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
