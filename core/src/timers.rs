//! Cancelable timers on the embedder's event loop.
//!
//! Everything here is single-threaded: the embedding frontend supplies a
//! monotonic millisecond clock and calls `PlayEngine::tick` from its event
//! loop; due actions fire synchronously inside that call. Timer handles are
//! tracked explicitly so a superseded found word or a torn-down engine can
//! never leave a callback firing against stale state.

/// Handle to one scheduled action, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// The deferred work the engine can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Start fading out the found word (end of the display hold).
    WordFade,
    /// Remove the found word and the fading flag entirely.
    WordClear,
    /// Hide the bear shown by a "bear" match.
    BearHide,
    /// Hide the duck shown by a "duck" match.
    DuckHide,
    /// Reset the mobile tap builder after a completed word.
    TapReset,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: TimerId,
    deadline_ms: u64,
    action: TimerAction,
}

/// A small schedule of pending actions, ordered by deadline.
///
/// The queue holds a handful of entries at most (word fade chain, two
/// critter hides, a tap reset), so a sorted Vec is plenty.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: TimerAction) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let entry = Entry {
            id,
            deadline_ms: now_ms.saturating_add(delay_ms),
            action,
        };
        let pos = self
            .entries
            .partition_point(|e| e.deadline_ms <= entry.deadline_ms);
        self.entries.insert(pos, entry);
        id
    }

    /// Cancel a pending timer. Returns true if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return every action whose deadline is at or before
    /// `now_ms`, in deadline order.
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<TimerAction> {
        let due = self.entries.partition_point(|e| e.deadline_ms <= now_ms);
        self.entries
            .drain(..due)
            .map(|e| e.action)
            .collect()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, 500, TimerAction::WordClear);
        q.schedule(0, 100, TimerAction::WordFade);

        assert!(q.pop_due(50).is_empty());
        assert_eq!(q.pop_due(600), vec![TimerAction::WordFade, TimerAction::WordClear]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut q = TimerQueue::new();
        let id = q.schedule(0, 100, TimerAction::BearHide);
        q.schedule(0, 100, TimerAction::DuckHide);

        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert_eq!(q.pop_due(200), vec![TimerAction::DuckHide]);
    }

    #[test]
    fn test_same_deadline_fires_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(10, 0, TimerAction::WordFade);
        q.schedule(10, 0, TimerAction::BearHide);

        assert_eq!(q.pop_due(10), vec![TimerAction::WordFade, TimerAction::BearHide]);
    }
}
