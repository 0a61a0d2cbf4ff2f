//! Virtual-time timer queue
//!
//! Delayed effects are queued against a millisecond clock that only moves when
//! the host calls [`Timers::advance_to`]. Tasks due at the same instant run in
//! the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Milliseconds since the page session started
pub type Millis = u64;

/// Handle returned by [`Timers::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Entry<T> {
    due: Millis,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap pops the earliest (due, seq) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct Timers<T> {
    now: Millis,
    seq: u64,
    queue: BinaryHeap<Entry<T>>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Queue `task` to become due `delay` ms from now
    pub fn schedule(&mut self, delay: Millis, task: T) -> TimerId {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Entry {
            due: self.now.saturating_add(delay),
            seq,
            task,
        });
        TimerId(seq)
    }

    /// Move the clock forward; the clock never runs backwards
    pub fn advance_to(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.now = self.now.saturating_add(delta);
    }

    /// Pop the next task that is due at the current time
    pub fn pop_due(&mut self) -> Option<T> {
        if self.queue.peek().is_some_and(|e| e.due <= self.now) {
            self.queue.pop().map(|e| e.task)
        } else {
            None
        }
    }

    /// Earliest due time still queued
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.peek().map(|e| e.due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut Timers<&'static str>) -> Vec<&'static str> {
        std::iter::from_fn(|| timers.pop_due()).collect()
    }

    #[test]
    fn test_tasks_wait_for_their_time() {
        let mut timers = Timers::new();
        timers.schedule(500, "late");
        timers.schedule(50, "early");

        assert!(drain(&mut timers).is_empty());
        timers.advance_to(49);
        assert!(drain(&mut timers).is_empty());
        timers.advance_to(50);
        assert_eq!(drain(&mut timers), vec!["early"]);
        assert_eq!(timers.next_due(), Some(500));
        timers.advance_by(1000);
        assert_eq!(drain(&mut timers), vec!["late"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_same_instant_runs_in_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule(10, "a");
        timers.schedule(10, "b");
        timers.schedule(0, "c");
        timers.advance_to(10);
        assert_eq!(drain(&mut timers), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut timers: Timers<()> = Timers::new();
        timers.advance_to(100);
        timers.advance_to(40);
        assert_eq!(timers.now(), 100);
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut timers = Timers::new();
        timers.advance_to(300);
        timers.schedule(0, "now");
        assert_eq!(drain(&mut timers), vec!["now"]);
    }
}
