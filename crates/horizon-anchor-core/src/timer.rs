//! Cancellable one-shot timers.
//!
//! A [`TimerQueue`] is owned by whatever needs delayed behavior (the
//! interaction state machine uses one for the hover-close grace period).
//! Time never advances on its own: callers pass the current [`Instant`] when
//! starting timers and when asking which timers have expired. This keeps the
//! owner in control of its clock and makes timer behavior deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// A queue of pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    /// Fire time of every pending timer.
    timers: SlotMap<TimerId, Instant>,
    /// Priority queue of fire times. Entries for stopped timers are skipped lazily.
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerQueue {
    /// Create an empty timer queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a one-shot timer that fires `duration` after `now`.
    pub fn start_one_shot(&mut self, now: Instant, duration: Duration) -> TimerId {
        let fire_time = now + duration;
        let id = self.timers.insert(fire_time);
        self.queue.push(TimerQueueEntry { id, fire_time });
        tracing::trace!(target: targets::TIMER, ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a pending timer.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Stop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Duration from `now` until the next timer fires, if any.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.discard_stale();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove and return every timer whose fire time is at or before `now`,
    /// earliest first.
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            if self.timers.remove(entry.id).is_some() {
                tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
                fired.push(entry.id);
            }
        }

        fired
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.start_one_shot(start, Duration::from_millis(200));

        assert!(timers.process_expired(start + Duration::from_millis(199)).is_empty());
        assert_eq!(
            timers.process_expired(start + Duration::from_millis(200)),
            vec![id]
        );
        assert!(timers.process_expired(start + Duration::from_secs(5)).is_empty());
        assert!(!timers.is_active(id));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.start_one_shot(start, Duration::from_millis(10));

        timers.stop(id).unwrap();
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId.into()));
        assert!(timers.process_expired(start + Duration::from_secs(1)).is_empty());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_expired_in_fire_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let late = timers.start_one_shot(start, Duration::from_millis(50));
        let early = timers.start_one_shot(start, Duration::from_millis(10));

        assert_eq!(
            timers.time_until_next(start),
            Some(Duration::from_millis(10))
        );
        assert_eq!(
            timers.process_expired(start + Duration::from_millis(60)),
            vec![early, late]
        );
        assert_eq!(timers.time_until_next(start), None);
    }
}
