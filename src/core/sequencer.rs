//! Timed effect sequencing.
//!
//! Staged animations are described as a list of `(delay, effect)` pairs
//! instead of nested timer callbacks.  The owner polls with the current time
//! and applies whatever came due, in order.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Scheduled<E> {
    at: Instant,
    /// Insertion counter; breaks ties between equal deadlines.
    order: u64,
    effect: E,
}

#[derive(Debug, Clone)]
pub struct Sequencer<E> {
    queue: Vec<Scheduled<E>>,
    next_order: u64,
}

impl<E> Default for Sequencer<E> {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            next_order: 0,
        }
    }
}

impl<E> Sequencer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm every step relative to `now`.
    pub fn schedule<I>(&mut self, now: Instant, steps: I)
    where
        I: IntoIterator<Item = (Duration, E)>,
    {
        for (delay, effect) in steps {
            self.queue.push(Scheduled {
                at: now + delay,
                order: self.next_order,
                effect,
            });
            self.next_order += 1;
        }
    }

    /// Arm a single step.
    pub fn after(&mut self, now: Instant, delay: Duration, effect: E) {
        self.schedule(now, [(delay, effect)]);
    }

    /// Remove and return every effect due at `now`, earliest first.
    pub fn poll(&mut self, now: Instant) -> Vec<E> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.at <= now);
        self.queue = pending;
        due.sort_by_key(|s| (s.at, s.order));
        due.into_iter().map(|s| s.effect).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.iter().map(|s| s.at).min()
    }

    /// Drop pending steps matching `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&E) -> bool) {
        self.queue.retain(|s| !pred(&s.effect));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn releases_steps_in_deadline_order() {
        let t0 = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(t0, [(ms(600), "buttons"), (ms(0), "brand"), (ms(200), "subtitle")]);
        seq.after(t0, ms(400), "description");

        assert_eq!(seq.poll(t0), vec!["brand"]);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(200)));
        assert!(seq.poll(t0 + ms(199)).is_empty());
        assert_eq!(seq.poll(t0 + ms(1000)), vec!["subtitle", "description", "buttons"]);
        assert!(seq.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let t0 = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(t0, [(ms(100), 1), (ms(100), 2)]);
        seq.after(t0, ms(100), 3);
        assert_eq!(seq.poll(t0 + ms(100)), vec![1, 2, 3]);
    }

    #[test]
    fn cancel_where_removes_matching() {
        let t0 = Instant::now();
        let mut seq = Sequencer::new();
        seq.schedule(t0, [(ms(10), 1), (ms(20), 2), (ms(30), 3)]);
        seq.cancel_where(|e| *e == 2);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.poll(t0 + ms(30)), vec![1, 3]);
    }
}
