//! Trailing-edge debouncer driven by an explicit clock.
//!
//! The owner feeds calls in with [`Debouncer::call`] and asks for due
//! invocations with [`Debouncer::poll`].  Only the last call of a burst
//! survives; it becomes due `wait` after that call.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait: Duration,
    /// Deadline and arguments of the single pending invocation.
    pending: Option<(Instant, A)>,
}

impl<A> Debouncer<A> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a call.  Replaces (cancels) whatever was pending.
    pub fn call(&mut self, now: Instant, args: A) {
        self.pending = Some((now + self.wait, args));
    }

    /// Take the pending arguments if their deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WAIT: Duration = Duration::from_millis(10);

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.call(t0, 1);
        assert_eq!(d.poll(t0 + Duration::from_millis(9)), None);
        assert_eq!(d.poll(t0 + WAIT), Some(1));
        assert_eq!(d.poll(t0 + Duration::from_millis(50)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn new_call_pushes_deadline_back() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.call(t0, "a");
        d.call(t0 + Duration::from_millis(8), "b");
        assert_eq!(d.poll(t0 + Duration::from_millis(12)), None);
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(18)));
        assert_eq!(d.poll(t0 + Duration::from_millis(18)), Some("b"));
    }

    #[test]
    fn cancel_drops_pending_call() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WAIT);
        d.call(t0, ());
        d.cancel();
        assert_eq!(d.poll(t0 + WAIT * 3), None);
    }

    proptest! {
        #[test]
        fn burst_collapses_to_last_call(gaps in proptest::collection::vec(0u64..10, 1..40)) {
            let t0 = Instant::now();
            let mut d = Debouncer::new(WAIT);
            let mut now = t0;
            let mut fired = Vec::new();
            for (i, gap) in gaps.iter().enumerate() {
                now += Duration::from_millis(*gap);
                if let Some(v) = d.poll(now) {
                    fired.push(v);
                }
                d.call(now, i);
            }
            if let Some(v) = d.poll(now + WAIT) {
                fired.push(v);
            }
            prop_assert_eq!(fired, vec![gaps.len() - 1]);
        }
    }
}
