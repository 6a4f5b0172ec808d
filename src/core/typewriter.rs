//! Typewriter reveal for the hero title.

use std::time::{Duration, Instant};

use rand::Rng;

/// Upper bound (exclusive) of the random delay added to every keystroke.
pub const KEYSTROKE_JITTER: Duration = Duration::from_millis(40);
/// How long the cursor lingers after the last character.
pub const CURSOR_HOLD: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Typing,
    /// All characters shown; cursor still blinking until the hold elapses.
    Holding,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
    shown: usize,
    speed: Duration,
    phase: Phase,
    next_at: Option<Instant>,
}

impl Typewriter {
    pub fn new(text: &str, speed: Duration) -> Self {
        Self {
            text: text.chars().collect(),
            shown: 0,
            speed,
            phase: Phase::Idle,
            next_at: None,
        }
    }

    /// Clear the text and start typing.
    pub fn start<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        self.shown = 0;
        self.phase = Phase::Typing;
        self.next_at = Some(now + self.keystroke(rng));
        if self.text.is_empty() {
            self.phase = Phase::Holding;
            self.next_at = Some(now + CURSOR_HOLD);
        }
    }

    /// Advance through every step due at `now`.  Returns `true` exactly once,
    /// on the poll where the cursor is removed.
    pub fn poll<R: Rng>(&mut self, now: Instant, rng: &mut R) -> bool {
        while let Some(at) = self.next_at {
            if at > now {
                break;
            }
            match self.phase {
                Phase::Typing => {
                    self.shown += 1;
                    if self.shown >= self.text.len() {
                        self.phase = Phase::Holding;
                        self.next_at = Some(at + CURSOR_HOLD);
                    } else {
                        // Chain from the step's own deadline so a late poll
                        // catches up instead of stretching the animation.
                        self.next_at = Some(at + self.keystroke(rng));
                    }
                }
                Phase::Holding => {
                    self.phase = Phase::Finished;
                    self.next_at = None;
                    return true;
                }
                Phase::Idle | Phase::Finished => self.next_at = None,
            }
        }
        false
    }

    fn keystroke<R: Rng>(&self, rng: &mut R) -> Duration {
        let jitter = rng.gen_range(0..KEYSTROKE_JITTER.as_millis() as u64);
        self.speed + Duration::from_millis(jitter)
    }

    /// Text to draw.  Before typing starts the full title is shown.
    pub fn visible_text(&self) -> String {
        match self.phase {
            Phase::Idle => self.text.iter().collect(),
            _ => self.text[..self.shown.min(self.text.len())].iter().collect(),
        }
    }

    pub fn cursor_visible(&self) -> bool {
        matches!(self.phase, Phase::Typing | Phase::Holding)
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn shows_full_text_until_started() {
        let tw = Typewriter::new("Hello", ms(80));
        assert_eq!(tw.visible_text(), "Hello");
        assert!(!tw.cursor_visible());
    }

    #[test]
    fn types_one_char_per_keystroke() {
        let mut rng = StdRng::seed_from_u64(7);
        let t0 = Instant::now();
        let mut tw = Typewriter::new("Hi!", ms(80));
        tw.start(t0, &mut rng);
        assert_eq!(tw.visible_text(), "");
        assert!(tw.cursor_visible());

        assert!(!tw.poll(t0 + ms(79), &mut rng));
        assert_eq!(tw.visible_text(), "");

        assert!(!tw.poll(t0 + ms(120), &mut rng));
        assert_eq!(tw.visible_text(), "H");
    }

    #[test]
    fn finishes_once_after_cursor_hold() {
        let mut rng = StdRng::seed_from_u64(1);
        let t0 = Instant::now();
        let mut tw = Typewriter::new("abc", ms(80));
        tw.start(t0, &mut rng);

        // Three keystrokes take at most 3 * 120ms.
        assert!(!tw.poll(t0 + ms(360), &mut rng));
        assert_eq!(tw.visible_text(), "abc");
        assert!(tw.cursor_visible());

        assert!(tw.poll(t0 + ms(360) + CURSOR_HOLD, &mut rng));
        assert!(tw.is_finished());
        assert!(!tw.cursor_visible());
        assert!(!tw.poll(t0 + ms(5000), &mut rng));
    }

    #[test]
    fn empty_text_only_holds_cursor() {
        let mut rng = StdRng::seed_from_u64(3);
        let t0 = Instant::now();
        let mut tw = Typewriter::new("", ms(80));
        tw.start(t0, &mut rng);
        assert!(tw.poll(t0 + CURSOR_HOLD, &mut rng));
    }
}
