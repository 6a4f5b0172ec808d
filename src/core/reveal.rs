//! Reveal-on-view for skill cards.
//!
//! Mirrors an intersection observer: a card "intersects" when enough of it
//! lies inside the viewport (shrunk by a bottom margin).  Cards whose state
//! changed in the same pass form a batch; entering cards are staggered by
//! their index in that batch.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction required, `0.0..=1.0`.
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport.
    pub bottom_margin: f64,
    pub stagger: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
            stagger: Duration::from_millis(100),
        }
    }
}

/// Vertical extent of an observed card in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct RevealObserver {
    options: RevealOptions,
    intersecting: Vec<bool>,
    revealed: Vec<bool>,
}

impl RevealObserver {
    pub fn new(options: RevealOptions, cards: usize) -> Self {
        Self {
            options,
            intersecting: vec![false; cards],
            revealed: vec![false; cards],
        }
    }

    /// Start over with a new card count (after a relayout).
    pub fn reset(&mut self, cards: usize) {
        self.intersecting = vec![false; cards];
        self.revealed.resize(cards, false);
    }

    fn visible_fraction(&self, band: Band, scroll_top: f64, viewport_height: f64) -> f64 {
        if band.height <= 0.0 {
            return 0.0;
        }
        let view_top = scroll_top;
        let view_bottom = scroll_top + (viewport_height - self.options.bottom_margin).max(0.0);
        let overlap = (band.top + band.height).min(view_bottom) - band.top.max(view_top);
        (overlap / band.height).clamp(0.0, 1.0)
    }

    /// Evaluate every card.  Returns `(card, delay)` for cards that just
    /// started intersecting.
    pub fn observe(
        &mut self,
        cards: &[Band],
        scroll_top: f64,
        viewport_height: f64,
    ) -> Vec<(usize, Duration)> {
        if cards.len() != self.intersecting.len() {
            self.reset(cards.len());
        }
        let mut batch_index = 0u32;
        let mut entering = Vec::new();
        for (i, band) in cards.iter().enumerate() {
            let fraction = self.visible_fraction(*band, scroll_top, viewport_height);
            let now_in = fraction > 0.0 && fraction >= self.options.threshold;
            if now_in == self.intersecting[i] {
                continue;
            }
            self.intersecting[i] = now_in;
            if now_in {
                entering.push((i, self.options.stagger * batch_index));
            }
            batch_index += 1;
        }
        entering
    }

    pub fn mark_revealed(&mut self, card: usize) {
        if let Some(r) = self.revealed.get_mut(card) {
            *r = true;
        }
    }

    pub fn is_revealed(&self, card: usize) -> bool {
        self.revealed.get(card).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Band> {
        vec![
            Band { top: 900.0, height: 100.0 },
            Band { top: 1000.0, height: 100.0 },
            Band { top: 2000.0, height: 100.0 },
        ]
    }

    #[test]
    fn staggers_cards_entering_together() {
        let mut obs = RevealObserver::new(RevealOptions::default(), 3);
        assert!(obs.observe(&cards(), 0.0, 800.0).is_empty());

        let entered = obs.observe(&cards(), 400.0, 800.0);
        assert_eq!(
            entered,
            vec![(0, Duration::ZERO), (1, Duration::from_millis(100))]
        );
        // Already intersecting: no repeat.
        assert!(obs.observe(&cards(), 410.0, 800.0).is_empty());
    }

    #[test]
    fn bottom_margin_and_threshold_apply() {
        let mut obs = RevealObserver::new(RevealOptions::default(), 1);
        let card = [Band { top: 760.0, height: 100.0 }];
        // Viewport bottom is 800 - 50 = 750: card not visible yet.
        assert!(obs.observe(&card, 0.0, 800.0).is_empty());
        // 9px inside: below the 10% threshold.
        assert!(obs.observe(&card, 19.0, 800.0).is_empty());
        assert_eq!(obs.observe(&card, 20.0, 800.0), vec![(0, Duration::ZERO)]);
    }

    #[test]
    fn leaving_cards_count_toward_batch_index() {
        let mut obs = RevealObserver::new(RevealOptions::default(), 2);
        let bands = [Band { top: 0.0, height: 100.0 }, Band { top: 700.0, height: 100.0 }];
        obs.observe(&bands, 0.0, 500.0);
        // Card 0 leaves, card 1 enters in the same pass.
        let entered = obs.observe(&bands, 400.0, 500.0);
        assert_eq!(entered, vec![(1, Duration::from_millis(100))]);
    }

    #[test]
    fn revealed_sticks() {
        let mut obs = RevealObserver::new(RevealOptions::default(), 2);
        obs.mark_revealed(1);
        obs.observe(&cards()[..2], 5000.0, 800.0);
        assert!(obs.is_revealed(1));
        assert!(!obs.is_revealed(0));
    }
}
