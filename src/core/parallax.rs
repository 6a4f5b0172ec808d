//! Hero background parallax.

/// Computes the background translation for a scroll offset.
#[derive(Debug, Clone, Copy)]
pub struct Parallax {
    rate: f64,
}

impl Parallax {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// `Some(offset * rate)` while the hero is still in view, `None` once
    /// the offset reaches the viewport height (the layer keeps whatever it
    /// was last given).
    pub fn translation(&self, scrolled: f64, viewport_height: f64) -> Option<f64> {
        (scrolled < viewport_height).then(|| scrolled * self.rate)
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new(-0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn stops_at_viewport_height() {
        let p = Parallax::default();
        assert_eq!(p.translation(100.0, 800.0), Some(-30.0));
        assert_eq!(p.translation(800.0, 800.0), None);
    }

    proptest! {
        #[test]
        fn follows_rate_below_viewport(s in 0.0f64..5000.0, vh in 1.0f64..3000.0) {
            let p = Parallax::default();
            match p.translation(s, vh) {
                Some(y) => {
                    prop_assert!(s < vh);
                    prop_assert!((y - s * -0.3).abs() < 1e-9);
                }
                None => prop_assert!(s >= vh),
            }
        }
    }
}
