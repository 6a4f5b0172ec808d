//! Eased scrolling toward a nav-link target.
//!
//! Each tick closes a fixed fraction of the remaining distance, so the page
//! moves fast at first and decelerates into place.  Every intermediate
//! offset is fed back to the coordinator as an ordinary scroll event.

use super::sections::SectionGeometry;

/// Snap to the target once closer than this (px).
const SNAP_DISTANCE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    target: Option<f64>,
    /// Fraction of the remaining distance covered per tick.
    /// Good range: 0.2–0.4 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            target: None,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn scroll_to(&mut self, target: f64) {
        self.target = Some(target);
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Next offset given the current one, or `None` when idle.
    pub fn tick(&mut self, current: f64) -> Option<f64> {
        let target = self.target?;
        let next = current + (target - current) * self.speed;
        if (target - next).abs() < SNAP_DISTANCE {
            self.target = None;
            Some(target)
        } else {
            Some(next)
        }
    }
}

/// Scroll offset that puts `section_id` just below the fixed header.
/// `None` when no such section exists.
pub fn nav_target(
    sections: &[SectionGeometry],
    section_id: &str,
    header_offset: f64,
    max_scroll: f64,
) -> Option<f64> {
    let section = sections.iter().find(|s| s.id == section_id)?;
    Some((section.top - header_offset).clamp(0.0, max_scroll.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_out_and_snaps() {
        let mut s = SmoothScroll::new(0.5);
        s.scroll_to(100.0);
        let mut pos = 0.0;
        let mut steps = Vec::new();
        while let Some(next) = s.tick(pos) {
            steps.push(next - pos);
            pos = next;
        }
        assert_eq!(pos, 100.0);
        assert!(!s.is_animating());
        assert!(steps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn idle_tick_is_none() {
        let mut s = SmoothScroll::new(0.3);
        assert_eq!(s.tick(10.0), None);
    }

    #[test]
    fn target_accounts_for_header_and_bounds() {
        let sections = vec![
            SectionGeometry::new("home", 0.0, 800.0),
            SectionGeometry::new("about", 800.0, 600.0),
        ];
        assert_eq!(nav_target(&sections, "about", 80.0, 5000.0), Some(720.0));
        assert_eq!(nav_target(&sections, "home", 80.0, 5000.0), Some(0.0));
        assert_eq!(nav_target(&sections, "about", 80.0, 500.0), Some(500.0));
        assert_eq!(nav_target(&sections, "missing", 80.0, 5000.0), None);
    }
}
