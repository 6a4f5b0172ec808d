//! Scroll coordination: debounced section/navbar sync plus per-frame parallax.
//!
//! The coordinator never touches the page directly.  Everything it reads or
//! writes goes through a [`Surface`], so the same logic drives the terminal
//! page and the fakes used in tests.

use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use super::navbar::{NavbarThresholds, NavbarVisual, ScrollState};
use super::parallax::Parallax;
use super::sections::{ActiveSectionDetector, NavLinks, SectionGeometry};

/// Geometry reads and presentation writes the coordinator needs.
pub trait Surface {
    /// Current vertical scroll offset in pixels.
    fn scroll_top(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn sections(&self) -> &[SectionGeometry];
    fn nav_links_mut(&mut self) -> &mut NavLinks;
    fn set_navbar(&mut self, visual: NavbarVisual);
    /// Vertical translation of the hero background layer.
    fn set_parallax(&mut self, translate_y: f64);
}

/// Tunables for [`ScrollCoordinator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSettings {
    pub debounce: Duration,
    pub section_offset: f64,
    pub navbar: NavbarThresholds,
    pub parallax_rate: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(10),
            section_offset: 100.0,
            navbar: NavbarThresholds::default(),
            parallax_rate: -0.3,
        }
    }
}

/// What a call to [`ScrollCoordinator::poll`] ended up running.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
    /// `Some` when the active-section pass ran; carries the matched id, if any.
    pub active_section: Option<Option<String>>,
    pub navbar: Option<NavbarVisual>,
}

impl SyncOutcome {
    pub fn is_empty(&self) -> bool {
        self.active_section.is_none() && self.navbar.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    settings: ScrollSettings,
    scroll: ScrollState,
    detector: ActiveSectionDetector,
    parallax: Parallax,
    active_nav: Debouncer<()>,
    navbar: Debouncer<()>,
    frame_requested: bool,
}

impl ScrollCoordinator {
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            scroll: ScrollState::default(),
            detector: ActiveSectionDetector::new(settings.section_offset),
            parallax: Parallax::new(settings.parallax_rate),
            active_nav: Debouncer::new(settings.debounce),
            navbar: Debouncer::new(settings.debounce),
            frame_requested: false,
            settings,
        }
    }

    #[cfg(test)]
    pub fn last_scroll_top(&self) -> f64 {
        self.scroll.last_scroll_top()
    }

    /// A raw scroll event: re-arm both debouncers and ask for a frame.
    pub fn on_scroll(&mut self, now: Instant) {
        self.active_nav.call(now, ());
        self.navbar.call(now, ());
        self.frame_requested = true;
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Paint opportunity.  Runs the parallax pass if a scroll asked for it.
    pub fn on_frame<S: Surface>(&mut self, surface: &mut S) -> bool {
        if !std::mem::take(&mut self.frame_requested) {
            return false;
        }
        if let Some(y) = self
            .parallax
            .translation(surface.scroll_top(), surface.viewport_height())
        {
            surface.set_parallax(y);
        }
        true
    }

    /// Run whichever debounced passes are due.  Both read the live scroll
    /// offset at fire time, not the offset at call time.
    pub fn poll<S: Surface>(&mut self, now: Instant, surface: &mut S) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        if self.active_nav.poll(now).is_some() {
            let scroll_top = surface.scroll_top();
            // The detector borrows sections while writing links, so copy the
            // (short) section list out first.
            let sections = surface.sections().to_vec();
            let id = self
                .detector
                .apply(&sections, scroll_top, surface.nav_links_mut());
            tracing::debug!(scroll_top, section = ?id, "active section pass");
            outcome.active_section = Some(id);
        }

        if self.navbar.poll(now).is_some() {
            let current = surface.scroll_top();
            let previous = self.scroll.last_scroll_top();
            let visual = self.scroll.step(current, &self.settings.navbar);
            tracing::debug!(current, previous, ?visual, "navbar pass");
            surface.set_navbar(visual);
            outcome.navbar = Some(visual);
        }

        outcome
    }

    /// Earliest pending debounce deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.active_nav.deadline(), self.navbar.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
