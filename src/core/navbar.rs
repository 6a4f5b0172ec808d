//! Navbar show/hide state machine and elevation.

/// Whether the navbar is on screen or translated above the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Blur/shadow intensity.  Stateless: recomputed on every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarElevation {
    #[default]
    Base,
    Elevated,
}

/// Presentation derived from one processed scroll sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavbarVisual {
    pub visibility: NavbarVisibility,
    pub elevation: NavbarElevation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarThresholds {
    /// Scrolling down past this offset hides the bar.
    pub hide_after: f64,
    /// Offsets beyond this get the elevated look.
    pub elevate_after: f64,
}

impl Default for NavbarThresholds {
    fn default() -> Self {
        Self {
            hide_after: 200.0,
            elevate_after: 50.0,
        }
    }
}

/// The only state the navbar logic keeps between samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    last_scroll_top: f64,
}

impl ScrollState {
    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Process one sample and remember it (clamped at zero).
    pub fn step(&mut self, current: f64, thresholds: &NavbarThresholds) -> NavbarVisual {
        let elevation = if current > thresholds.elevate_after {
            NavbarElevation::Elevated
        } else {
            NavbarElevation::Base
        };
        let visibility = if current > self.last_scroll_top && current > thresholds.hide_after {
            NavbarVisibility::Hidden
        } else {
            NavbarVisibility::Visible
        };
        self.last_scroll_top = current.max(0.0);
        NavbarVisual {
            visibility,
            elevation,
        }
    }
}
