//! Light/dark theme state.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How long the cross-fade flag stays set after a theme change.
pub const THEME_TRANSITION: Duration = Duration::from_millis(300);
/// How long the toggle button stays pressed after a click.
pub const TOGGLE_PRESS: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Text on the toggle button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }

    pub fn config_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_value())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}` (expected light or dark)")),
        }
    }
}

/// Current theme plus its short-lived presentation flags.  The owner clears
/// the flags when the matching timers fire.
#[derive(Debug, Clone, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub transitioning: bool,
    pub toggle_pressed: bool,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.transitioning = true;
    }

    /// Flip the theme from the toggle button.  Returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.apply(self.mode.toggled());
        self.toggle_pressed = true;
        self.mode
    }
}
