//! Colour palettes and text styles for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::{ThemeMode, ThemeState};

/// Brand accent, shared by both palettes.
pub const ACCENT: Color = Color::Rgb(255, 107, 157);

#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    surface: Color,
    border: Color,
}

const LIGHT: Palette = Palette {
    bg: Color::Rgb(250, 250, 250),
    fg: Color::Rgb(28, 28, 30),
    muted: Color::Rgb(118, 118, 128),
    surface: Color::Rgb(238, 238, 242),
    border: Color::Rgb(205, 205, 212),
};

const DARK: Palette = Palette {
    bg: Color::Rgb(16, 16, 22),
    fg: Color::Rgb(232, 232, 238),
    muted: Color::Rgb(142, 142, 154),
    surface: Color::Rgb(30, 30, 40),
    border: Color::Rgb(62, 62, 76),
};

/// Resolved theme for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    palette: Palette,
}

fn blend(a: Color, b: Color) -> Color {
    match (a, b) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
            ((r1 as u16 + r2 as u16) / 2) as u8,
            ((g1 as u16 + g2 as u16) / 2) as u8,
            ((b1 as u16 + b2 as u16) / 2) as u8,
        ),
        _ => b,
    }
}

impl Theme {
    pub fn new(state: &ThemeState) -> Self {
        let target = match state.mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        };
        // Mid-transition frames sit halfway between the two palettes.
        let palette = if state.transitioning {
            let from = match state.mode {
                ThemeMode::Light => DARK,
                ThemeMode::Dark => LIGHT,
            };
            Palette {
                bg: blend(from.bg, target.bg),
                fg: blend(from.fg, target.fg),
                muted: blend(from.muted, target.muted),
                surface: blend(from.surface, target.surface),
                border: blend(from.border, target.border),
            }
        } else {
            target
        };
        Self { palette }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style(&self) -> Style {
        Style::default().bg(self.palette.bg).fg(self.palette.fg)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.palette.fg)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    pub fn section_title_style(&self) -> Style {
        Style::default().fg(self.palette.fg).add_modifier(Modifier::BOLD)
    }

    pub fn hero_title_style(&self) -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn card_style(&self) -> Style {
        Style::default().bg(self.palette.surface).fg(self.palette.fg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn button_style(&self, hovered: bool) -> Style {
        if hovered {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.fg)
        }
    }

    /// Faint decoration drawn behind the hero.
    pub fn backdrop_style(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    /// Style for content `progress` (0..=1) through its fade-in.
    pub fn fading(&self, style: Style, progress: f64) -> Style {
        if progress < 0.34 {
            style.fg(self.palette.border)
        } else if progress < 0.67 {
            style.fg(self.palette.muted)
        } else {
            style
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn navbar_style(&self, elevated: bool) -> Style {
        let bg = if elevated {
            self.palette.surface
        } else {
            self.palette.bg
        };
        Style::default().bg(bg).fg(self.palette.fg)
    }

    pub fn link_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.palette.muted)
        }
    }

    pub fn toggle_style(&self, pressed: bool) -> Style {
        let base = Style::default().fg(self.palette.fg).add_modifier(Modifier::BOLD);
        if pressed {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.palette.surface).fg(self.palette.muted)
    }

    pub fn popup_style(&self) -> Style {
        Style::default().bg(self.palette.surface).fg(self.palette.fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_blends_palettes() {
        let mut state = ThemeState::new(ThemeMode::Dark);
        let settled = Theme::new(&state).page_style();
        state.transitioning = true;
        let mid = Theme::new(&state).page_style();
        assert_ne!(settled.bg, mid.bg);
        assert_eq!(mid.bg, Some(blend(LIGHT.bg, DARK.bg)));
    }
}
