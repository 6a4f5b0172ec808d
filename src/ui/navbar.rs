//! Fixed navbar: logo, section links, theme toggle and (on narrow
//! terminals) the hamburger button.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::core::effects::{Effects, Layer};
use crate::core::navbar::{NavbarElevation, NavbarVisual};
use crate::core::sections::NavLinks;

use super::effects::{render_particles, render_ripples};
use super::theme::{Theme, ACCENT};

const LOGO_FRAMES: &[&str] = &["◆", "◈", "◇", "◈"];
const HAMBURGER: &str = " ☰ ";
const LINK_GAP: u16 = 1;

/// Clickable element of the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarHit {
    Logo,
    Link(usize),
    ThemeToggle,
    Hamburger,
}

/// Where each navbar element sits on screen.  Shared by rendering and
/// mouse hit-testing so both always agree.
#[derive(Debug, Clone)]
pub struct NavbarLayout {
    pub logo: Rect,
    /// One rect per nav link; empty rects for links that did not fit or
    /// are folded into the mobile menu.
    pub links: Vec<Rect>,
    pub theme_toggle: Rect,
    pub hamburger: Option<Rect>,
}

fn text_width(s: &str) -> u16 {
    s.chars().count() as u16
}

impl NavbarLayout {
    pub fn compute(
        area: Rect,
        brand: &str,
        links: &NavLinks,
        theme_label: &str,
        mobile: bool,
    ) -> Self {
        let row = area.y + area.height.min(3) / 2;
        let right = area.x + area.width;

        let logo = Rect::new(area.x + 2, row, (text_width(brand) + 2).min(area.width.saturating_sub(2)), 1);

        let toggle_w = text_width(theme_label) + 2;
        let theme_toggle = Rect::new(right.saturating_sub(toggle_w + 2), row, toggle_w, 1);

        let hamburger = mobile.then(|| {
            Rect::new(
                theme_toggle.x.saturating_sub(text_width(HAMBURGER) + 1),
                row,
                text_width(HAMBURGER),
                1,
            )
        });

        let mut rects = vec![Rect::default(); links.len()];
        if !mobile {
            // Right-aligned, laid out from the last link backwards.
            let mut x = theme_toggle.x.saturating_sub(2);
            let min_x = logo.x + logo.width + 2;
            for (i, link) in links.iter().enumerate().rev() {
                let w = text_width(&link.label) + 2;
                if x < min_x + w {
                    break;
                }
                x -= w;
                rects[i] = Rect::new(x, row, w, 1);
                x = x.saturating_sub(LINK_GAP);
            }
        }

        Self {
            logo,
            links: rects,
            theme_toggle,
            hamburger,
        }
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<NavbarHit> {
        let inside = |r: &Rect| r.width > 0 && col >= r.x && col < r.x + r.width && row == r.y;
        if inside(&self.theme_toggle) {
            return Some(NavbarHit::ThemeToggle);
        }
        if self.hamburger.as_ref().is_some_and(inside) {
            return Some(NavbarHit::Hamburger);
        }
        if inside(&self.logo) {
            return Some(NavbarHit::Logo);
        }
        self.links.iter().position(inside).map(NavbarHit::Link)
    }
}

pub struct NavbarWidget<'a> {
    pub layout: &'a NavbarLayout,
    pub brand: &'a str,
    pub links: &'a NavLinks,
    pub visual: NavbarVisual,
    pub theme: &'a Theme,
    pub theme_label: &'a str,
    pub toggle_pressed: bool,
    pub menu_open: bool,
    /// `Some(frame)` while the logo is spinning.
    pub logo_frame: Option<usize>,
    /// Particles and ripples on the navbar layer.
    pub effects: &'a Effects,
    pub now: Instant,
}

impl Widget for NavbarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let elevated = self.visual.elevation == NavbarElevation::Elevated;
        let style = self.theme.navbar_style(elevated);
        let mut block = Block::default().style(style);
        if elevated {
            block = block
                .borders(Borders::BOTTOM)
                .border_set(border::PROPORTIONAL_TALL)
                .border_style(self.theme.border_style());
        }
        block.render(area, buf);

        let l = self.layout;
        let glyph = self
            .logo_frame
            .map(|f| LOGO_FRAMES[f % LOGO_FRAMES.len()])
            .unwrap_or(LOGO_FRAMES[0]);
        buf.set_line(
            l.logo.x,
            l.logo.y,
            &Line::from(vec![
                Span::styled(glyph, Style::default().fg(ACCENT)),
                Span::raw(" "),
                Span::styled(self.brand, Style::default().add_modifier(Modifier::BOLD)),
            ]),
            l.logo.width,
        );

        for (link, rect) in self.links.iter().zip(&l.links) {
            if rect.width == 0 {
                continue;
            }
            buf.set_stringn(
                rect.x + 1,
                rect.y,
                &link.label,
                rect.width.saturating_sub(2) as usize,
                self.theme.link_style(link.is_active()),
            );
        }

        if let Some(h) = l.hamburger {
            let s = if self.menu_open { " ✕ " } else { HAMBURGER };
            buf.set_stringn(h.x, h.y, s, h.width as usize, self.theme.toggle_style(self.menu_open));
        }

        buf.set_stringn(
            l.theme_toggle.x,
            l.theme_toggle.y,
            format!("[{}]", self.theme_label),
            l.theme_toggle.width as usize,
            self.theme.toggle_style(self.toggle_pressed),
        );

        render_ripples(self.effects, Layer::Navbar, self.now, buf);
        render_particles(self.effects, Layer::Navbar, area, self.now, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sections::NavLink;

    fn links() -> NavLinks {
        NavLinks::new(vec![
            NavLink::new("home", "Home"),
            NavLink::new("about", "About"),
            NavLink::new("contact", "Contact"),
        ])
    }

    #[test]
    fn desktop_places_links_between_logo_and_toggle() {
        let area = Rect::new(0, 0, 120, 3);
        let l = NavbarLayout::compute(area, "Jordan Lee", &links(), "LIGHT", false);
        assert!(l.hamburger.is_none());
        assert!(l.links.iter().all(|r| r.width > 0));
        assert!(l.links[0].x > l.logo.x + l.logo.width);
        assert!(l.links[2].x + l.links[2].width <= l.theme_toggle.x);
        assert!(l.links.windows(2).all(|w| w[0].x < w[1].x));

        assert_eq!(l.hit(l.links[1].x, 1), Some(NavbarHit::Link(1)));
        assert_eq!(l.hit(l.theme_toggle.x, 1), Some(NavbarHit::ThemeToggle));
        assert_eq!(l.hit(l.logo.x, 1), Some(NavbarHit::Logo));
        assert_eq!(l.hit(l.links[1].x, 0), None);
    }

    #[test]
    fn mobile_folds_links_into_hamburger() {
        let area = Rect::new(0, 0, 60, 3);
        let l = NavbarLayout::compute(area, "Jordan Lee", &links(), "DARK", true);
        let h = l.hamburger.unwrap();
        assert!(l.links.iter().all(|r| r.width == 0));
        assert_eq!(l.hit(h.x + 1, h.y), Some(NavbarHit::Hamburger));
    }

    #[test]
    fn renders_active_link_label() {
        let area = Rect::new(0, 0, 100, 3);
        let mut nav = links();
        nav.activate("about");
        let layout = NavbarLayout::compute(area, "Jordan", &nav, "LIGHT", false);
        let theme = Theme::new(&Default::default());
        let mut buf = Buffer::empty(area);
        NavbarWidget {
            layout: &layout,
            brand: "Jordan",
            links: &nav,
            visual: NavbarVisual::default(),
            theme: &theme,
            theme_label: "LIGHT",
            toggle_pressed: false,
            menu_open: false,
            logo_frame: None,
            effects: &Effects::new(),
            now: Instant::now(),
        }
        .render(area, &mut buf);

        let row: String = (0..area.width)
            .filter_map(|x| buf.cell((x, 1)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(row.contains("Jordan"));
        assert!(row.contains("About"));
        assert!(row.contains("[LIGHT]"));
    }

    #[test]
    fn clicked_toggle_shows_ripple() {
        let area = Rect::new(0, 0, 100, 3);
        let nav = links();
        let layout = NavbarLayout::compute(area, "Jordan", &nav, "LIGHT", false);
        let t = layout.theme_toggle;
        let now = Instant::now();
        let mut effects = Effects::new();
        let clip = crate::core::effects::DocRect {
            x: t.x,
            y: t.y as usize,
            width: t.width,
            height: t.height as usize,
        };
        effects.click(clip, Layer::Navbar, t.x + t.width / 2, t.y as usize, now);

        let theme = Theme::new(&Default::default());
        let mut buf = Buffer::empty(area);
        NavbarWidget {
            layout: &layout,
            brand: "Jordan",
            links: &nav,
            visual: NavbarVisual::default(),
            theme: &theme,
            theme_label: "LIGHT",
            toggle_pressed: true,
            menu_open: false,
            logo_frame: None,
            effects: &effects,
            now: now + crate::core::effects::RIPPLE_LIFETIME / 2,
        }
        .render(area, &mut buf);

        let lit: Vec<u16> = (0..area.width).filter(|&x| buf[(x, t.y)].bg == ACCENT).collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&x| x >= t.x && x < t.x + t.width));
    }
}
