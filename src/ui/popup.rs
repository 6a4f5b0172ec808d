//! Overlays: the mobile navigation menu and the avatar path prompt.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::page::NAVBAR_ROWS;
use crate::core::sections::NavLinks;

use super::theme::{Theme, ACCENT};

// ───────────────────────────────────────── mobile menu ───────

const MENU_WIDTH: u16 = 24;

/// Drop-down under the navbar, right-aligned, one row per link.
pub fn menu_area(page_area: Rect, links: usize) -> Rect {
    let top = page_area.y + NAVBAR_ROWS as u16;
    let w = MENU_WIDTH.min(page_area.width);
    let h = (links as u16 + 2).min(page_area.height.saturating_sub(NAVBAR_ROWS as u16));
    Rect::new(page_area.x + page_area.width - w, top, w, h)
}

/// Index of the link row under `(col, row)`, if any.
pub fn menu_link_at(menu: Rect, links: usize, col: u16, row: u16) -> Option<usize> {
    let inner_x = menu.x + 1..menu.x + menu.width.saturating_sub(1);
    if !inner_x.contains(&col) || row <= menu.y {
        return None;
    }
    let i = (row - menu.y - 1) as usize;
    (i < links && row < menu.y + menu.height.saturating_sub(1)).then_some(i)
}

pub fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

pub struct MobileMenuPopup<'a> {
    pub links: &'a NavLinks,
    pub theme: &'a Theme,
}

impl Widget for MobileMenuPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = menu_area(area, self.links.len());
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .style(self.theme.popup_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = self
            .links
            .iter()
            .map(|link| {
                let marker = if link.is_active() { "▸ " } else { "  " };
                Line::from(vec![
                    Span::styled(marker, self.theme.accent_style()),
                    Span::styled(link.label.as_str(), self.theme.link_style(link.is_active())),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── avatar prompt ─────

pub struct AvatarPromptPopup<'a> {
    pub input: &'a str,
    pub theme: &'a Theme,
}

impl Widget for AvatarPromptPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(56, 7, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Upload avatar ")
            .title_style(self.theme.accent_style().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .style(self.theme.popup_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        // Keep the tail of long paths visible.
        let room = inner.width.saturating_sub(4) as usize;
        let chars: Vec<char> = self.input.chars().collect();
        let shown: String = chars[chars.len().saturating_sub(room)..].iter().collect();

        let lines = vec![
            Line::styled("Path to an image file:", self.theme.muted_style()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("> ", self.theme.accent_style()),
                Span::raw(shown),
                Span::styled("▌", Style::default().fg(ACCENT)),
            ]),
            Line::raw(""),
            Line::styled("Enter: load  Esc: cancel", self.theme.muted_style()),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// A rectangle of fixed size centred in `area`.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_rows_map_to_links() {
        let page = Rect::new(0, 0, 60, 30);
        let menu = menu_area(page, 4);
        assert_eq!(menu, Rect::new(36, 3, 24, 6));
        assert_eq!(menu_link_at(menu, 4, 40, 4), Some(0));
        assert_eq!(menu_link_at(menu, 4, 40, 7), Some(3));
        // Borders and outside.
        assert_eq!(menu_link_at(menu, 4, 40, 3), None);
        assert_eq!(menu_link_at(menu, 4, 40, 8), None);
        assert_eq!(menu_link_at(menu, 4, 36, 4), None);
        assert_eq!(menu_link_at(menu, 4, 10, 4), None);
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 5);
        assert_eq!(centered_fixed(56, 7, area), Rect::new(0, 0, 40, 5));
        assert_eq!(centered_fixed(20, 3, area), Rect::new(10, 1, 20, 3));
    }
}
