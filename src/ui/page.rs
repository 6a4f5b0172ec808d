//! Page renderer.
//!
//! The whole document is drawn into an off-screen buffer one viewport wide
//! and `total_rows` tall, then the rows under the scroll offset are copied
//! onto the screen.  Widgets never have to clip against the viewport edge.

use std::time::Instant;

use chrono::Datelike;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::app::state::{AppState, HoverTarget};
use crate::core::effects::{bounce_offset, Layer};
use crate::core::page::{HeroPart, ItemKind, LayoutItem};

use super::avatar::AvatarWidget;
use super::effects::{render_particles, render_ripples, to_rect};
use super::theme::Theme;

const BACKDROP_GLYPH: char = '·';
const BACKDROP_SPACING: usize = 6;
const CARD_ICON: &str = "◆";

pub struct PageWidget<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
    pub now: Instant,
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = &self.state.view;
        let total = view.layout.total_rows.min(u16::MAX as usize) as u16;
        let doc_area = Rect::new(0, 0, area.width, total);
        let mut doc = Buffer::empty(doc_area);
        doc.set_style(doc_area, self.theme.page_style());

        self.render_backdrop(&mut doc);
        for item in &view.layout.items {
            self.render_item(item, &mut doc);
        }
        let effects = &self.state.effects;
        render_ripples(effects, Layer::Document, self.now, &mut doc);
        render_particles(effects, Layer::Document, doc_area, self.now, &mut doc);

        let first = view.scroll_row();
        for sy in 0..area.height {
            let dy = first + sy as usize;
            for sx in 0..area.width {
                let Some(dst) = buf.cell_mut(Position::new(area.x + sx, area.y + sy)) else {
                    continue;
                };
                match doc.cell(Position::new(sx, dy.min(u16::MAX as usize) as u16)) {
                    Some(src) if dy < total as usize => *dst = src.clone(),
                    _ => {
                        dst.reset();
                        dst.set_style(self.theme.page_style());
                    }
                }
            }
        }
    }
}

impl PageWidget<'_> {
    /// Dotted pattern behind the hero, shifted by the parallax offset.
    fn render_backdrop(&self, doc: &mut Buffer) {
        let Some((top, bottom)) = self.state.view.layout.hero_rows() else {
            return;
        };
        let shift = self.state.view.parallax_rows() as i64;
        let style = self.theme.backdrop_style();
        for y in top..bottom.min(doc.area.height as usize) {
            let pattern_row = y as i64 - shift;
            if pattern_row.rem_euclid(BACKDROP_SPACING as i64 / 2) != 0 {
                continue;
            }
            let phase = (pattern_row / (BACKDROP_SPACING as i64 / 2)).rem_euclid(2) as usize;
            for x in (phase * BACKDROP_SPACING / 2..doc.area.width as usize).step_by(BACKDROP_SPACING) {
                if let Some(cell) = doc.cell_mut(Position::new(x as u16, y as u16)) {
                    cell.set_char(BACKDROP_GLYPH).set_style(style);
                }
            }
        }
    }

    fn render_item(&self, item: &LayoutItem, doc: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;
        // Rows past the buffer limit are never drawn.
        let Some(rect) = to_rect(item.rect) else {
            return;
        };

        match item.kind {
            ItemKind::SectionTitle => {
                doc.set_stringn(rect.x, rect.y, &item.text, rect.width as usize, theme.section_title_style());
                doc.set_stringn(rect.x, rect.y + 1, "━━━━", rect.width as usize, theme.accent_style());
            }
            ItemKind::Text => {
                doc.set_stringn(rect.x, rect.y, &item.text, rect.width as usize, theme.text_style());
            }
            ItemKind::HeroTitle => {
                let tw = &state.typewriter;
                let mut spans = vec![Span::styled(tw.visible_text(), theme.hero_title_style())];
                if tw.cursor_visible() {
                    spans.push(Span::styled("▌", theme.accent_style()));
                }
                doc.set_line(rect.x, rect.y, &Line::from(spans), rect.width);
            }
            ItemKind::Hero(part) => {
                let Some(p) = state.hero_progress(part, self.now) else {
                    return;
                };
                let base = match part {
                    HeroPart::Brand => theme.section_title_style(),
                    HeroPart::Subtitle => theme.accent_style(),
                    _ => theme.muted_style(),
                };
                // Slides up one row as it fades in.
                let y = if p < 0.5 { rect.y + 1 } else { rect.y };
                doc.set_stringn(rect.x, y, &item.text, rect.width as usize, theme.fading(base, p));
            }
            ItemKind::Avatar => {
                if state.hero_progress(HeroPart::Avatar, self.now).is_none() {
                    return;
                }
                AvatarWidget {
                    avatar: &state.avatar,
                    fitted: state.avatar_fit.as_ref(),
                    theme,
                    hovered: state.hover == Some(HoverTarget::Avatar),
                    loading: state.avatar_loading,
                }
                .render(rect, doc);
            }
            ItemKind::Card(i) => self.render_card(i, &item.text, rect, doc),
            ItemKind::Button(i) => {
                let in_hero = state.view.layout.buttons.get(i).is_some_and(|b| b.in_hero);
                let progress = if in_hero {
                    match state.hero_progress(HeroPart::Buttons, self.now) {
                        Some(p) => p,
                        None => return,
                    }
                } else {
                    1.0
                };
                let hovered = state.hover == Some(HoverTarget::Button(i));
                let style = theme.fading(theme.button_style(hovered), progress);
                let border = if hovered { theme.accent_style() } else { theme.border_style() };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.fading(border, progress));
                let inner = block.inner(rect);
                block.render(rect, doc);
                Paragraph::new(Line::styled(item.text.as_str(), style))
                    .alignment(Alignment::Center)
                    .render(inner, doc);
            }
            ItemKind::Footer => {
                let text = format!("© {} {}", chrono::Local::now().year(), item.text);
                Paragraph::new(Line::styled(text, theme.muted_style()))
                    .alignment(Alignment::Center)
                    .render(rect, doc);
            }
        }
    }

    fn render_card(&self, index: usize, text: &str, rect: Rect, doc: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;
        let Some(progress) = state.card_progress(index, self.now) else {
            return;
        };
        let hovered = state.hover == Some(HoverTarget::Card(index));
        let border = if hovered { theme.accent_style() } else { theme.border_style() };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.fading(border, progress))
            .style(theme.card_style());
        let inner = block.inner(rect);
        block.render(rect, doc);

        let (title, body) = text.split_once('\n').unwrap_or((text, ""));

        // The icon hops while the card is hovered.
        let lift = match (hovered, state.hover_since) {
            (true, Some(since)) => {
                let px = bounce_offset(self.now.saturating_duration_since(since));
                (-px / state.view.row_px()).round() as u16
            }
            _ => 0,
        };
        let icon_y = inner.y.saturating_sub(lift);
        doc.set_string(inner.x, icon_y, CARD_ICON, theme.fading(theme.accent_style(), progress));
        doc.set_stringn(
            inner.x + 2,
            inner.y,
            title,
            inner.width.saturating_sub(2) as usize,
            theme.fading(theme.section_title_style(), progress),
        );

        let body_area = Rect { y: inner.y + 1, height: inner.height.saturating_sub(1), ..inner };
        Paragraph::new(Line::styled(body, theme.fading(theme.muted_style(), progress)))
            .wrap(Wrap { trim: true })
            .render(body_area, doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::page::Page;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row_text(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn hidden_hero_parts_are_not_drawn() {
        let page = Page::sample();
        let state = AppState::new(page.clone(), AppConfig::default(), 100, 30);
        let theme = Theme::new(&state.theme);
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        PageWidget { state: &state, theme: &theme, now: Instant::now() }.render(area, &mut buf);
        assert!(!screen_text(&buf).contains(&page.hero().unwrap().subtitle));
    }

    #[test]
    fn shown_parts_and_scrolling() {
        let page = Page::sample();
        let mut state = AppState::new(page.clone(), AppConfig::default(), 100, 30);
        let now = Instant::now();
        for part in [HeroPart::Avatar, HeroPart::Brand, HeroPart::Subtitle, HeroPart::Description, HeroPart::Buttons] {
            state.hero_shown.insert(part, now - std::time::Duration::from_secs(1));
        }
        let theme = Theme::new(&state.theme);
        let area = Rect::new(0, 0, 100, 30);

        let mut buf = Buffer::empty(area);
        PageWidget { state: &state, theme: &theme, now }.render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains(&page.brand));
        assert!(text.contains(&page.hero().unwrap().subtitle));

        // Scroll to the bottom: the footer carries the brand.
        state.view.scroll_top = state.view.max_scroll();
        let mut buf = Buffer::empty(area);
        PageWidget { state: &state, theme: &theme, now }.render(area, &mut buf);
        assert!(screen_text(&buf).contains(&format!("{}", chrono::Local::now().year())));
    }

    #[test]
    fn items_past_the_row_limit_are_skipped() {
        let mut state = AppState::new(Page::sample(), AppConfig::default(), 100, 30);
        let far = crate::core::effects::DocRect { x: 0, y: 65_538, width: 20, height: 1 };
        state.view.layout.items.push(LayoutItem {
            rect: far,
            kind: ItemKind::Text,
            text: "wrapped into view".into(),
        });
        let theme = Theme::new(&state.theme);
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        PageWidget { state: &state, theme: &theme, now: Instant::now() }.render(area, &mut buf);
        // Truncated to u16 this row would land on screen row 2.
        assert!(!screen_text(&buf).contains("wrapped into view"));
    }
}
