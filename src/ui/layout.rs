//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::page::NAVBAR_ROWS;

/// Primary screen layout: the page with a navbar overlaid on its top rows,
/// plus a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub navbar_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let page_area = chunks[0];
        let navbar_area = Rect {
            height: (NAVBAR_ROWS as u16).min(page_area.height),
            ..page_area
        };

        Self {
            page_area,
            navbar_area,
            status_area: chunks[1],
        }
    }
}
