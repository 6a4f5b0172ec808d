//! The laid-out page as the scroll coordinator sees it.
//!
//! Holds the document layout, its pixel geometry, the scroll offset and the
//! presentation values the coordinator writes (active link, navbar look,
//! parallax).  Rendering reads the same struct.

use crate::core::coordinator::Surface;
use crate::core::navbar::NavbarVisual;
use crate::core::page::{Page, PageLayout};
use crate::core::reveal::Band;
use crate::core::sections::{NavLinks, SectionGeometry};

#[derive(Debug, Clone)]
pub struct PageView {
    pub layout: PageLayout,
    geometry: Vec<SectionGeometry>,
    pub nav_links: NavLinks,
    /// Vertical scroll offset in pixels.
    pub scroll_top: f64,
    /// Page viewport size in cells (status bar excluded).
    pub cols: u16,
    pub rows: u16,
    row_px: f64,
    col_px: f64,
    pub navbar: NavbarVisual,
    /// Hero background translation in pixels (negative is up).
    pub parallax_y: f64,
}

impl PageView {
    pub fn new(page: &Page, cols: u16, rows: u16, row_px: f64, col_px: f64) -> Self {
        let layout = page.layout(cols, rows as usize);
        let geometry = layout.section_geometry(row_px);
        Self {
            layout,
            geometry,
            nav_links: page.nav_links(),
            scroll_top: 0.0,
            cols,
            rows,
            row_px,
            col_px,
            navbar: NavbarVisual::default(),
            parallax_y: 0.0,
        }
    }

    /// Re-run layout for a new viewport.  Link flags and scroll position
    /// survive; the offset is clamped to the new document height.
    pub fn relayout(&mut self, page: &Page, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.layout = page.layout(cols, rows as usize);
        self.geometry = self.layout.section_geometry(self.row_px);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }

    pub fn row_px(&self) -> f64 {
        self.row_px
    }

    pub fn viewport_width_px(&self) -> f64 {
        self.cols as f64 * self.col_px
    }

    pub fn viewport_height_px(&self) -> f64 {
        self.rows as f64 * self.row_px
    }

    pub fn max_scroll(&self) -> f64 {
        self.layout.total_rows.saturating_sub(self.rows as usize) as f64 * self.row_px
    }

    /// First document row on screen.
    pub fn scroll_row(&self) -> usize {
        (self.scroll_top / self.row_px).round().max(0.0) as usize
    }

    /// Parallax translation in whole rows.
    pub fn parallax_rows(&self) -> i32 {
        (self.parallax_y / self.row_px).round() as i32
    }

    pub fn geometry(&self) -> &[SectionGeometry] {
        &self.geometry
    }

    pub fn card_bands(&self) -> Vec<Band> {
        self.layout.card_bands(self.row_px)
    }
}

impl Surface for PageView {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height_px()
    }

    fn sections(&self) -> &[SectionGeometry] {
        &self.geometry
    }

    fn nav_links_mut(&mut self) -> &mut NavLinks {
        &mut self.nav_links
    }

    fn set_navbar(&mut self, visual: NavbarVisual) {
        self.navbar = visual;
    }

    fn set_parallax(&mut self, translate_y: f64) {
        self.parallax_y = translate_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_cells_to_pixels() {
        let page = Page::sample();
        let view = PageView::new(&page, 100, 30, 16.0, 8.0);
        assert_eq!(view.viewport_width_px(), 800.0);
        assert_eq!(view.viewport_height_px(), 480.0);
        assert_eq!(view.geometry().len(), page.sections.len());
        assert!(view.max_scroll() > 0.0);
    }

    #[test]
    fn relayout_clamps_scroll() {
        let page = Page::sample();
        let mut view = PageView::new(&page, 100, 30, 16.0, 8.0);
        view.scroll_top = 1.0e9;
        view.relayout(&page, 120, 40);
        assert_eq!(view.scroll_top, view.max_scroll());
        assert_eq!(view.cols, 120);
    }

    #[test]
    fn parallax_rounds_to_rows() {
        let page = Page::sample();
        let mut view = PageView::new(&page, 100, 30, 16.0, 8.0);
        view.set_parallax(-30.0);
        assert_eq!(view.parallax_rows(), -2);
    }
}
