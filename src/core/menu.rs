//! Collapsible navigation menu for narrow viewports.

/// Where a click landed, relative to the menu chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    Hamburger,
    /// Inside the open menu but not on a link.
    Menu,
    /// A nav link inside the menu.
    Link,
    Outside,
}

#[derive(Debug, Clone)]
pub struct MobileMenu {
    open: bool,
    /// Viewports at most this wide (px) use the collapsed menu.
    breakpoint: f64,
}

impl MobileMenu {
    pub fn new(breakpoint: f64) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.breakpoint
    }

    /// Page scrolling is locked while the menu is open.
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn on_click(&mut self, click: MenuClick) {
        match click {
            MenuClick::Hamburger => {
                self.toggle();
            }
            MenuClick::Menu => {}
            MenuClick::Link | MenuClick::Outside => self.close(),
        }
    }

    /// Widening past the breakpoint always closes the menu.
    pub fn on_resize(&mut self, viewport_width: f64) {
        if viewport_width > self.breakpoint {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamburger_toggles_and_locks_scroll() {
        let mut m = MobileMenu::new(768.0);
        m.on_click(MenuClick::Hamburger);
        assert!(m.is_open());
        assert!(m.scroll_locked());
        m.on_click(MenuClick::Menu);
        assert!(m.is_open());
        m.on_click(MenuClick::Hamburger);
        assert!(!m.is_open());
    }

    #[test]
    fn links_and_outside_clicks_close() {
        let mut m = MobileMenu::new(768.0);
        m.toggle();
        m.on_click(MenuClick::Link);
        assert!(!m.is_open());
        m.toggle();
        m.on_click(MenuClick::Outside);
        assert!(!m.is_open());
    }

    #[test]
    fn resize_past_breakpoint_closes() {
        let mut m = MobileMenu::new(768.0);
        m.toggle();
        m.on_resize(768.0);
        assert!(m.is_open());
        m.on_resize(769.0);
        assert!(!m.is_open());
        assert!(m.is_mobile(768.0));
        assert!(!m.is_mobile(800.0));
    }
}
