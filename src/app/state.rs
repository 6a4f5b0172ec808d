//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::view::PageView;
use crate::config::AppConfig;
use crate::core::{
    avatar::Avatar,
    coordinator::ScrollCoordinator,
    effects::Effects,
    menu::MobileMenu,
    page::{HeroPart, Page},
    reveal::{RevealObserver, RevealOptions},
    sequencer::Sequencer,
    smooth_scroll::SmoothScroll,
    theme::ThemeState,
    typewriter::Typewriter,
};
use crate::ui::avatar::FittedAvatar;

/// Fade-in length for hero parts and revealed cards.
pub const FADE_IN: Duration = Duration::from_millis(600);

/// Timed UI changes scheduled on the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    ShowHero(HeroPart),
    StartTypewriter,
    EndThemeTransition,
    ReleaseThemeToggle,
    EndLogoSpin,
    RevealCard(usize),
}

/// Element currently under the mouse pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Button(usize),
    Card(usize),
    Avatar,
    /// The theme button in the navbar.
    ThemeToggle,
}

/// Path prompt standing in for a file picker.
#[derive(Debug, Clone, Default)]
pub struct AvatarPrompt {
    pub input: String,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    pub page: Page,
    /// Laid-out page; the coordinator's surface.
    pub view: PageView,
    pub coordinator: ScrollCoordinator,
    pub smooth: SmoothScroll,
    pub theme: ThemeState,
    pub menu: MobileMenu,
    pub cues: Sequencer<Cue>,
    pub typewriter: Typewriter,
    /// When each hero part started fading in.
    pub hero_shown: HashMap<HeroPart, Instant>,
    pub reveal: RevealObserver,
    /// When each skill card started fading in.
    pub card_shown: HashMap<usize, Instant>,
    pub effects: Effects,
    pub hover: Option<HoverTarget>,
    pub hover_since: Option<Instant>,
    pub avatar: Avatar,
    /// `avatar` scaled to its frame; redone on load and on resize.
    pub avatar_fit: Option<FittedAvatar>,
    pub prompt: Option<AvatarPrompt>,
    /// Set by the handler; the event loop hands it to a loader thread.
    pub pending_avatar: Option<PathBuf>,
    pub avatar_loading: bool,
    /// Start and length of the current logo spin.
    pub logo_spin: Option<(Instant, Duration)>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub rng: StdRng,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, cols: u16, rows: u16) -> Self {
        let view = PageView::new(&page, cols, rows, config.row_px, config.col_px);
        let hero_title = page.hero().map(|h| h.title.clone()).unwrap_or_default();
        let cards = view.layout.cards.len();
        Self {
            coordinator: ScrollCoordinator::new(config.scroll_settings()),
            smooth: SmoothScroll::new(config.smooth_scroll_speed),
            theme: ThemeState::new(config.theme),
            menu: MobileMenu::new(config.mobile_breakpoint_px),
            cues: Sequencer::new(),
            typewriter: Typewriter::new(
                &hero_title,
                Duration::from_millis(config.typing_speed_ms),
            ),
            hero_shown: HashMap::new(),
            reveal: RevealObserver::new(RevealOptions::default(), cards),
            card_shown: HashMap::new(),
            effects: Effects::new(),
            hover: None,
            hover_since: None,
            avatar: Avatar::default(),
            avatar_fit: None,
            prompt: None,
            pending_avatar: None,
            avatar_loading: false,
            logo_spin: None,
            status_message: None,
            should_quit: false,
            rng: StdRng::from_entropy(),
            view,
            page,
            config,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.menu.is_mobile(self.view.viewport_width_px())
    }

    /// Fade-in progress of a hero part, `None` while still hidden.
    pub fn hero_progress(&self, part: HeroPart, now: Instant) -> Option<f64> {
        self.hero_shown.get(&part).map(|t| fade_progress(*t, now))
    }

    pub fn card_progress(&self, card: usize, now: Instant) -> Option<f64> {
        self.card_shown.get(&card).map(|t| fade_progress(*t, now))
    }

    pub fn logo_spinning(&self, now: Instant) -> bool {
        self.logo_spin.is_some_and(|(start, len)| now < start + len)
    }
}

pub fn fade_progress(start: Instant, now: Instant) -> f64 {
    (now.saturating_duration_since(start).as_secs_f64() / FADE_IN.as_secs_f64()).clamp(0.0, 1.0)
}
