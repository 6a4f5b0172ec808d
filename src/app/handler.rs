//! Input handling and timers: maps key/mouse events and due deadlines to
//! state mutations.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::config::Action;
use crate::core::avatar::{Avatar, AvatarError};
use crate::core::effects::{DocRect, Layer, BOUNCE_DURATION};
use crate::core::menu::MenuClick;
use crate::core::navbar::NavbarVisibility;
use crate::core::page::{HeroPart, PageHit, NAVBAR_ROWS};
use crate::core::smooth_scroll::nav_target;
use crate::core::theme::{THEME_TRANSITION, TOGGLE_PRESS};
use crate::ui::avatar::FittedAvatar;
use crate::ui::effects::to_rect;
use crate::ui::layout::AppLayout;
use crate::ui::navbar::{NavbarHit, NavbarLayout};
use crate::ui::popup::{contains, menu_area, menu_link_at};

use super::state::{AppState, AvatarPrompt, Cue, HoverTarget, FADE_IN};

/// Redraw interval while something is animating.
pub const FRAME: Duration = Duration::from_millis(16);

const AVATAR_FADE_DELAY: Duration = Duration::from_millis(200);
const TYPEWRITER_DELAY: Duration = Duration::from_millis(800);
const LOAD_SPIN: Duration = Duration::from_millis(800);
const CLICK_SPIN: Duration = Duration::from_millis(300);

/// Hero parts revealed once the title has been typed, with their delays.
const HERO_STAGGER: [(u64, HeroPart); 4] = [
    (0, HeroPart::Brand),
    (200, HeroPart::Subtitle),
    (400, HeroPart::Description),
    (600, HeroPart::Buttons),
];

// ── lifecycle ────────────────────────────────────────────────────

/// Arm the intro sequence.  Call once, right after the first layout.
pub fn init(state: &mut AppState, now: Instant) {
    state.cues.schedule(
        now,
        [
            (AVATAR_FADE_DELAY, Cue::ShowHero(HeroPart::Avatar)),
            (TYPEWRITER_DELAY, Cue::StartTypewriter),
        ],
    );
    spin_logo(state, now, LOAD_SPIN);
    // Initial sync so the first section is highlighted without a scroll.
    state.coordinator.on_scroll(now);
    info!("{} portfolio loaded", state.page.brand);
}

/// Run every timer due at `now`.
pub fn on_timers(state: &mut AppState, now: Instant) {
    let outcome = state.coordinator.poll(now, &mut state.view);
    if !outcome.is_empty() {
        debug!(?outcome, scroll_top = state.view.scroll_top, "scroll sync");
    }
    // A hidden navbar takes its toggle's hover with it.
    if state.hover == Some(HoverTarget::ThemeToggle)
        && state.view.navbar.visibility != NavbarVisibility::Visible
    {
        state.hover = None;
        state.hover_since = None;
        state.effects.hover_leave();
    }

    for cue in state.cues.poll(now) {
        apply_cue(state, cue, now);
    }

    if state.typewriter.poll(now, &mut state.rng) {
        state.cues.schedule(
            now,
            HERO_STAGGER
                .iter()
                .map(|&(ms, part)| (Duration::from_millis(ms), Cue::ShowHero(part))),
        );
    }

    state.effects.tick(now, &mut state.rng);
}

fn apply_cue(state: &mut AppState, cue: Cue, now: Instant) {
    match cue {
        Cue::ShowHero(part) => {
            state.hero_shown.entry(part).or_insert(now);
        }
        Cue::StartTypewriter => state.typewriter.start(now, &mut state.rng),
        Cue::EndThemeTransition => state.theme.transitioning = false,
        Cue::ReleaseThemeToggle => state.theme.toggle_pressed = false,
        Cue::EndLogoSpin => state.logo_spin = None,
        Cue::RevealCard(card) => {
            state.reveal.mark_revealed(card);
            state.card_shown.entry(card).or_insert(now);
        }
    }
}

/// Per-frame work: smooth scrolling, parallax and reveal-on-view.
pub fn on_frame(state: &mut AppState, now: Instant) {
    if let Some(next) = state.smooth.tick(state.view.scroll_top) {
        set_scroll(state, next, now);
    }

    state.coordinator.on_frame(&mut state.view);

    let bands = state.view.card_bands();
    let vh = state.view.viewport_height_px();
    for (card, delay) in state.reveal.observe(&bands, state.view.scroll_top, vh) {
        if !state.reveal.is_revealed(card) {
            state.cues.after(now, delay, Cue::RevealCard(card));
        }
    }
}

pub fn on_avatar_loaded(state: &mut AppState, result: Result<Avatar, AvatarError>) {
    state.avatar_loading = false;
    match result {
        Ok(avatar) => {
            let message = match avatar.path() {
                Some(path) => format!("Avatar updated: {}", path.display()),
                None => "Avatar updated".to_string(),
            };
            info!("{message}");
            state.avatar = avatar;
            refit_avatar(state);
            state.status_message = Some(message);
        }
        Err(e) => {
            warn!("avatar upload failed: {e}");
            state.status_message = Some(e.to_string());
        }
    }
}

pub fn handle_resize(state: &mut AppState, cols: u16, rows: u16, now: Instant) {
    let page_rows = rows.saturating_sub(1);
    state.view.relayout(&state.page, cols, page_rows);
    state.menu.on_resize(state.view.viewport_width_px());
    state.reveal.reset(state.view.layout.cards.len());
    refit_avatar(state);
    state.hover = None;
    state.effects.hover_leave();
    state.coordinator.on_scroll(now);
}

/// Scale the loaded picture to its frame once, rather than on every draw.
fn refit_avatar(state: &mut AppState) {
    let frame = state.view.layout.avatar.and_then(to_rect);
    state.avatar_fit = match (state.avatar.image(), frame) {
        (Some(img), Some(frame)) => FittedAvatar::for_frame(img, frame),
        _ => None,
    };
}

/// Earliest instant the loop has to wake up at, even without input.
pub fn next_deadline(state: &AppState, now: Instant) -> Option<Instant> {
    let frame = is_animating(state, now).then(|| now + FRAME);
    [
        state.coordinator.next_deadline(),
        state.cues.next_deadline(),
        state.typewriter.next_deadline(),
        state.effects.next_deadline(),
        frame,
    ]
    .into_iter()
    .flatten()
    .min()
}

fn is_animating(state: &AppState, now: Instant) -> bool {
    let fading = |start: &Instant| now < *start + FADE_IN;
    state.smooth.is_animating()
        || state.coordinator.frame_requested()
        || state.effects.is_active()
        || state.logo_spinning(now)
        || state.theme.transitioning
        || state.hero_shown.values().any(fading)
        || state.card_shown.values().any(fading)
        || matches!(
            (state.hover, state.hover_since),
            (Some(HoverTarget::Card(_)), Some(t)) if now < t + BOUNCE_DURATION
        )
}

// ── keyboard ─────────────────────────────────────────────────────

pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, even inside the prompt.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.prompt.is_some() {
        handle_prompt_key(state, key);
        return;
    }

    if key.code == KeyCode::Esc {
        state.menu.close();
        state.status_message = None;
        return;
    }

    if let KeyCode::Char(c @ '1'..='9') = key.code {
        if key.modifiers.is_empty() {
            activate_nav_link(state, c as usize - '1' as usize, now);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let row_px = state.view.row_px();
    let step = state.config.scroll_step_rows as f64 * row_px;
    let page = state.view.rows.saturating_sub(NAVBAR_ROWS as u16).max(1) as f64 * row_px;

    match action {
        Action::ScrollUp => scroll_by(state, -step, now),
        Action::ScrollDown => scroll_by(state, step, now),
        Action::PageUp => scroll_by(state, -page, now),
        Action::PageDown => scroll_by(state, page, now),
        Action::Top => smooth_to(state, 0.0),
        Action::Bottom => smooth_to(state, state.view.max_scroll()),
        Action::NextSection => step_section(state, 1, now),
        Action::PrevSection => step_section(state, -1, now),
        Action::ToggleTheme => toggle_theme(state, now),
        Action::ToggleMenu => {
            if state.is_mobile() {
                state.menu.on_click(MenuClick::Hamburger);
            }
        }
        Action::UploadAvatar => open_prompt(state),
        Action::Quit => state.should_quit = true,
    }
}

fn handle_prompt_key(state: &mut AppState, key: KeyEvent) {
    let Some(prompt) = state.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.prompt = None,
        KeyCode::Enter => {
            let path = prompt.input.trim().to_string();
            state.prompt = None;
            if !path.is_empty() {
                debug!(%path, "avatar upload requested");
                state.pending_avatar = Some(path.into());
                state.avatar_loading = true;
            }
        }
        KeyCode::Backspace => {
            prompt.input.pop();
        }
        KeyCode::Char(c) => prompt.input.push(c),
        _ => {}
    }
}

// ── mouse ────────────────────────────────────────────────────────

fn screen_layout(state: &AppState) -> AppLayout {
    AppLayout::from_area(Rect::new(0, 0, state.view.cols, state.view.rows + 1))
}

/// Navbar geometry for the current state.  Rendering uses the same layout.
pub fn navbar_layout(state: &AppState, area: Rect) -> NavbarLayout {
    NavbarLayout::compute(
        area,
        &state.page.brand,
        &state.view.nav_links,
        state.theme.mode.label(),
        state.is_mobile(),
    )
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.prompt.is_some() {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);
    let step = state.config.scroll_step_rows as f64 * state.view.row_px();

    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_by(state, step, now),
        MouseEventKind::ScrollUp => scroll_by(state, -step, now),
        MouseEventKind::Down(MouseButton::Left) => click(state, col, row, now),
        MouseEventKind::Moved => hover(state, col, row, now),
        _ => {}
    }
}

fn click(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let layout = screen_layout(state);
    let navbar_shown = state.view.navbar.visibility == NavbarVisibility::Visible;
    let navbar = navbar_layout(state, layout.navbar_area);
    let navbar_hit = if navbar_shown { navbar.hit(col, row) } else { None };

    if state.menu.is_open() {
        let links = state.view.nav_links.len();
        let menu = menu_area(layout.page_area, links);
        if let Some(i) = menu_link_at(menu, links, col, row) {
            activate_nav_link(state, i, now);
            return;
        }
        if contains(menu, col, row) {
            state.menu.on_click(MenuClick::Menu);
            return;
        }
        if navbar_hit == Some(NavbarHit::Hamburger) {
            state.menu.on_click(MenuClick::Hamburger);
            return;
        }
        state.menu.on_click(MenuClick::Outside);
    }

    if navbar_shown && contains(layout.navbar_area, col, row) {
        match navbar_hit {
            Some(NavbarHit::Logo) => spin_logo(state, now, CLICK_SPIN),
            Some(NavbarHit::Link(i)) => activate_nav_link(state, i, now),
            Some(NavbarHit::ThemeToggle) => {
                let toggle = screen_rect(navbar.theme_toggle);
                state.effects.click(toggle, Layer::Navbar, col, row as usize, now);
                toggle_theme(state, now);
            }
            Some(NavbarHit::Hamburger) => state.menu.on_click(MenuClick::Hamburger),
            None => {}
        }
        return;
    }

    if !contains(layout.page_area, col, row) {
        return;
    }
    let doc_row = state.view.scroll_row() + (row - layout.page_area.y) as usize;
    match state.view.layout.hit(col, doc_row) {
        Some(PageHit::Button(i)) => {
            let Some(button) = state.view.layout.buttons.get(i).cloned() else {
                return;
            };
            if button.in_hero && !state.hero_shown.contains_key(&HeroPart::Buttons) {
                return;
            }
            state.effects.click(button.rect, Layer::Document, col, doc_row, now);
            debug!(label = %button.label, "button pressed");
            if let Some(target) = button_target(state, &button.label) {
                activate_nav_link(state, target, now);
            }
        }
        Some(PageHit::Avatar) if state.hero_shown.contains_key(&HeroPart::Avatar) => {
            open_prompt(state);
        }
        _ => {}
    }
}

/// Nav link a button points at: the first section whose id appears in the
/// label ("View Projects" jumps to `projects`).
fn button_target(state: &AppState, label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    state
        .view
        .nav_links
        .iter()
        .position(|link| label.split_whitespace().any(|w| w == link.target))
}

/// A screen rect as an effects rect on the navbar layer.
fn screen_rect(r: Rect) -> DocRect {
    DocRect {
        x: r.x,
        y: r.y as usize,
        width: r.width,
        height: r.height as usize,
    }
}

fn hover(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let layout = screen_layout(state);
    let navbar = navbar_layout(state, layout.navbar_area);
    let over_navbar = state.view.navbar.visibility == NavbarVisibility::Visible
        && contains(layout.navbar_area, col, row);
    let over_menu = state.menu.is_open()
        && contains(menu_area(layout.page_area, state.view.nav_links.len()), col, row);

    let target = if over_menu {
        None
    } else if over_navbar {
        (navbar.hit(col, row) == Some(NavbarHit::ThemeToggle)).then_some(HoverTarget::ThemeToggle)
    } else if !contains(layout.page_area, col, row) {
        None
    } else {
        let doc_row = state.view.scroll_row() + (row - layout.page_area.y) as usize;
        match state.view.layout.hit(col, doc_row) {
            Some(PageHit::Button(i)) => Some(HoverTarget::Button(i)),
            Some(PageHit::Card(i)) if state.card_shown.contains_key(&i) => Some(HoverTarget::Card(i)),
            Some(PageHit::Avatar) => Some(HoverTarget::Avatar),
            _ => None,
        }
    };

    if target == state.hover {
        return;
    }
    state.hover = target;
    state.hover_since = target.map(|_| now);
    match target {
        Some(HoverTarget::Button(i)) => match state.view.layout.buttons.get(i) {
            Some(b) => state.effects.hover_enter(b.rect, Layer::Document, now),
            None => state.effects.hover_leave(),
        },
        Some(HoverTarget::ThemeToggle) => {
            state.effects.hover_enter(screen_rect(navbar.theme_toggle), Layer::Navbar, now)
        }
        _ => state.effects.hover_leave(),
    }
}

// ── actions ──────────────────────────────────────────────────────

fn set_scroll(state: &mut AppState, top: f64, now: Instant) {
    let top = top.clamp(0.0, state.view.max_scroll());
    if top != state.view.scroll_top {
        state.view.scroll_top = top;
        state.coordinator.on_scroll(now);
    }
}

fn scroll_by(state: &mut AppState, delta: f64, now: Instant) {
    if state.menu.scroll_locked() {
        return;
    }
    state.smooth.cancel();
    set_scroll(state, state.view.scroll_top + delta, now);
}

fn smooth_to(state: &mut AppState, target: f64) {
    if state.menu.scroll_locked() {
        return;
    }
    state.smooth.scroll_to(target.clamp(0.0, state.view.max_scroll()));
}

/// Smooth-scroll to the section behind nav link `index` and close the
/// mobile menu.
pub fn activate_nav_link(state: &mut AppState, index: usize, now: Instant) {
    let Some(link) = state.view.nav_links.get(index) else {
        return;
    };
    let id = link.target.clone();
    state.menu.on_click(MenuClick::Link);
    match nav_target(
        state.view.geometry(),
        &id,
        state.config.nav_scroll_offset_px,
        state.view.max_scroll(),
    ) {
        Some(target) => {
            debug!(section = %id, target, "nav link activated");
            state.smooth.scroll_to(target);
            // Reach the smooth scroller on this frame.
            on_frame(state, now);
        }
        None => debug!(section = %id, "nav link has no section"),
    }
}

fn step_section(state: &mut AppState, delta: isize, now: Instant) {
    if state.view.nav_links.is_empty() {
        return;
    }
    let n = state.view.nav_links.len() as isize;
    let current = state.view.nav_links.active_index().map_or(-1, |i| i as isize);
    let next = (current + delta).clamp(0, n - 1);
    activate_nav_link(state, next as usize, now);
}

fn toggle_theme(state: &mut AppState, now: Instant) {
    let mode = state.theme.toggle();
    state
        .cues
        .cancel_where(|c| matches!(c, Cue::EndThemeTransition | Cue::ReleaseThemeToggle));
    state.cues.schedule(
        now,
        [
            (THEME_TRANSITION, Cue::EndThemeTransition),
            (TOGGLE_PRESS, Cue::ReleaseThemeToggle),
        ],
    );
    info!(theme = %mode, "theme changed");
}

fn spin_logo(state: &mut AppState, now: Instant, len: Duration) {
    state.logo_spin = Some((now, len));
    state.cues.cancel_where(|c| *c == Cue::EndLogoSpin);
    state.cues.after(now, len, Cue::EndLogoSpin);
}

fn open_prompt(state: &mut AppState) {
    if state.avatar.wants_upload() && !state.avatar_loading {
        state.prompt = Some(AvatarPrompt::default());
    }
}
