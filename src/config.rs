//! User configuration: keybindings and scroll tuning.
//!
//! Settings are read from a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).
//! The viewer never writes it; `--print-config` dumps a starting point.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::coordinator::ScrollSettings;
use crate::core::navbar::NavbarThresholds;
use crate::core::theme::ThemeMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    NextSection,
    PrevSection,
    ToggleTheme,
    ToggleMenu,
    UploadAvatar,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the config dump).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::NextSection,
        Action::PrevSection,
        Action::ToggleTheme,
        Action::ToggleMenu,
        Action::UploadAvatar,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::ToggleTheme => "toggle_theme",
            Action::ToggleMenu => "toggle_menu",
            Action::UploadAvatar => "upload_avatar",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"↓"`, `"Ctrl+d"`, `"t"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+d"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&self.key_name());
        s
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+d"`, `"PageDown"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the original case for single characters ("G" ≠ "g").
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Viewer configuration: keybindings, theme and scroll tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub theme: ThemeMode,
    pub debounce_ms: u64,
    /// Fixed-header compensation for active-section detection.
    pub section_offset_px: f64,
    pub hide_threshold_px: f64,
    pub elevate_threshold_px: f64,
    pub parallax_rate: f64,
    /// Gap left above a section when jumping to it from the navbar.
    pub nav_scroll_offset_px: f64,
    pub mobile_breakpoint_px: f64,
    /// Pixels represented by one terminal row / column.
    pub row_px: f64,
    pub col_px: f64,
    pub typing_speed_ms: u64,
    pub scroll_step_rows: u16,
    pub smooth_scroll_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            theme: ThemeMode::Light,
            debounce_ms: 10,
            section_offset_px: 100.0,
            hide_threshold_px: 200.0,
            elevate_threshold_px: 50.0,
            parallax_rate: -0.3,
            nav_scroll_offset_px: 80.0,
            mobile_breakpoint_px: 768.0,
            row_px: 16.0,
            col_px: 8.0,
            typing_speed_ms: 80,
            scroll_step_rows: 3,
            smooth_scroll_speed: 0.25,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('u'), ctrl)]);
        m.insert(Action::PageDown, vec![
            KeyBind::new(PageDown, n),
            KeyBind::new(Char(' '), n),
            KeyBind::new(Char('d'), ctrl),
        ]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(Action::NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(Action::PrevSection, vec![KeyBind::new(BackTab, shift), KeyBind::new(Char('p'), n)]);
        m.insert(Action::ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(Action::ToggleMenu, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Action::UploadAvatar, vec![KeyBind::new(Char('a'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next section | {}: theme | {}: avatar | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::UploadAvatar),
            self.short_binding(Action::Quit),
        )
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        ScrollSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            section_offset: self.section_offset_px,
            navbar: NavbarThresholds {
                hide_after: self.hide_threshold_px,
                elevate_after: self.elevate_threshold_px,
            },
            parallax_rate: self.parallax_rate,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse_config(&contents))
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let float = || value.parse::<f64>().ok().filter(|v| v.is_finite());
            let int = || value.parse::<u64>().ok();

            match key {
                "theme" => match value.parse() {
                    Ok(mode) => config.theme = mode,
                    Err(e) => tracing::warn!("config: {e}"),
                },
                "debounce_ms" => {
                    if let Some(v) = int() {
                        config.debounce_ms = v.clamp(1, 1000);
                    }
                }
                "section_offset_px" => {
                    if let Some(v) = float() {
                        config.section_offset_px = v.max(0.0);
                    }
                }
                "hide_threshold_px" => {
                    if let Some(v) = float() {
                        config.hide_threshold_px = v.max(0.0);
                    }
                }
                "elevate_threshold_px" => {
                    if let Some(v) = float() {
                        config.elevate_threshold_px = v.max(0.0);
                    }
                }
                "parallax_rate" => {
                    if let Some(v) = float() {
                        config.parallax_rate = v.clamp(-1.0, 1.0);
                    }
                }
                "nav_scroll_offset_px" => {
                    if let Some(v) = float() {
                        config.nav_scroll_offset_px = v.max(0.0);
                    }
                }
                "mobile_breakpoint_px" => {
                    if let Some(v) = float() {
                        config.mobile_breakpoint_px = v.max(0.0);
                    }
                }
                "row_px" => {
                    if let Some(v) = float() {
                        config.row_px = v.clamp(1.0, 64.0);
                    }
                }
                "col_px" => {
                    if let Some(v) = float() {
                        config.col_px = v.clamp(1.0, 32.0);
                    }
                }
                "typing_speed_ms" => {
                    if let Some(v) = int() {
                        config.typing_speed_ms = v.clamp(10, 1000);
                    }
                }
                "scroll_step_rows" => {
                    if let Some(v) = int() {
                        config.scroll_step_rows = v.clamp(1, 50) as u16;
                    }
                }
                "smooth_scroll_speed" => {
                    if let Some(v) = float() {
                        config.smooth_scroll_speed = v.clamp(0.05, 0.95);
                    }
                }
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        tracing::debug!(key, "config: unknown key ignored");
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if !parsed.is_empty() {
                        config.bindings.insert(action, parsed);
                    }
                }
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Appearance".to_string(),
            format!("theme = {}", self.theme),
            String::new(),
            "# Scroll behaviour (pixels; one row = row_px, one column = col_px)".to_string(),
            format!("debounce_ms = {}", self.debounce_ms),
            format!("section_offset_px = {}", self.section_offset_px),
            format!("hide_threshold_px = {}", self.hide_threshold_px),
            format!("elevate_threshold_px = {}", self.elevate_threshold_px),
            format!("parallax_rate = {}", self.parallax_rate),
            format!("nav_scroll_offset_px = {}", self.nav_scroll_offset_px),
            format!("mobile_breakpoint_px = {}", self.mobile_breakpoint_px),
            format!("row_px = {}", self.row_px),
            format!("col_px = {}", self.col_px),
            format!("typing_speed_ms = {}", self.typing_speed_ms),
            format!("scroll_step_rows = {}", self.scroll_step_rows),
            format!("smooth_scroll_speed = {}", self.smooth_scroll_speed),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}
