//! A portfolio page for the terminal.
//!
//! Renders a single-page portfolio with a navbar that tracks the section in
//! view, hides on scroll-down and reappears on scroll-up, plus a parallax
//! hero, light/dark themes and hover effects.  Run with `--content <file>`
//! to show your own page.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::{
    avatar_runtime::{spawn_avatar_load, AvatarUpdate},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::navbar::NavbarVisibility;
use crate::core::page::Page;
use crate::core::theme::ThemeMode;
use crate::ui::{
    layout::AppLayout,
    navbar::NavbarWidget,
    page::PageWidget,
    popup::{AvatarPromptPopup, MobileMenuPopup},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal portfolio viewer")]
struct Cli {
    /// Page content file (defaults to the bundled sample page).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Image to show as the profile picture.
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Starting theme, overriding the config file.
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Write logs to this file (filter with RUST_LOG, default `info`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The terminal UI owns stderr too, so only log there on request.
        None if std::env::var_os("RUST_LOG").is_some() => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState, now: Instant) {
    let layout = AppLayout::from_area(frame.area());
    let theme = Theme::new(&state.theme);

    frame.render_widget(PageWidget { state, theme: &theme, now }, layout.page_area);

    if state.view.navbar.visibility == NavbarVisibility::Visible {
        let navbar = handler::navbar_layout(state, layout.navbar_area);
        let logo_frame = state
            .logo_spin
            .filter(|_| state.logo_spinning(now))
            .map(|(start, _)| (now.saturating_duration_since(start).as_millis() / 100) as usize);
        frame.render_widget(
            NavbarWidget {
                layout: &navbar,
                brand: &state.page.brand,
                links: &state.view.nav_links,
                visual: state.view.navbar,
                theme: &theme,
                theme_label: state.theme.mode.label(),
                toggle_pressed: state.theme.toggle_pressed,
                menu_open: state.menu.is_open(),
                logo_frame,
                effects: &state.effects,
                now,
            },
            layout.navbar_area,
        );
    }

    if state.menu.is_open() {
        frame.render_widget(
            MobileMenuPopup { links: &state.view.nav_links, theme: &theme },
            layout.page_area,
        );
    }

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(theme.status_bar_style()),
        layout.status_area,
    );

    if let Some(prompt) = &state.prompt {
        frame.render_widget(
            AvatarPromptPopup { input: &prompt.input, theme: &theme },
            frame.area(),
        );
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(theme) = cli.theme {
        user_config.theme = theme;
    }
    if cli.print_config {
        print!("{}", user_config.serialise());
        return Ok(());
    }

    let page = match &cli.content {
        Some(path) => Page::load(path)?,
        None => Page::sample(),
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(page, user_config, size.width, size.height.saturating_sub(1));
    state.pending_avatar = cli.avatar;
    state.avatar_loading = state.pending_avatar.is_some();
    handler::init(&mut state, Instant::now());

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (avatar_tx, mut avatar_rx) = tokio::sync::mpsc::unbounded_channel::<AvatarUpdate>();

    // ── event loop ────────────────────────────────────────────
    loop {
        let now = Instant::now();
        handler::on_timers(&mut state, now);
        handler::on_frame(&mut state, now);

        if let Some(path) = state.pending_avatar.take() {
            spawn_avatar_load(avatar_tx.clone(), path);
        }

        terminal.draw(|frame| draw(frame, &state, now))?;

        if state.should_quit {
            break;
        }

        let deadline = handler::next_deadline(&state, now);
        let wake = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
                    AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h, now),
                }
            }

            Some(update) = avatar_rx.recv() => handler::on_avatar_loaded(&mut state, update),

            _ = wake => {}
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
