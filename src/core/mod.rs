//! Core logic – scroll coordination, page model, timed effects.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The page
//! is reached only through the [`coordinator::Surface`] trait and plain
//! data structures, so every piece is testable without a terminal.

pub mod avatar;
pub mod coordinator;
pub mod debounce;
pub mod effects;
pub mod menu;
pub mod navbar;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod sections;
pub mod sequencer;
pub mod smooth_scroll;
pub mod theme;
pub mod typewriter;
