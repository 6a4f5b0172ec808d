//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and the app state and turns
//! them into cells on the terminal.  No file I/O happens here.

pub mod avatar;
pub mod effects;
pub mod layout;
pub mod navbar;
pub mod page;
pub mod popup;
pub mod theme;
