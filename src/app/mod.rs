//! Application orchestration: state, event loop plumbing and input handling.

pub mod avatar_runtime;
pub mod event;
pub mod handler;
pub mod state;
pub mod view;
