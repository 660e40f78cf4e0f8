//! Application orchestration: state, per-frame stepping, and input handling.

pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
