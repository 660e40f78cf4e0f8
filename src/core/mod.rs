//! Core state – marquee engine, card transition state machine, scroll lock,
//! intro staging, and the static profile content.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! read through [`clock::Clock`] so every timed transition can be driven by a
//! virtual clock in tests.

pub mod clock;
pub mod content;
pub mod easing;
pub mod intro;
pub mod marquee;
pub mod scroll_lock;
pub mod transition;
