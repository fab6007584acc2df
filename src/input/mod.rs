//! Input Module
//!
//! Handles keyboard input with vim-style modal editing.

pub mod keymap;
pub mod line;
pub mod modes;

// Re-exports
pub use keymap::Action;
pub use line::{scroll_offset, LineBuffer};
pub use modes::{InputMode, ModeState};
