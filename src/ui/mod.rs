//! UI Module
//!
//! Terminal user interface using ratatui.

pub mod components;
pub mod renderer;

// Re-exports
pub use components::{EntryForm, ListViewState, MessageType};
pub use renderer::{DialogView, Renderer, UiState, View};
