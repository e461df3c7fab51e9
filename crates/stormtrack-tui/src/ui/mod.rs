//! UI module for the stormtrack TUI.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::*;
