//! Reusable widgets for the stormtrack TUI.

pub mod details;
pub mod event_list;
pub mod slider;
pub mod status_bar;

pub use details::DetailsPanel;
pub use event_list::EventList;
pub use slider::DateSlider;
pub use status_bar::{KeyHint, StatusBar};
