//! Colors, symbols and styles for the stormtrack TUI.
//!
//! Colors are grouped by what they paint: the screen surface and chrome, the
//! map, and event markers by hazard.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Palette;

impl Palette {
    // Surface
    pub const SURFACE: Color = Color::Rgb(18, 24, 32);
    pub const TEXT: Color = Color::Rgb(214, 222, 228);
    pub const MUTED: Color = Color::Rgb(120, 136, 150);
    pub const ACCENT: Color = Color::Rgb(94, 196, 214);

    // Chrome
    pub const BAR: Color = Color::Rgb(30, 40, 52);
    pub const KEY_CAP: Color = Color::Rgb(44, 92, 112);
    pub const FRAME: Color = Color::Rgb(58, 72, 86);
    pub const FRAME_FOCUS: Color = Color::Rgb(94, 196, 214);

    // Load state
    pub const OK: Color = Color::Rgb(120, 204, 140);
    pub const CAUTION: Color = Color::Rgb(236, 190, 90);
    pub const FAILURE: Color = Color::Rgb(232, 96, 88);

    // Map
    pub const COAST: Color = Color::Rgb(78, 116, 104);

    // Hazards
    pub const WIND: Color = Color::Rgb(232, 96, 88);
    pub const WATER: Color = Color::Rgb(86, 150, 238);
    pub const RELIEF: Color = Color::Rgb(120, 204, 140);
    pub const REPORT: Color = Color::Rgb(240, 146, 72);
    pub const PICKED: Color = Color::Rgb(250, 92, 172);
}

/// Marker and status symbols.
pub struct Symbols;

impl Symbols {
    pub const MARKER: &'static str = "*";
    pub const CURSOR: &'static str = "+";
    pub const SELECTED: &'static str = "@";
    pub const KNOB: &'static str = "O";
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Hazard keywords matched against an event's kind, first match wins.
const HAZARDS: &[(&[&str], Color)] = &[
    (&["landfall", "wind", "tornado", "damage"], Palette::WIND),
    (&["flood", "surge", "rain", "river"], Palette::WATER),
    (&["recovery", "relief", "rescue", "shelter"], Palette::RELIEF),
];

/// Marker color for an event kind such as "River flooding".
pub fn hazard_color(kind: &str) -> Color {
    let kind = kind.to_lowercase();
    HAZARDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| kind.contains(w)))
        .map_or(Palette::REPORT, |&(_, color)| color)
}

/// Common styles.
pub struct Styles;

impl Styles {
    pub fn base() -> Style {
        Style::default().fg(Palette::TEXT).bg(Palette::SURFACE)
    }

    /// Secondary text: dates, labels, coordinates.
    pub fn dim() -> Style {
        Style::default().fg(Palette::MUTED).bg(Palette::SURFACE)
    }

    /// List cursor and slider knob.
    pub fn accent() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::SURFACE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default().fg(Palette::OK).bg(Palette::SURFACE)
    }

    pub fn caution() -> Style {
        Style::default().fg(Palette::CAUTION).bg(Palette::SURFACE)
    }

    pub fn failure() -> Style {
        Style::default().fg(Palette::FAILURE).bg(Palette::SURFACE)
    }

    /// Panel titles.
    pub fn heading() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Key name in the status bar.
    pub fn key_cap() -> Style {
        Style::default()
            .fg(Palette::TEXT)
            .bg(Palette::KEY_CAP)
            .add_modifier(Modifier::BOLD)
    }

    /// What the key does.
    pub fn key_text() -> Style {
        Style::default().fg(Palette::TEXT).bg(Palette::BAR)
    }

    pub fn bar() -> Style {
        Style::default().fg(Palette::TEXT).bg(Palette::BAR)
    }

    pub fn frame() -> Style {
        Style::default().fg(Palette::FRAME)
    }

    pub fn frame_focus() -> Style {
        Style::default().fg(Palette::FRAME_FOCUS)
    }

    /// Map marker for an event of `kind`.
    pub fn marker(kind: &str) -> Style {
        Style::default()
            .fg(hazard_color(kind))
            .add_modifier(Modifier::BOLD)
    }

    /// The selected event, on the map and in the list.
    pub fn selected() -> Style {
        Style::default()
            .fg(Palette::PICKED)
            .bg(Palette::SURFACE)
            .add_modifier(Modifier::BOLD)
    }
}

/// Filled part of the slider track, `width` cells between brackets.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn slider_fill(progress: f64, width: usize) -> String {
    let filled = ((progress * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

/// Spinner frame for `tick`.
pub fn spinner(tick: usize) -> &'static str {
    Symbols::SPINNER[tick % Symbols::SPINNER.len()]
}
