//! Status bar widget.

use crate::ui::theme::{Palette, Styles};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar widget displayed at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: Vec<KeyHint>,
    right_text: Option<(&'a str, Style)>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(mode: &'a str) -> Self {
        Self {
            mode,
            hints: Vec::new(),
            right_text: None,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(self, text: &'a str) -> Self {
        self.right_styled(text, Styles::bar())
    }

    /// Set right-aligned text with its own style.
    #[must_use]
    pub fn right_styled(mut self, text: &'a str, style: Style) -> Self {
        self.right_text = Some((text, style.bg(Palette::BAR)));
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_bg(Palette::BAR);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.mode),
                Styles::base().bg(Palette::ACCENT).fg(Palette::SURFACE),
            ),
            Span::styled(" ", Styles::bar()),
        ];
        for hint in &self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), Styles::key_cap()));
            spans.push(Span::styled(format!(" {} ", hint.label), Styles::key_text()));
        }

        // Right text wins over hints when space is short.
        let right_width = self
            .right_text
            .map_or(0, |(text, _)| text.width() as u16 + 1);
        let left_width = area.width.saturating_sub(right_width);
        buf.set_line(area.x, area.y, &Line::from(spans), left_width);

        if let Some((text, style)) = self.right_text {
            if right_width <= area.width {
                let x = area.x + area.width - right_width;
                buf.set_string(x, area.y, text, style);
            }
        }
    }
}
