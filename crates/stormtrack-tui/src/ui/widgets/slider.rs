//! Date slider widget.
//!
//! Renders the track between the start and end labels with a knob at the
//! current value, and a tooltip line naming the cutoff date.

use crate::ui::theme::{slider_fill, Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use stormtrack_engine::Timeline;
use unicode_width::UnicodeWidthStr;

/// The day-offset slider.
pub struct DateSlider<'a> {
    timeline: &'a Timeline,
    value: u32,
    visible: usize,
}

impl<'a> DateSlider<'a> {
    pub fn new(timeline: &'a Timeline, value: u32) -> Self {
        Self {
            timeline,
            value,
            visible: 0,
        }
    }

    /// Number of events inside the window, shown in the tooltip.
    #[must_use]
    pub fn visible(mut self, count: usize) -> Self {
        self.visible = count;
        self
    }

    /// The track with the knob, `width` columns wide including brackets.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn track(&self, width: usize) -> String {
        let inner = width.saturating_sub(2);
        if inner == 0 {
            return String::new();
        }
        let ratio = self.timeline.range.ratio(self.value);
        let mut track: Vec<char> = slider_fill(ratio, inner).chars().collect();
        let knob = 1 + ((ratio * (inner - 1) as f64).round() as usize).min(inner - 1);
        if let Some(c) = Symbols::KNOB.chars().next() {
            track[knob] = c;
        }
        track.into_iter().collect()
    }
}

impl Widget for DateSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Date ")
            .title_style(Styles::heading())
            .borders(Borders::ALL)
            .border_style(Styles::frame_focus())
            .style(Styles::base());
        let inner = block.inner(area);
        block.render(area, buf);

        let range = self.timeline.range;
        let start = self.timeline.label(range.min);
        let end = self.timeline.label(range.max);
        let track_width = (inner.width as usize).saturating_sub(start.width() + end.width() + 4);

        let track_line = Line::from(vec![
            Span::styled(format!(" {start} "), Styles::dim()),
            Span::styled(self.track(track_width), Styles::accent()),
            Span::styled(format!(" {end}"), Styles::dim()),
        ]);

        let tooltip = Line::from(vec![
            Span::styled(" Through ", Styles::dim()),
            Span::styled(self.timeline.label(self.value), Styles::accent()),
            Span::styled(
                format!(
                    "  day {}/{}  {} event{}",
                    self.value,
                    range.max,
                    self.visible,
                    if self.visible == 1 { "" } else { "s" }
                ),
                Styles::dim(),
            ),
        ]);

        Paragraph::new(vec![track_line, tooltip])
            .style(Styles::base())
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    #[test]
    fn test_track_knob_positions() {
        let timeline = Timeline::default();
        assert_eq!(DateSlider::new(&timeline, 0).track(12), "[O         ]");
        assert_eq!(DateSlider::new(&timeline, 32).track(12), "[=========O]");
        assert_snapshot!(DateSlider::new(&timeline, 16).track(12), @"[=====O    ]");
        assert_eq!(DateSlider::new(&timeline, 0).track(2), "");
    }

    #[test]
    fn test_render_labels_and_tooltip() {
        let timeline = Timeline::default();
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        DateSlider::new(&timeline, 5).visible(2).render(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.contains("Sept 20 ["));
        assert!(text.contains("] Oct 22"));
        assert!(text.contains("Through Sept 25  day 5/32  2 events"));
    }
}
