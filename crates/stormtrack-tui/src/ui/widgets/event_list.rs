//! List of events inside the date window.

use crate::ui::theme::{Styles, Symbols};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use stormtrack_engine::{short_label, Event, EventId};

/// Scrollable event list with a cursor and the current selection marked.
pub struct EventList<'a> {
    events: &'a [&'a Event],
    cursor: usize,
    selected: Option<&'a EventId>,
}

impl<'a> EventList<'a> {
    pub fn new(events: &'a [&'a Event], cursor: usize) -> Self {
        Self {
            events,
            cursor,
            selected: None,
        }
    }

    #[must_use]
    pub fn selected(mut self, id: Option<&'a EventId>) -> Self {
        self.selected = id;
        self
    }
}

/// First row to show so that `cursor` stays within `height` rows.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}

impl Widget for EventList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Events ({}) ", self.events.len()))
            .title_style(Styles::heading())
            .borders(Borders::ALL)
            .border_style(Styles::frame())
            .style(Styles::base());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.events.is_empty() {
            Paragraph::new(" No events in this window")
                .style(Styles::dim())
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let offset = scroll_offset(self.cursor, height);
        let lines: Vec<Line<'_>> = self
            .events
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, event)| {
                let is_selected = self.selected == Some(&event.id);
                let is_cursor = i == self.cursor;
                let (mark, style) = match (is_cursor, is_selected) {
                    (_, true) => (Symbols::SELECTED, Styles::selected()),
                    (true, false) => (">", Styles::accent()),
                    (false, false) => (" ", Styles::base()),
                };
                Line::from(vec![
                    Span::styled(format!("{mark} "), style),
                    Span::styled(format!("{:<8}", short_label(event.date)), Styles::dim()),
                    Span::styled(event.place(), style),
                    Span::styled(format!(" - {}", event.kind()), Styles::dim()),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .style(Styles::base())
            .render(inner, buf);
    }
}
