//! Details panel for the selected event.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use stormtrack_engine::{long_label, Event};

pub struct DetailsPanel<'a> {
    event: &'a Event,
}

impl<'a> DetailsPanel<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self { event }
    }

    /// Text lines of the panel, without the border.
    pub fn lines(&self) -> Vec<Line<'a>> {
        let event = self.event;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(event.place(), Styles::accent()),
                Span::styled(format!("  {}", event.kind()), Styles::caution()),
            ]),
            Line::from(vec![
                Span::styled("Date: ", Styles::dim()),
                Span::raw(long_label(event.date)),
                Span::styled(
                    format!(
                        "  ({:.4}, {:.4})",
                        event.position.lat, event.position.lon
                    ),
                    Styles::dim(),
                ),
            ]),
        ];

        if let Some(summary) = &event.summary {
            lines.push(Line::raw(summary.as_str()));
        }
        if let Some(link) = &event.picture_link {
            lines.push(Line::from(vec![
                Span::styled("Picture: ", Styles::dim()),
                Span::raw(link.as_str()),
            ]));
        }
        if let Some(caption) = &event.picture_caption {
            lines.push(Line::styled(
                caption.as_str(),
                Styles::dim().add_modifier(Modifier::ITALIC),
            ));
        }
        if let Some(source) = &event.source {
            lines.push(Line::from(vec![
                Span::styled("Source: ", Styles::dim()),
                Span::raw(source.as_str()),
            ]));
        }
        if let Some(url) = &event.article_url {
            lines.push(Line::from(vec![
                Span::styled("Article: ", Styles::dim()),
                Span::styled(url.as_str(), Styles::heading()),
            ]));
        }
        lines
    }
}

impl Widget for DetailsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Event Details ")
            .title_style(Styles::heading())
            .title_bottom(Line::styled(" Esc close ", Styles::dim()))
            .borders(Borders::ALL)
            .border_style(Styles::frame_focus())
            .style(Styles::base());

        Paragraph::new(self.lines())
            .block(block)
            .style(Styles::base())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, sample_events};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lines_include_all_present_fields() {
        let set = sample_events();
        let panel = DetailsPanel::new(&set.events[1]);
        let text: Vec<String> = panel.lines().iter().map(line_text).collect();

        assert_eq!(text[0], "Tallahassee, Florida  Flooding");
        assert!(text[1].starts_with("Date: September 25, 2024"));
        assert!(text.iter().any(|l| l == "Picture: https://example.com/flood.jpg"));
        assert!(text.iter().any(|l| l == "Flooded street downtown"));
        assert!(text.iter().any(|l| l == "Source: AP News"));
        assert!(text
            .iter()
            .any(|l| l == "Article: https://apnews.com/article/flooding"));
    }

    #[test]
    fn test_lines_skip_absent_fields() {
        let set = sample_events();
        // Perry has no picture or article.
        let text: Vec<String> = DetailsPanel::new(&set.events[0])
            .lines()
            .iter()
            .map(line_text)
            .collect();
        assert!(!text.iter().any(|l| l.starts_with("Picture:")));
        assert!(!text.iter().any(|l| l.starts_with("Article:")));
    }

    #[test]
    fn test_render_has_title() {
        let set = sample_events();
        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buffer::empty(area);
        DetailsPanel::new(&set.events[1]).render(area, &mut buf);
        let text = buffer_to_string(&buf);
        assert!(text.contains("Event Details"));
        assert!(text.contains("Tallahassee, Florida"));
    }
}
