//! Map screen: date slider, event markers on a world map, the event list and
//! the details panel for the selected event.

use crate::app::{App, LoadStatus};
use crate::screens::Screen;
use crate::ui::map_layout;
use crate::ui::theme::{spinner, Palette, Styles, Symbols};
use crate::ui::widgets::{DateSlider, DetailsPanel, EventList, KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph, Widget,
    },
};

/// The map screen.
pub struct MapScreen;

impl Screen for MapScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let selected = app.view.selected();
        let layout = map_layout(area, selected.is_some());

        render_title(app, layout.title, buf);

        DateSlider::new(app.view.timeline(), app.view.slider_value())
            .visible(app.view.filtered_len())
            .render(layout.slider, buf);

        render_map(app, layout.map, buf);

        let visible = app.visible_events();
        EventList::new(&visible, app.cursor)
            .selected(selected.map(|e| &e.id))
            .render(layout.list, buf);

        if let (Some(event), Some(details_area)) = (selected, layout.details) {
            DetailsPanel::new(event).render(details_area, buf);
        }

        render_status_bar(app, layout.status, buf);
    }
}

fn render_title(app: &App, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled(app.config.title.as_str(), Styles::heading()),
        Span::styled(format!("  {}", app.config.source), Styles::dim()),
    ]))
    .alignment(Alignment::Center)
    .style(Styles::base())
    .render(area, buf);
}

fn render_map(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Map ")
        .title_style(Styles::heading())
        .borders(Borders::ALL)
        .border_style(Styles::frame())
        .style(Styles::base());
    let inner = block.inner(area);

    let markers: Vec<(f64, f64, &str)> = app
        .view
        .filtered()
        .map(|e| (e.position.lon, e.position.lat, e.kind()))
        .collect();
    let cursor = app
        .cursor_event()
        .map(|e| (e.position.lon, e.position.lat));
    // The details panel may outlive the window; the marker does not.
    let selected = app
        .view
        .selected()
        .filter(|sel| app.view.filtered().any(|e| e.id == sel.id))
        .map(|e| (e.position.lon, e.position.lat));

    Canvas::default()
        .block(block)
        .background_color(Palette::SURFACE)
        .marker(Marker::Braille)
        .x_bounds(app.viewport.x_bounds())
        .y_bounds(app.viewport.y_bounds(inner.width, inner.height))
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Palette::COAST,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for &(x, y, kind) in &markers {
                ctx.print(x, y, Span::styled(Symbols::MARKER, Styles::marker(kind)));
            }
            if let Some((x, y)) = cursor {
                ctx.print(x, y, Span::styled(Symbols::CURSOR, Styles::accent()));
            }
            if let Some((x, y)) = selected {
                ctx.print(x, y, Span::styled(Symbols::SELECTED, Styles::selected()));
            }
        })
        .render(area, buf);
}

fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let hints = vec![
        KeyHint::new("h/l", "Date"),
        KeyHint::new("j/k", "Events"),
        KeyHint::new("Enter", "Details"),
        KeyHint::new("?", "Help"),
        KeyHint::new("q", "Quit"),
    ];

    let (status_text, style) = match &app.load_status {
        LoadStatus::Idle => ("Waiting".to_string(), Styles::bar()),
        LoadStatus::Loading => (
            format!("{} Loading", spinner(app.tick)),
            Styles::caution(),
        ),
        LoadStatus::Loaded { accepted, rejected } => {
            let mut text = format!("{accepted} events");
            if *rejected > 0 {
                text.push_str(&format!(" ({rejected} skipped)"));
            }
            (text, Styles::ok())
        }
        LoadStatus::Failed(message) => (format!("Load failed: {message}"), Styles::failure()),
    };

    let right = app.notification.as_deref().unwrap_or(&status_text);
    StatusBar::new("Map")
        .hints(hints)
        .right_styled(right, style)
        .render(area, buf);
}
