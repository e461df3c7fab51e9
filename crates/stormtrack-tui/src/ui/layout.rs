//! Layout helpers for the stormtrack TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Map screen regions.
#[derive(Debug, Clone, Copy)]
pub struct MapLayout {
    pub title: Rect,
    pub slider: Rect,
    pub map: Rect,
    pub list: Rect,
    /// Present only while an event is selected.
    pub details: Option<Rect>,
    pub status: Rect,
}

/// Split the screen: title, slider, map beside the event list, then the
/// details panel below when `with_details` is set.
pub fn map_layout(area: Rect, with_details: bool) -> MapLayout {
    let (main, status) = main_layout(area);

    let details_height = if with_details { 10 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Title
            Constraint::Length(4),              // Slider
            Constraint::Min(6),                 // Map + list
            Constraint::Length(details_height), // Details
        ])
        .split(main);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);

    MapLayout {
        title: rows[0],
        slider: rows[1],
        map: middle[0],
        list: middle[1],
        details: with_details.then_some(rows[3]),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(40, 40, area), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_map_layout_details_toggle() {
        let area = Rect::new(0, 0, 80, 30);
        let without = map_layout(area, false);
        assert!(without.details.is_none());
        assert_eq!(without.status.y, 29);

        let with = map_layout(area, true);
        let details = with.details.unwrap();
        assert_eq!(details.height, 10);
        assert!(with.map.height < without.map.height);
    }
}
