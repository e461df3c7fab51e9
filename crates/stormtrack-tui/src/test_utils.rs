//! Test utilities for stormtrack-tui rendering and navigation tests.

use crate::app::App;
use crate::screens::Screen as ScreenTrait;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use stormtrack_engine::{normalize_all, parse_records, Config, EventSet};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Four usable reports and one row without a latitude.
pub const SAMPLE_CSV: &str = "\
lat,lon,city,state,event,date-of-event,summary,event-picture-link,event-picture-caption,source,article_url
30.1179,-83.5818,Perry,Florida,Landfall,2024-09-20,Helene makes landfall in the Big Bend,,,,
30.4383,-84.2807,Tallahassee,Florida,Flooding,2024-09-25,Streets flooded downtown,https://example.com/flood.jpg,Flooded street downtown,AP News,https://apnews.com/article/flooding
35.5951,-82.5515,Asheville,North Carolina,River flooding,2024-09-27,French Broad River crests,,,,
,-81.6746,Charleston,West Virginia,Rain,2024-09-28,Missing coordinates,,,,
36.1627,-86.7816,Nashville,Tennessee,Recovery,2024-10-02,Relief convoys arrive,,,,
";

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(TEST_WIDTH, TEST_HEIGHT))
        .expect("Failed to create test terminal")
}

/// Normalized [`SAMPLE_CSV`].
pub fn sample_events() -> EventSet {
    normalize_all(&parse_records(SAMPLE_CSV).expect("sample csv parses"))
}

/// Create a test app with the sample events loaded and the default config.
pub fn create_test_app() -> App {
    App::with_events(Config::default(), sample_events())
}

/// Convert a buffer to a string representation for snapshot testing.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    render_screen_to_string_sized(screen, app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render a screen to a buffer and return it as a string with custom dimensions.
pub fn render_screen_to_string_sized<S: ScreenTrait>(
    screen: &S,
    app: &App,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_sample_events_shape() {
        let set = sample_events();
        assert_eq!(set.len(), 4);
        assert_eq!(set.rejected.len(), 1);
        assert_eq!(set.events[0].city.as_deref(), Some("Perry"));
        assert_eq!(set.events[1].city.as_deref(), Some("Tallahassee"));
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
