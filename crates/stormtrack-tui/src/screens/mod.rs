//! Screen definitions for the stormtrack TUI.

pub mod map;

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::Styles;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Date window
    Left/Right  h/l     One day earlier/later
    PgUp/PgDn           One week earlier/later
    Home/End            First/last day

  Events
    Up/Down  k/j        Move cursor
    Enter               Show details
    Esc or c            Close details

  Map
    Shift+Arrows  HJKL  Pan
    + / -               Zoom in/out
    0                   Reset view

  r reload   q quit   ? toggle help
";

    let width = 52.min(area.width.saturating_sub(4));
    let height = 22.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::heading())
        .borders(Borders::ALL)
        .border_style(Styles::frame_focus())
        .style(Styles::base());

    Paragraph::new(help_text)
        .block(block)
        .style(Styles::base())
        .render(overlay_area, buf);
}
