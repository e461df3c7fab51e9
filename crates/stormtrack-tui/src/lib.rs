//! stormtrack-tui: terminal map viewer for storm event reports
//!
//! This crate provides the interactive layer over `stormtrack-engine`:
//! - A world map with event markers inside the current date window
//! - A day slider anchored at the configured date
//! - An event list and a details panel for the selected event

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, LoadStatus, Viewport};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use stormtrack_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use stormtrack_engine::{Config, EventSet, LoadError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, loads events from the configured source in the
/// background, runs the event loop and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    info!(source = %app.source(), "starting tui");

    // 4 Hz tick rate
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut load_handle: Option<JoinHandle<Result<EventSet, LoadError>>> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            screens::map::MapScreen.render(app, area, buf);
            if app.show_help {
                screens::render_help_overlay(area, buf);
            }
        })?;

        // Collect a finished load (non-blocking)
        if load_handle.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = load_handle.take() {
                match handle.await {
                    Ok(result) => app.finish_load(result),
                    Err(e) => {
                        warn!(error = %e, "load task failed");
                        app.load_status = LoadStatus::Failed(e.to_string());
                    }
                }
            }
        }

        if load_handle.is_none() && app.take_load_request() {
            let source = app.source();
            load_handle = Some(tokio::spawn(async move {
                stormtrack_engine::load_events(&source).await
            }));
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => app.handle_action(key_to_action(key)),
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::Up),
                        MouseEventKind::ScrollDown => app.handle_action(Action::Down),
                        _ => {}
                    }
                }
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = load_handle {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::map::MapScreen;
    use crate::test_utils::{
        buffer_to_string, create_test_app, create_test_terminal, render_screen_to_string,
        sample_events,
    };

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.contains('.'));
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = create_test_app();
        assert!(!app.show_help);

        app.handle_action(Action::Help);
        assert!(app.show_help);

        // Any other key closes help without acting.
        app.handle_action(Action::Later);
        assert!(!app.show_help);
        assert_eq!(app.view.slider_value(), 0);
    }

    #[test]
    fn test_help_closes_before_quit() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_renders_over_map() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();
        terminal
            .draw(|frame| {
                let area = frame.area();
                let buf = frame.buffer_mut();
                MapScreen.render(&app, area, buf);
                screens::render_help_overlay(area, buf);
            })
            .unwrap();
        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("Help"));
        assert!(text.contains("One week earlier/later"));
    }

    #[test]
    fn test_slider_steps_update_list() {
        let mut app = create_test_app();
        assert_eq!(app.view.filtered_len(), 1);

        for _ in 0..5 {
            app.handle_action(Action::Later);
        }
        assert_eq!(app.view.slider_value(), 5);
        assert_eq!(app.view.filtered_len(), 2);

        app.handle_action(Action::WeekLater);
        assert_eq!(app.view.slider_value(), 12);
        assert_eq!(app.view.filtered_len(), 4);

        app.handle_action(Action::WeekEarlier);
        app.handle_action(Action::WeekEarlier);
        assert_eq!(app.view.slider_value(), 0);
    }

    #[test]
    fn test_selection_survives_slider_but_not_reload() {
        let mut app = create_test_app();
        app.handle_action(Action::Later);
        app.handle_action(Action::Select);
        let perry = app.view.selected().map(|e| e.id.clone());
        assert!(perry.is_some());

        // Still selected with a wider window.
        app.handle_action(Action::Last);
        assert_eq!(app.view.selected().map(|e| e.id.clone()), perry);

        // Same data reloaded keeps ids stable, so the selection stays.
        app.finish_load(Ok(sample_events()));
        assert_eq!(app.view.selected().map(|e| e.id.clone()), perry);

        // A replacement without that event drops it.
        let mut others = sample_events();
        others.events.remove(0);
        app.finish_load(Ok(others));
        assert!(app.view.selected().is_none());
    }

    #[test]
    fn test_select_then_back_closes_details() {
        let mut app = create_test_app();
        app.handle_action(Action::Select);
        assert!(app.view.selected().is_some());
        app.handle_action(Action::Back);
        assert!(app.view.selected().is_none());

        let text = render_screen_to_string(&MapScreen, &app);
        assert!(!text.contains("Event Details"));
    }

    #[test]
    fn test_action_none_does_nothing() {
        let mut app = create_test_app();
        let before = (app.view.slider_value(), app.cursor, app.viewport);
        app.handle_action(Action::None);
        assert_eq!((app.view.slider_value(), app.cursor, app.viewport), before);
        assert!(!app.should_quit);
    }
}
