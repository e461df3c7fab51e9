//! Application state and update logic for the stormtrack TUI.

use crate::event::Action;
use stormtrack_engine::{Config, Event, EventSet, LoadError, MapConfig, Source, ViewState};
use tracing::info;

/// Smallest and largest map width in degrees of longitude.
const MIN_SPAN: f64 = 0.5;
const MAX_SPAN: f64 = 360.0;

/// Progress of the event data load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load task is running.
    Loading,
    /// The last load finished.
    Loaded { accepted: usize, rejected: usize },
    /// The last load failed; the event collection is empty.
    Failed(String),
}

/// Visible part of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Width in degrees of longitude.
    pub span: f64,
}

impl Viewport {
    /// Longitude bounds.
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.span / 2.0;
        [self.center_lon - half, self.center_lon + half]
    }

    /// Latitude bounds for a canvas of `width` x `height` cells.
    ///
    /// Terminal cells are roughly twice as tall as they are wide.
    pub fn y_bounds(&self, width: u16, height: u16) -> [f64; 2] {
        let aspect = if width == 0 {
            1.0
        } else {
            f64::from(height) * 2.0 / f64::from(width)
        };
        let half = (self.span * aspect / 2.0).min(90.0);
        [
            (self.center_lat - half).max(-90.0),
            (self.center_lat + half).min(90.0),
        ]
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        let step = self.span / 8.0;
        self.center_lon = (self.center_lon + dx * step).clamp(-180.0, 180.0);
        self.center_lat = (self.center_lat + dy * step).clamp(-90.0, 90.0);
    }

    fn zoom(&mut self, factor: f64) {
        self.span = (self.span * factor).clamp(MIN_SPAN, MAX_SPAN);
    }
}

impl From<MapConfig> for Viewport {
    fn from(map: MapConfig) -> Self {
        Self {
            center_lat: map.center_lat,
            center_lon: map.center_lon,
            span: map.span_degrees.clamp(MIN_SPAN, MAX_SPAN),
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Loaded configuration.
    pub config: Config,

    /// Events, slider value and selection.
    pub view: ViewState,

    /// Progress of the data load.
    pub load_status: LoadStatus,

    /// Index into [`App::visible_events`] of the highlighted list entry.
    pub cursor: usize,

    /// Current map viewport.
    pub viewport: Viewport,

    /// Viewport restored by [`Action::ResetView`].
    home: Viewport,

    /// Tick counter for animations.
    pub tick: usize,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Whether the event loop should start a load task.
    load_requested: bool,
}

impl App {
    /// Create a new app; the first load is requested but not started.
    pub fn new(config: Config) -> Self {
        let view = ViewState::new(config.timeline());
        let viewport = Viewport::from(config.map);
        Self {
            should_quit: false,
            show_help: false,
            config,
            view,
            load_status: LoadStatus::Idle,
            cursor: 0,
            viewport,
            home: viewport,
            tick: 0,
            notification: None,
            notification_ttl: 0,
            load_requested: true,
        }
    }

    /// Create an app with `events` already loaded.
    pub fn with_events(config: Config, events: EventSet) -> Self {
        let mut app = Self::new(config);
        app.finish_load(Ok(events));
        app
    }

    /// Data source from the configuration.
    pub fn source(&self) -> Source {
        self.config.source()
    }

    /// Returns true (once) when the event loop should spawn a load task.
    pub fn take_load_request(&mut self) -> bool {
        if self.load_requested && self.load_status != LoadStatus::Loading {
            self.load_requested = false;
            self.load_status = LoadStatus::Loading;
            true
        } else {
            false
        }
    }

    /// Apply the result of a load task.
    pub fn finish_load(&mut self, result: Result<EventSet, LoadError>) {
        self.load_requested = false;
        match result {
            Ok(events) => {
                self.load_status = LoadStatus::Loaded {
                    accepted: events.len(),
                    rejected: events.rejected.len(),
                };
                let home = Viewport::from(self.config.map_for(&events));
                if self.viewport == self.home {
                    self.viewport = home;
                }
                self.home = home;
                let timeline = self.config.timeline_for(&events);
                self.keep_cursor(|view| {
                    view.set_timeline(timeline);
                    view.replace_events(events);
                });
            }
            Err(e) => {
                self.load_status = LoadStatus::Failed(e.to_string());
                self.keep_cursor(|view| view.replace_events(EventSet::default()));
            }
        }
    }

    /// Events in the current date window, newest first.
    pub fn visible_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.view.filtered().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date).then(a.row.cmp(&b.row)));
        events
    }

    /// The event under the list cursor.
    pub fn cursor_event(&self) -> Option<&Event> {
        self.visible_events().get(self.cursor).copied()
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Back => self.view.clear_selection(),
            Action::Select => self.select_cursor(),
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => {
                if self.cursor + 1 < self.view.filtered_len() {
                    self.cursor += 1;
                }
            }
            Action::Earlier => self.step_slider(-1),
            Action::Later => self.step_slider(1),
            Action::WeekEarlier => self.step_slider(-7),
            Action::WeekLater => self.step_slider(7),
            Action::First => self.set_slider(self.view.timeline().range.min),
            Action::Last => self.set_slider(self.view.timeline().range.max),
            Action::PanLeft => self.viewport.pan(-1.0, 0.0),
            Action::PanRight => self.viewport.pan(1.0, 0.0),
            Action::PanUp => self.viewport.pan(0.0, 1.0),
            Action::PanDown => self.viewport.pan(0.0, -1.0),
            Action::ZoomIn => self.viewport.zoom(0.5),
            Action::ZoomOut => self.viewport.zoom(2.0),
            Action::ResetView => self.viewport = self.home,
            Action::Reload => self.request_reload(),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    fn select_cursor(&mut self) {
        let Some(id) = self.cursor_event().map(|e| e.id.clone()) else {
            return;
        };
        if self.view.select(&id) {
            info!(event = %id, "selected event");
        }
    }

    fn step_slider(&mut self, delta: i64) {
        self.keep_cursor(|view| view.step_slider(delta));
    }

    fn set_slider(&mut self, value: u32) {
        self.keep_cursor(|view| view.set_slider(value));
    }

    /// Apply `change` to the view with the cursor staying on the same event.
    ///
    /// When that event leaves the window the index is clamped instead.
    fn keep_cursor(&mut self, change: impl FnOnce(&mut ViewState)) {
        let highlighted = self.cursor_event().map(|e| e.id.clone());
        change(&mut self.view);
        let found = highlighted.and_then(|id| {
            self.visible_events().iter().position(|e| e.id == id)
        });
        self.cursor = found.unwrap_or_else(|| {
            self.cursor.min(self.view.filtered_len().saturating_sub(1))
        });
    }

    fn request_reload(&mut self) {
        if self.load_status == LoadStatus::Loading {
            self.notify("Load already in progress");
        } else {
            self.load_requested = true;
            self.notify("Reloading events");
        }
    }

    /// Show a temporary notification.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = 12;
    }

    /// Advance animations and expire notifications.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}
