//! View state: the loaded events, the slider value and the selection.
//!
//! `filtered` is derived from `events` and `slider_value` and recomputed only
//! when one of them changes. The selection is independent of the filter.

use tracing::debug;

use crate::event::{Event, EventId};
use crate::normalize::EventSet;
use crate::timeline::Timeline;

/// State behind the map screen.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    timeline: Timeline,
    events: EventSet,
    slider_value: u32,
    selected: Option<EventId>,
    filtered: Vec<usize>,
}

impl ViewState {
    /// Empty state with the slider at the start of `timeline`.
    pub fn new(timeline: Timeline) -> Self {
        Self {
            slider_value: timeline.range.min,
            timeline,
            ..Self::default()
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn events(&self) -> &EventSet {
        &self.events
    }

    pub fn slider_value(&self) -> u32 {
        self.slider_value
    }

    /// Date represented by the current slider value.
    pub fn cutoff_label(&self) -> String {
        self.timeline.label(self.slider_value)
    }

    /// Replace the whole event set (initial load or reload).
    ///
    /// A selection that no longer exists in the new set is dropped.
    pub fn replace_events(&mut self, events: EventSet) {
        self.events = events;
        if let Some(id) = &self.selected {
            if self.events.get(id).is_none() {
                self.selected = None;
            }
        }
        self.recompute();
    }

    /// Replace the timeline, keeping the slider inside the new range.
    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.timeline = timeline;
        self.slider_value = timeline.range.clamp(self.slider_value);
        self.recompute();
    }

    /// Set the slider, clamped to the range.
    pub fn set_slider(&mut self, value: u32) {
        let value = self.timeline.range.clamp(value);
        if value != self.slider_value {
            self.slider_value = value;
            self.recompute();
        }
    }

    /// Move the slider by `delta` days.
    pub fn step_slider(&mut self, delta: i64) {
        self.set_slider(self.timeline.range.step(self.slider_value, delta));
    }

    /// Events inside the current date window, in source order.
    pub fn filtered(&self) -> impl ExactSizeIterator<Item = &Event> + '_ {
        self.filtered.iter().map(|&i| &self.events.events[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Select `id`, replacing any previous selection.
    ///
    /// Returns `false` (and leaves the selection alone) for unknown ids.
    pub fn select(&mut self, id: &EventId) -> bool {
        if self.events.get(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.as_ref().and_then(|id| self.events.get(id))
    }

    fn recompute(&mut self) {
        self.filtered = self
            .timeline
            .filter_indices(&self.events.events, self.slider_value);
        debug!(
            slider = self.slider_value,
            visible = self.filtered.len(),
            total = self.events.len(),
            "recomputed date window"
        );
    }
}
