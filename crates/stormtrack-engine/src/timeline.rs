//! Day-offset timeline behind the date slider.
//!
//! Slider value `v` stands for `anchor + v days`. The date window filter keeps
//! every event dated on or before that cutoff, so widening the window never
//! removes an event.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Short month names used for slider labels.
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Inclusive range of slider values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
}

impl SliderRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `delta`, staying inside the range.
    pub fn step(&self, value: u32, delta: i64) -> u32 {
        let moved = i64::from(value).saturating_add(delta);
        let bounded = moved.clamp(i64::from(self.min), i64::from(self.max));
        u32::try_from(bounded).unwrap_or(self.max)
    }

    pub fn values(&self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }

    /// Position of `value` within the range, from 0.0 to 1.0.
    pub fn ratio(&self, value: u32) -> f64 {
        if self.max == self.min {
            return 1.0;
        }
        f64::from(self.clamp(value) - self.min) / f64::from(self.max - self.min)
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::new(0, 32)
    }
}

/// Anchor date plus slider range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub anchor: NaiveDate,
    pub range: SliderRange,
}

impl Timeline {
    pub fn new(anchor: NaiveDate, range: SliderRange) -> Self {
        Self { anchor, range }
    }

    /// Anchor on the first date of `span` and stretch the range to the last.
    ///
    /// A single-day span still gets a one-step slider.
    pub fn from_span(first: NaiveDate, last: NaiveDate) -> Self {
        let days = (last - first).num_days().max(1);
        let max = u32::try_from(days).unwrap_or(u32::MAX);
        Self::new(first, SliderRange::new(0, max))
    }

    /// Date represented by slider value `value`.
    pub fn cutoff(&self, value: u32) -> NaiveDate {
        self.anchor
            .checked_add_days(Days::new(u64::from(value)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Short label for `value`, e.g. "Sept 20".
    pub fn label(&self, value: u32) -> String {
        short_label(self.cutoff(value))
    }

    /// Whether `event` falls inside the window for `value`.
    pub fn includes(&self, event: &Event, value: u32) -> bool {
        event.date <= self.cutoff(value)
    }

    /// Indices of events inside the window for `value`, in source order.
    pub fn filter_indices(&self, events: &[Event], value: u32) -> Vec<usize> {
        let cutoff = self.cutoff(value);
        events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.date <= cutoff)
            .map(|(i, _)| i)
            .collect()
    }

    /// Events inside the window for `value`, in source order.
    pub fn filter_events<'a>(&self, events: &'a [Event], value: u32) -> Vec<&'a Event> {
        let cutoff = self.cutoff(value);
        events.iter().filter(|e| e.date <= cutoff).collect()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(
            NaiveDate::from_ymd_opt(2024, 9, 20).unwrap_or_default(),
            SliderRange::default(),
        )
    }
}

/// "Sept 20" style label.
pub fn short_label(date: NaiveDate) -> String {
    let month = SHORT_MONTHS[date.month0() as usize];
    format!("{month} {}", date.day())
}

/// "September 20, 2024" style label.
pub fn long_label(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
