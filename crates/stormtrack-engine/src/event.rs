//! Normalized event records.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::record::RawRecord;

/// Stable identifier of an event within one loaded set.
///
/// Derived from the source row index and a hash of the row content, so the
/// same file always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Derive the id for `record`.
    pub fn derive(record: &RawRecord) -> Self {
        let mut hasher = Sha256::new();
        for (name, value) in record.iter() {
            hasher.update(name.as_bytes());
            hasher.update([0x1f]);
            hasher.update(value.as_bytes());
            hasher.update([0x1e]);
        }
        let digest = hasher.finalize();
        let short: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
        Self(format!("r{}-{short}", record.row))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// A hurricane-related incident report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: EventId,
    /// Zero-based source row.
    pub row: usize,
    pub position: Position,
    pub date: NaiveDate,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Kind of incident, e.g. "Flooding".
    pub event: Option<String>,
    pub summary: Option<String>,
    pub picture_link: Option<String>,
    pub picture_caption: Option<String>,
    pub source: Option<String>,
    pub article_url: Option<String>,
}

impl Event {
    /// "City, State" with whichever parts are present.
    pub fn place(&self) -> String {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => "Unknown location".to_string(),
        }
    }

    /// Event type, or a generic label.
    pub fn kind(&self) -> &str {
        self.event.as_deref().unwrap_or("Event")
    }
}
