//! Conversion of raw CSV rows into typed events.
//!
//! Each row produces at most one [`Event`]. Rows with missing or unusable
//! coordinates or dates are rejected with a [`RejectReason`] instead of being
//! carried along with placeholder values.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::event::{Event, EventId, Position};
use crate::record::RawRecord;

pub const LAT_COLUMNS: &[&str] = &["lat", "latitude"];
pub const LON_COLUMNS: &[&str] = &["lon", "lng", "long", "longitude"];
pub const DATE_COLUMNS: &[&str] = &["date-of-event", "date", "event_date"];
const CITY_COLUMNS: &[&str] = &["city", "name"];
const STATE_COLUMNS: &[&str] = &["state", "location"];
const EVENT_COLUMNS: &[&str] = &["event", "event_type", "type"];
const SUMMARY_COLUMNS: &[&str] = &["summary"];
const PICTURE_LINK_COLUMNS: &[&str] = &["event-picture-link", "picture_url", "image"];
const PICTURE_CAPTION_COLUMNS: &[&str] = &["event-picture-caption", "picture_caption", "caption"];
const SOURCE_COLUMNS: &[&str] = &["source"];
const ARTICLE_COLUMNS: &[&str] = &["article_url", "article-url", "link", "url"];

/// Accepted date formats, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y"];

/// Why a row did not become an event.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("{field} is not a number: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("unrecognized date: {0:?}")]
    InvalidDate(String),
}

/// A rejected source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub row: usize,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

/// The result of normalizing a whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventSet {
    /// Accepted events, in source order.
    pub events: Vec<Event>,
    pub rejected: Vec<Rejection>,
}

impl EventSet {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Earliest and latest event dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.events.iter().map(|e| e.date).min()?;
        let last = self.events.iter().map(|e| e.date).max()?;
        Some((first, last))
    }
}

/// Parse a date using [`DATE_FORMATS`].
pub fn parse_date(value: &str) -> Result<NaiveDate, RejectReason> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| RejectReason::InvalidDate(value.to_string()))
}

fn parse_coordinate(
    record: &RawRecord,
    columns: &[&str],
    field: &'static str,
    limit: f64,
) -> Result<f64, RejectReason> {
    let raw = record
        .first_of(columns)
        .ok_or(RejectReason::MissingField(field))?;
    let value: f64 = raw.parse().map_err(|_| RejectReason::InvalidCoordinate {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(RejectReason::InvalidCoordinate {
            field,
            value: raw.to_string(),
        });
    }
    if value.abs() > limit {
        return Err(RejectReason::OutOfRange {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn text(record: &RawRecord, columns: &[&str]) -> Option<String> {
    record.first_of(columns).map(str::to_string)
}

/// Normalize one row.
pub fn normalize_record(record: &RawRecord) -> Result<Event, RejectReason> {
    let lat = parse_coordinate(record, LAT_COLUMNS, "latitude", 90.0)?;
    let lon = parse_coordinate(record, LON_COLUMNS, "longitude", 180.0)?;
    let date = parse_date(
        record
            .first_of(DATE_COLUMNS)
            .ok_or(RejectReason::MissingField("date"))?,
    )?;

    Ok(Event {
        id: EventId::derive(record),
        row: record.row,
        position: Position { lat, lon },
        date,
        city: text(record, CITY_COLUMNS),
        state: text(record, STATE_COLUMNS),
        event: text(record, EVENT_COLUMNS),
        summary: text(record, SUMMARY_COLUMNS),
        picture_link: text(record, PICTURE_LINK_COLUMNS),
        picture_caption: text(record, PICTURE_CAPTION_COLUMNS),
        source: text(record, SOURCE_COLUMNS),
        article_url: text(record, ARTICLE_COLUMNS),
    })
}

/// Normalize every row, keeping source order and collecting rejections.
pub fn normalize_all(records: &[RawRecord]) -> EventSet {
    let mut set = EventSet::default();
    for record in records {
        match normalize_record(record) {
            Ok(event) => set.events.push(event),
            Err(reason) => {
                warn!(row = record.row, %reason, "skipping row");
                set.rejected.push(Rejection {
                    row: record.row,
                    reason,
                });
            }
        }
    }
    info!(
        accepted = set.events.len(),
        rejected = set.rejected.len(),
        "normalized event rows"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> RawRecord {
        RawRecord::new(0, fields.iter().copied())
    }

    #[test]
    fn test_valid_row_keeps_exact_position() {
        let event = normalize_record(&row(&[
            ("lat", "30.4"),
            ("lon", "-84.3"),
            ("date-of-event", "2024-09-25"),
            ("event", "Flooding"),
        ]))
        .unwrap();
        assert_eq!(event.position, Position { lat: 30.4, lon: -84.3 });
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap());
        assert_eq!(event.event.as_deref(), Some("Flooding"));
        assert_eq!(event.city, None);
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let event = normalize_record(&row(&[
            ("lat", "0"),
            ("lon", "0"),
            ("date", "2024-09-25"),
        ]))
        .unwrap();
        assert_eq!(event.position, Position { lat: 0.0, lon: 0.0 });
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let missing_lat = row(&[("lon", "-84.3"), ("date", "2024-09-25")]);
        assert_eq!(
            normalize_record(&missing_lat),
            Err(RejectReason::MissingField("latitude"))
        );

        let blank_lon = row(&[("lat", "30.4"), ("lon", "  "), ("date", "2024-09-25")]);
        assert_eq!(
            normalize_record(&blank_lon),
            Err(RejectReason::MissingField("longitude"))
        );
    }

    #[test]
    fn test_non_numeric_coordinates_rejected() {
        for bad in ["abc", "30.4N", "NaN", "inf"] {
            let record = row(&[("lat", bad), ("lon", "-84.3"), ("date", "2024-09-25")]);
            assert!(
                matches!(
                    normalize_record(&record),
                    Err(RejectReason::InvalidCoordinate { field: "latitude", .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let record = row(&[("lat", "30.4"), ("lon", "184.3"), ("date", "2024-09-25")]);
        assert!(matches!(
            normalize_record(&record),
            Err(RejectReason::OutOfRange { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 9, 27).unwrap();
        assert_eq!(parse_date("2024-09-27"), Ok(expected));
        assert_eq!(parse_date(" September 27, 2024 "), Ok(expected));
        assert_eq!(
            parse_date("27/09/2024"),
            Err(RejectReason::InvalidDate("27/09/2024".into()))
        );
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_missing_and_invalid_dates_rejected() {
        let missing = row(&[("lat", "30.4"), ("lon", "-84.3")]);
        assert_eq!(
            normalize_record(&missing),
            Err(RejectReason::MissingField("date"))
        );
        let invalid = row(&[("lat", "30.4"), ("lon", "-84.3"), ("date", "soon")]);
        assert_eq!(
            normalize_record(&invalid),
            Err(RejectReason::InvalidDate("soon".into()))
        );
    }

    #[test]
    fn test_column_aliases() {
        let event = normalize_record(&row(&[
            ("name", "Cedar Key"),
            ("location", "Florida"),
            ("latitude", "29.1386"),
            ("longitude", "-83.0351"),
            ("date", "2024-09-26"),
            ("article-url", "https://example.com/a"),
        ]))
        .unwrap();
        assert_eq!(event.place(), "Cedar Key, Florida");
        assert_eq!(event.article_url.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn test_normalize_all_keeps_order_and_reports() {
        let records = vec![
            RawRecord::new(0, [("lat", "30.1"), ("lon", "-83.5"), ("date", "2024-09-26")]),
            RawRecord::new(1, [("lat", ""), ("lon", "-83.5"), ("date", "2024-09-26")]),
            RawRecord::new(2, [("lat", "35.5"), ("lon", "-82.5"), ("date", "2024-09-27")]),
        ];
        let set = normalize_all(&records);
        let rows: Vec<_> = set.events.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![0, 2]);
        assert_eq!(set.rejected.len(), 1);
        assert_eq!(set.rejected[0].to_string(), "row 1: missing latitude");
    }

    #[test]
    fn test_ids_unique_within_set() {
        let same = [("lat", "30.1"), ("lon", "-83.5"), ("date", "2024-09-26")];
        let records: Vec<_> = (0..5).map(|i| RawRecord::new(i, same)).collect();
        let set = normalize_all(&records);
        let mut ids: Vec<_> = set.events.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_date_span() {
        let records = vec![
            RawRecord::new(0, [("lat", "1"), ("lon", "1"), ("date", "2024-09-29")]),
            RawRecord::new(1, [("lat", "1"), ("lon", "1"), ("date", "2024-09-22")]),
        ];
        let (first, last) = normalize_all(&records).date_span().unwrap();
        assert_eq!(first.to_string(), "2024-09-22");
        assert_eq!(last.to_string(), "2024-09-29");
        assert_eq!(EventSet::default().date_span(), None);
    }
}
