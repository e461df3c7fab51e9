//! Writing normalized events back out as CSV.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::event::Event;

/// Column order of the event data files.
pub const CANONICAL_HEADER: [&str; 11] = [
    "city",
    "state",
    "event",
    "summary",
    "article_url",
    "source",
    "date-of-event",
    "event-picture-caption",
    "event-picture-link",
    "lat",
    "lon",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn row_for(event: &Event) -> [String; 11] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        text(&event.city),
        text(&event.state),
        text(&event.event),
        text(&event.summary),
        text(&event.article_url),
        text(&event.source),
        event.date.format("%Y-%m-%d").to_string(),
        text(&event.picture_caption),
        text(&event.picture_link),
        event.position.lat.to_string(),
        event.position.lon.to_string(),
    ]
}

/// Write `events` with the canonical header to `writer`.
pub fn write_events<'a, W: Write>(
    writer: W,
    events: impl IntoIterator<Item = &'a Event>,
) -> Result<usize, ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CANONICAL_HEADER)?;
    let mut count = 0;
    for event in events {
        out.write_record(row_for(event))?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}

/// Write `events` to the file at `path`, replacing it.
pub fn export_to_path<'a>(
    path: &Path,
    events: impl IntoIterator<Item = &'a Event>,
) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_events(std::io::BufWriter::new(file), events)
}
