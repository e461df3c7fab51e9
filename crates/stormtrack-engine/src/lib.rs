//! stormtrack-engine: Headless core of the storm event map
//!
//! This crate provides everything below the UI:
//! - Configuration
//! - Loading the event CSV from a file or URL
//! - Normalizing rows into typed events
//! - The day-offset timeline and date window filter
//! - View state (slider, selection, filtered events)
//! - CSV export

pub mod config;
pub mod event;
pub mod export;
pub mod loader;
pub mod normalize;
pub mod record;
pub mod timeline;
pub mod view;

// Re-export commonly used types
pub use config::{AnchorMode, Config, ConfigError, MapConfig, DEFAULT_CONFIG_FILE};
pub use event::{Event, EventId, Position};
pub use export::{export_to_path, write_events, ExportError, CANONICAL_HEADER};
pub use loader::{fetch_text, load, parse_records, LoadError, Source};
pub use normalize::{normalize_all, normalize_record, parse_date, EventSet, RejectReason, Rejection};
pub use record::RawRecord;
pub use timeline::{long_label, short_label, SliderRange, Timeline};
pub use view::ViewState;

/// Load `source` and normalize every row.
pub async fn load_events(source: &Source) -> Result<EventSet, LoadError> {
    let records = load(source).await?;
    Ok(normalize_all(&records))
}

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
