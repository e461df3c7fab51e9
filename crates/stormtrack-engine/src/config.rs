//! Configuration types for the stormtrack engine.
//!
//! This module defines the configuration schema: where the event data comes
//! from, how the slider timeline is anchored, and the initial map viewport.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::loader::Source;
use crate::normalize::EventSet;
use crate::timeline::{SliderRange, Timeline};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stormtrack.json";

/// Main configuration for stormtrack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// CSV location: a file path or an `http(s)://` URL.
    #[serde(default = "default_source")]
    pub source: String,

    /// Title shown above the map.
    #[serde(default = "default_title")]
    pub title: String,

    /// Start of the tracked period (slider value 0).
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,

    /// How the anchor date and slider range are chosen.
    #[serde(default)]
    pub anchor_mode: AnchorMode,

    /// Largest slider value, in days after the anchor.
    #[serde(default = "default_slider_max")]
    pub slider_max: u32,

    /// Initial map viewport.
    #[serde(default)]
    pub map: MapConfig,
}

fn default_source() -> String {
    "events.csv".into()
}

fn default_title() -> String {
    "Hurricane Helene News Tracker".into()
}

fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 20).unwrap_or_default()
}

fn default_slider_max() -> u32 {
    32
}

/// Anchor selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Use `anchor_date` and `slider_max` as configured.
    #[default]
    Fixed,
    /// Anchor on the earliest event date and stretch the slider to the latest.
    DataStart,
}

/// Map viewport configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude of the viewport center.
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    /// Longitude of the viewport center.
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    /// Width of the viewport in degrees of longitude.
    #[serde(default = "default_span_degrees")]
    pub span_degrees: f64,
}

fn default_center_lat() -> f64 {
    30.4513
}

fn default_center_lon() -> f64 {
    -84.2727
}

fn default_span_degrees() -> f64 {
    16.0
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            span_degrees: default_span_degrees(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from a file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// The parsed data source.
    pub fn source(&self) -> Source {
        Source::parse(&self.source)
    }

    /// The configured timeline, before any data-derived adjustment.
    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.anchor_date, SliderRange::new(0, self.slider_max))
    }

    /// The timeline to use for `events`, honoring `anchor_mode`.
    pub fn timeline_for(&self, events: &EventSet) -> Timeline {
        match (self.anchor_mode, events.date_span()) {
            (AnchorMode::DataStart, Some((first, last))) => Timeline::from_span(first, last),
            _ => self.timeline(),
        }
    }

    /// The map viewport to use for `events`.
    ///
    /// In `data_start` mode the map is centered on the mean event position;
    /// the span is always the configured one.
    #[allow(clippy::cast_precision_loss)]
    pub fn map_for(&self, events: &EventSet) -> MapConfig {
        match self.anchor_mode {
            AnchorMode::DataStart if !events.is_empty() => {
                let n = events.len() as f64;
                let (lat, lon) = events.events.iter().fold((0.0, 0.0), |(lat, lon), e| {
                    (lat + e.position.lat, lon + e.position.lon)
                });
                MapConfig {
                    center_lat: lat / n,
                    center_lon: lon / n,
                    ..self.map
                }
            }
            _ => self.map,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            title: default_title(),
            anchor_date: default_anchor_date(),
            anchor_mode: AnchorMode::default(),
            slider_max: default_slider_max(),
            map: MapConfig::default(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source, "events.csv");
        assert_eq!(config.anchor_date.to_string(), "2024-09-20");
        assert_eq!(config.anchor_mode, AnchorMode::Fixed);
        assert_eq!(config.slider_max, 32);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"source":"https://example.com/events.csv","slider_max":10}"#)
                .unwrap();
        assert_eq!(config.slider_max, 10);
        assert_eq!(config.title, "Hurricane Helene News Tracker");
        assert!(matches!(config.source(), Source::Url(_)));
        assert!((config.map.center_lat - 30.4513).abs() < f64::EPSILON);
    }

    #[test]
    fn test_anchor_mode_snake_case() {
        let config: Config = serde_json::from_str(r#"{"anchor_mode":"data_start"}"#).unwrap();
        assert_eq!(config.anchor_mode, AnchorMode::DataStart);
    }

    #[test]
    fn test_timeline_for_data_start() {
        use crate::normalize::normalize_all;
        use crate::record::RawRecord;

        let events = normalize_all(&[
            RawRecord::new(0, [("lat", "30"), ("lon", "-84"), ("date", "2024-09-24")]),
            RawRecord::new(1, [("lat", "35"), ("lon", "-82"), ("date", "2024-10-01")]),
        ]);

        let fixed = Config::default().timeline_for(&events);
        assert_eq!(fixed.anchor.to_string(), "2024-09-20");
        assert_eq!(fixed.range.max, 32);

        let config = Config {
            anchor_mode: AnchorMode::DataStart,
            ..Config::default()
        };
        let derived = config.timeline_for(&events);
        assert_eq!(derived.anchor.to_string(), "2024-09-24");
        assert_eq!(derived.range.max, 7);

        // No data: fall back to the configured anchor.
        assert_eq!(config.timeline_for(&EventSet::default()), config.timeline());
    }

    #[test]
    fn test_map_for_data_start_uses_mean_position() {
        use crate::normalize::normalize_all;
        use crate::record::RawRecord;

        let events = normalize_all(&[
            RawRecord::new(0, [("lat", "30"), ("lon", "-84"), ("date", "2024-09-24")]),
            RawRecord::new(1, [("lat", "36"), ("lon", "-82"), ("date", "2024-10-01")]),
        ]);

        assert_eq!(Config::default().map_for(&events), MapConfig::default());

        let config = Config {
            anchor_mode: AnchorMode::DataStart,
            ..Config::default()
        };
        let map = config.map_for(&events);
        assert!((map.center_lat - 33.0).abs() < f64::EPSILON);
        assert!((map.center_lon - -83.0).abs() < f64::EPSILON);
        assert!((map.span_degrees - 16.0).abs() < f64::EPSILON);

        assert_eq!(config.map_for(&EventSet::default()), MapConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        let mut config = Config::default();
        config.title = "Milton".into();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }
}
