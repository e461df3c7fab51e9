//! Data loading: fetch the CSV resource and split it into raw records.
//!
//! A source is either a local path or an HTTP(S) URL. The text is decoded as
//! UTF-8 and parsed with the header-row convention: the first row names the
//! fields, each later row is mapped to those names by position.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::record::RawRecord;

/// Where the event CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// A resource fetched with a single HTTP GET.
    Url(Url),
}

impl Source {
    /// Interpret `s` as a URL when it has an `http` or `https` scheme,
    /// otherwise as a filesystem path.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match Url::parse(trimmed) {
            // Schemes are normalized to lowercase by the parser.
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::Path(PathBuf::from(trimmed)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Errors that can occur while loading event data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("data is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Fetch the raw bytes of `source` and decode them as UTF-8 text.
pub async fn fetch_text(source: &Source) -> Result<String, LoadError> {
    let bytes = match source {
        Source::Path(path) => tokio::fs::read(path).await.map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?,
        Source::Url(url) => {
            let resp = reqwest::get(url.as_str()).await?.error_for_status()?;
            resp.bytes().await?.to_vec()
        }
    };
    decode_utf8(bytes)
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, LoadError> {
    let text = String::from_utf8(bytes)?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Parse CSV text with a header row into records, in row order.
///
/// Rows shorter than the header leave their trailing fields absent; extra
/// cells beyond the header are ignored.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        records.push(RawRecord::new(
            row,
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.as_str(), value)),
        ));
    }
    Ok(records)
}

/// Fetch and parse `source`.
///
/// Failures are logged and returned; there is no retry.
pub async fn load(source: &Source) -> Result<Vec<RawRecord>, LoadError> {
    let result = async {
        let text = fetch_text(source).await?;
        parse_records(&text)
    }
    .await;

    match &result {
        Ok(records) => info!(%source, rows = records.len(), "loaded event data"),
        Err(e) => error!(%source, error = %e, "failed to load event data"),
    }
    result
}
