//! Error type for the library layer.

/// Errors produced by the library layer, wrapping portal errors and adding
/// station-feed, filesystem, and serialization failures.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// An error from the underlying portal client.
    #[error("portal error: {0}")]
    Portal(#[from] bikeshare_portal::Error),
    /// The station feed request failed outright.
    #[error("station feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The station feed returned a non-success status.
    #[error("station feed returned status {status}")]
    StationFeed { status: u16 },
    /// Reading or writing an artifact failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV serialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
