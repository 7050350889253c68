//! Error types for stream metadata fetching
//!
//! These errors never cross the provider boundary: `fetch_metadata` folds
//! them into an offline [`NormalizedMetadata`](crate::NormalizedMetadata)
//! carrying the error text.

/// Result type alias for stream provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching upstream stats
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (DNS, timeout, connection refused)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing failed (Shoutcast v1 stats)
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The server answered but the payload had none of the expected fields
    #[error("Invalid response from {0} server")]
    InvalidPayload(&'static str),

    /// No Icecast source matched the configured mount point
    #[error("Mount point not found")]
    MountNotFound,
}
