//! Canonical metadata model shared by all stream providers

use serde::{Deserialize, Serialize};

/// Sentinel artist shown when the raw title carries no track at all
pub const NO_TRACK_PLAYING: &str = "No track playing";

/// Online/offline state of the upstream stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Online,
    Offline,
}

impl StreamStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, StreamStatus::Online)
    }
}

/// Canonical output of any stream provider
///
/// `stream_status` is `Offline` iff the upstream fetch failed or returned
/// unparseable data; in that case `error` carries a descriptive message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetadata {
    pub artist: String,
    pub title: String,
    /// Neither Icecast nor Shoutcast exposes album info; always empty
    pub album: String,
    pub listeners: u32,
    pub stream_status: StreamStatus,
    #[serde(default)]
    pub raw_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NormalizedMetadata {
    /// Online metadata derived from a raw "Artist - Title" string
    pub fn from_raw_title(raw_title: &str, listeners: u32) -> Self {
        let raw_title = raw_title.trim();
        let (mut artist, title) = split_title(raw_title);

        // Blank raw title: show a friendly placeholder instead of nothing
        if artist.is_empty() && title.is_empty() {
            artist = NO_TRACK_PLAYING.to_string();
        }

        Self {
            artist,
            title,
            album: String::new(),
            listeners,
            stream_status: StreamStatus::Online,
            raw_title: raw_title.to_string(),
            error: None,
        }
    }

    /// Offline metadata carrying an error message
    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            artist: String::new(),
            title: String::new(),
            album: String::new(),
            listeners: 0,
            stream_status: StreamStatus::Offline,
            raw_title: String::new(),
            error: Some(error.into()),
        }
    }

    /// Degraded-but-valid empty metadata (unknown provider), no error recorded
    pub fn empty() -> Self {
        Self {
            artist: String::new(),
            title: String::new(),
            album: String::new(),
            listeners: 0,
            stream_status: StreamStatus::Offline,
            raw_title: String::new(),
            error: None,
        }
    }
}

/// Split a raw stream title into `(artist, title)`
///
/// Tries the clean `" - "` separator first so titles containing hyphens
/// inside words are not mis-split, then falls back to a bare `"-"`.
/// Without any separator the whole string is the title.
pub fn split_title(raw: &str) -> (String, String) {
    if let Some((artist, title)) = raw.split_once(" - ") {
        (artist.trim().to_string(), title.trim().to_string())
    } else if let Some((artist, title)) = raw.split_once('-') {
        (artist.trim().to_string(), title.trim().to_string())
    } else {
        (String::new(), raw.trim().to_string())
    }
}
