//! Lyrics result model

use serde::{Deserialize, Serialize};

/// Resolved lyrics for an artist/title pair
///
/// A miss is represented by the empty shape: blank `lyrics`/`source` and a
/// human-readable `message`. `synced_lyrics` carries LRC-style timestamped
/// lines when the source provides them, enabling karaoke-style display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsResult {
    pub lyrics: String,
    pub source: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_lyrics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_synced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

impl LyricsResult {
    /// Plain lyrics from a named source
    pub fn found(
        lyrics: impl Into<String>,
        source: impl Into<String>,
        artist: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            lyrics: lyrics.into(),
            source: source.into(),
            artist: artist.into(),
            title: title.into(),
            synced_lyrics: None,
            is_synced: None,
            message: None,
            cached: false,
        }
    }

    /// The empty shape returned when nothing is found or the feature is
    /// disabled
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            lyrics: String::new(),
            source: String::new(),
            artist: String::new(),
            title: String::new(),
            synced_lyrics: None,
            is_synced: None,
            message: Some(message.into()),
            cached: false,
        }
    }

    /// Attach synced (LRC) lyrics
    pub fn with_synced(mut self, synced: impl Into<String>) -> Self {
        self.synced_lyrics = Some(synced.into());
        self.is_synced = Some(true);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lyrics.is_empty()
    }
}
