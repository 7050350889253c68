//! # OnAir Configuration Module
//!
//! Typed settings for the OnAir now-playing service, loaded from a YAML
//! file. Every field has a default so a partial (or missing) file still
//! yields a usable configuration.
//!
//! Unlike an ambient-global settings store, the [`Settings`] record is
//! loaded once at startup and threaded explicitly through the services
//! that consume it.
//!
//! ## Usage
//!
//! ```no_run
//! use onairconfig::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Stream type: {:?}", settings.stream.stream_type);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::info;

/// Environment variable pointing at the configuration file
pub const ENV_CONFIG_FILE: &str = "ONAIR_CONFIG";

/// Default configuration file name (resolved in the working directory)
pub const DEFAULT_CONFIG_FILE: &str = "onair.yaml";

// ============================================================================
// Settings (root record)
// ============================================================================

/// Full effective configuration for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub stream: StreamConfig,
    pub display: DisplayConfig,
    pub lyrics: LyricsConfig,
    pub artwork: ArtworkConfig,
}

impl Settings {
    /// Load settings from the file named by `ONAIR_CONFIG`, falling back
    /// to `onair.yaml` in the working directory. A missing file yields
    /// defaults rather than an error.
    pub fn load() -> Result<Self> {
        let path = env::var(ENV_CONFIG_FILE).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load settings from a specific YAML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "No configuration file found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(settings)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the API listens on
    pub http_port: u16,
    /// Bearer token required by privileged endpoints (cache clear).
    /// When unset, privileged endpoints are refused outright.
    pub admin_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            admin_token: None,
        }
    }
}

// ============================================================================
// Stream
// ============================================================================

/// Kind of upstream streaming server
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    Icecast,
    ShoutcastV1,
    #[serde(alias = "shoutcast")]
    ShoutcastV2,
    /// Unrecognized server kind; the manager degrades to empty metadata
    #[serde(other)]
    Unknown,
}

impl StreamType {
    /// Wire name used in the `/status` payload
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamType::Icecast => "icecast",
            StreamType::ShoutcastV1 => "shoutcast_v1",
            StreamType::ShoutcastV2 => "shoutcast_v2",
            StreamType::Unknown => "",
        }
    }
}

/// Upstream stream server configuration
///
/// The metadata cache keys off a structural hash of this entire record,
/// so any change here invalidates cached metadata on the next request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    pub stream_type: StreamType,
    /// Base URL of the streaming server (e.g. "http://radio.example.com:8000")
    pub stream_url: String,
    /// Icecast mount point (ignored for Shoutcast)
    pub mount_point: String,
    /// Shoutcast stream id (ignored for Icecast)
    pub sid: u32,
    /// Upstream request timeout in seconds
    pub connection_timeout: u64,
    /// Metadata cache TTL in seconds. Intentionally short: it deduplicates
    /// concurrent requests within one polling cycle.
    pub refresh_interval: u64,
    /// When false, the provider is never called and the fallback path
    /// (liveness probe) answers instead
    pub enable_metadata_fetch: bool,
    /// Verbose request/response logging
    pub debug_mode: bool,
    /// Honor Shoutcast's numeric STREAMSTATUS flag (0 means offline).
    /// The permissive default reports "online" whenever the XML parses.
    pub strict_stream_status: bool,
    /// Artist text shown when metadata fetching is disabled
    pub fallback_text: String,
    /// Artwork URL substituted when no artwork is found
    pub fallback_image: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            stream_type: StreamType::Icecast,
            stream_url: String::new(),
            mount_point: String::new(),
            sid: 1,
            connection_timeout: 5,
            refresh_interval: 10,
            enable_metadata_fetch: true,
            debug_mode: false,
            strict_stream_status: false,
            fallback_text: "No track information available".to_string(),
            fallback_image: String::new(),
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Front-end display toggles, echoed verbatim in the metadata response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_artist: bool,
    pub show_title: bool,
    pub show_album: bool,
    pub show_artwork: bool,
    pub show_listeners: bool,
    pub show_status: bool,
    pub show_lyrics: bool,
    pub show_track_time: bool,
    pub fallback_text: String,
    pub fallback_image: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_artist: true,
            show_title: true,
            show_album: true,
            show_artwork: true,
            show_listeners: true,
            show_status: true,
            show_lyrics: false,
            show_track_time: false,
            fallback_text: "No track information available".to_string(),
            fallback_image: String::new(),
        }
    }
}

// ============================================================================
// Lyrics
// ============================================================================

/// Lyrics resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LyricsConfig {
    pub enable_lyrics: bool,
    /// Cache TTL in minutes
    pub cache_duration: u64,
    /// Message returned when no provider finds lyrics
    pub custom_message: String,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            enable_lyrics: false,
            cache_duration: 1440,
            custom_message: "Lyrics not available".to_string(),
        }
    }
}

// ============================================================================
// Artwork
// ============================================================================

/// Requested artwork dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkSize {
    Small,
    Medium,
    Large,
    XLarge,
}

impl ArtworkSize {
    /// Pixel-dimension token substituted into the artwork base URL
    pub fn dimensions(&self) -> &'static str {
        match self {
            ArtworkSize::Small => "60x60",
            ArtworkSize::Medium => "300x300",
            ArtworkSize::Large => "600x600",
            ArtworkSize::XLarge => "1000x1000",
        }
    }
}

/// Artwork enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtworkConfig {
    pub enable_artwork: bool,
    pub artwork_size: ArtworkSize,
    /// Cache TTL in seconds
    pub cache_duration: u64,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            enable_artwork: true,
            artwork_size: ArtworkSize::Medium,
            cache_duration: 86_400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.stream.stream_type, StreamType::Icecast);
        assert_eq!(settings.stream.sid, 1);
        assert_eq!(settings.stream.refresh_interval, 10);
        assert_eq!(settings.stream.connection_timeout, 5);
        assert!(settings.stream.enable_metadata_fetch);
        assert!(!settings.stream.strict_stream_status);
        assert_eq!(settings.lyrics.cache_duration, 1440);
        assert_eq!(settings.artwork.artwork_size, ArtworkSize::Medium);
        assert_eq!(settings.server.http_port, 8080);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
stream:
  stream_type: shoutcast_v2
  stream_url: "http://radio.example.com:8000"
  sid: 2
lyrics:
  enable_lyrics: true
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.stream.stream_type, StreamType::ShoutcastV2);
        assert_eq!(settings.stream.sid, 2);
        // Untouched sections keep their defaults
        assert_eq!(settings.stream.refresh_interval, 10);
        assert!(settings.lyrics.enable_lyrics);
        assert!(settings.display.show_artist);
    }

    #[test]
    fn test_shoutcast_alias() {
        let yaml = r#"
stream:
  stream_type: shoutcast
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.stream.stream_type, StreamType::ShoutcastV2);
    }

    #[test]
    fn test_unknown_stream_type() {
        let yaml = r#"
stream:
  stream_type: webdav
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.stream.stream_type, StreamType::Unknown);
    }

    #[test]
    fn test_artwork_size_dimensions() {
        assert_eq!(ArtworkSize::Small.dimensions(), "60x60");
        assert_eq!(ArtworkSize::Medium.dimensions(), "300x300");
        assert_eq!(ArtworkSize::Large.dimensions(), "600x600");
        assert_eq!(ArtworkSize::XLarge.dimensions(), "1000x1000");
    }
}
