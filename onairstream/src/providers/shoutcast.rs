//! Shoutcast stream provider (v1 and v2 unified)
//!
//! Shoutcast v2 exposes JSON stats, v1 only XML. Trying the JSON endpoint
//! first and falling back when `songtitle` is absent lets one code path
//! serve both without configuration, at the cost of one wasted request
//! against pure-v1 servers.

use crate::error::{Error, Result};
use crate::models::{NormalizedMetadata, StreamStatus};
use crate::providers::{snippet, StreamProvider};
use async_trait::async_trait;
use onairconfig::StreamConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Stats fields shared by the v2 JSON and v1 XML payloads
#[derive(Debug, Default, Deserialize)]
struct ShoutcastStats {
    #[serde(default, alias = "SONGTITLE")]
    songtitle: Option<String>,
    #[serde(default, alias = "CURRENTLISTENERS")]
    currentlisteners: Option<u32>,
    #[serde(default, alias = "STREAMSTATUS")]
    streamstatus: Option<u32>,
}

/// Shoutcast provider implementation
#[derive(Debug, Clone)]
pub struct ShoutcastProvider {
    client: Client,
}

impl ShoutcastProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Stats endpoint; `json` selects the v2 JSON variant
    fn stats_url(stream_url: &str, sid: u32, json: bool) -> String {
        let base = stream_url.trim_end_matches(['/', ';', ',']);
        if json {
            format!("{}/stats?sid={}&json=1", base, sid)
        } else {
            format!("{}/stats?sid={}", base, sid)
        }
    }

    /// Parse a v2 JSON stats body; `None` when `songtitle` is absent,
    /// which signals the v1 XML fallback
    fn parse_json(body: &str) -> Option<ShoutcastStats> {
        let stats: ShoutcastStats = serde_json::from_str(body).ok()?;
        stats.songtitle.is_some().then_some(stats)
    }

    /// Parse a v1 XML stats body (SONGTITLE / CURRENTLISTENERS / STREAMSTATUS)
    fn parse_xml(body: &str) -> Result<ShoutcastStats> {
        quick_xml::de::from_str(body).map_err(|_| Error::InvalidPayload("Shoutcast"))
    }

    /// Normalize parsed stats into canonical metadata
    ///
    /// The permissive mode reports "online" whenever the payload parsed,
    /// regardless of the numeric STREAMSTATUS flag (the historical
    /// behavior). Strict mode honors STREAMSTATUS == 0 as offline.
    fn normalize(stats: &ShoutcastStats, strict_stream_status: bool) -> NormalizedMetadata {
        let mut metadata = NormalizedMetadata::from_raw_title(
            stats.songtitle.as_deref().unwrap_or(""),
            stats.currentlisteners.unwrap_or(0),
        );

        if strict_stream_status && stats.streamstatus == Some(0) {
            metadata.stream_status = StreamStatus::Offline;
        }

        metadata
    }

    async fn fetch_body(&self, url: &str, timeout_secs: u64) -> Result<String> {
        Ok(self
            .client
            .get(url)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await?
            .text()
            .await?)
    }

    async fn try_fetch(&self, config: &StreamConfig) -> Result<NormalizedMetadata> {
        // v2 JSON first
        let json_url = Self::stats_url(&config.stream_url, config.sid, true);
        if config.debug_mode {
            debug!(url = %json_url, "Fetching Shoutcast JSON stats");
        }

        if let Ok(body) = self.fetch_body(&json_url, config.connection_timeout).await {
            if config.debug_mode {
                debug!(response = %snippet(&body, 500), "Shoutcast JSON response");
            }
            if let Some(stats) = Self::parse_json(&body) {
                return Ok(Self::normalize(&stats, config.strict_stream_status));
            }
        }

        // Fallback to v1 XML
        let xml_url = Self::stats_url(&config.stream_url, config.sid, false);
        if config.debug_mode {
            debug!(url = %xml_url, "Falling back to Shoutcast XML stats");
        }

        let body = self.fetch_body(&xml_url, config.connection_timeout).await?;
        if config.debug_mode {
            debug!(response = %snippet(&body, 500), "Shoutcast XML response");
        }

        let stats = Self::parse_xml(&body)?;
        Ok(Self::normalize(&stats, config.strict_stream_status))
    }
}

#[async_trait]
impl StreamProvider for ShoutcastProvider {
    fn name(&self) -> &'static str {
        "shoutcast"
    }

    async fn fetch_metadata(&self, config: &StreamConfig) -> NormalizedMetadata {
        match self.try_fetch(config).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "Shoutcast fetch failed");
                NormalizedMetadata::offline(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1_XML: &str = r#"<?xml version="1.0"?>
<SHOUTCASTSERVER>
    <CURRENTLISTENERS>17</CURRENTLISTENERS>
    <PEAKLISTENERS>30</PEAKLISTENERS>
    <STREAMSTATUS>1</STREAMSTATUS>
    <SONGTITLE>Queen - Bohemian Rhapsody</SONGTITLE>
</SHOUTCASTSERVER>"#;

    #[test]
    fn test_parse_v2_json() {
        let body = r#"{"currentlisteners": 5, "streamstatus": 1, "songtitle": "ABBA - SOS"}"#;
        let stats = ShoutcastProvider::parse_json(body).unwrap();
        assert_eq!(stats.songtitle.as_deref(), Some("ABBA - SOS"));
        assert_eq!(stats.currentlisteners, Some(5));

        let metadata = ShoutcastProvider::normalize(&stats, false);
        assert_eq!(metadata.artist, "ABBA");
        assert_eq!(metadata.title, "SOS");
        assert_eq!(metadata.listeners, 5);
        assert_eq!(metadata.stream_status, StreamStatus::Online);
    }

    #[test]
    fn test_json_without_songtitle_triggers_fallback() {
        // A v1 server answering the JSON URL with something else entirely
        assert!(ShoutcastProvider::parse_json(r#"{"status": "ok"}"#).is_none());
        assert!(ShoutcastProvider::parse_json("<HTML>v1 page</HTML>").is_none());
    }

    #[test]
    fn test_parse_v1_xml() {
        let stats = ShoutcastProvider::parse_xml(V1_XML).unwrap();
        assert_eq!(stats.songtitle.as_deref(), Some("Queen - Bohemian Rhapsody"));
        assert_eq!(stats.currentlisteners, Some(17));
        assert_eq!(stats.streamstatus, Some(1));
    }

    #[test]
    fn test_invalid_xml() {
        let err = ShoutcastProvider::parse_xml("not xml at all <<<").unwrap_err();
        assert_eq!(err.to_string(), "Invalid response from Shoutcast server");
    }

    #[test]
    fn test_permissive_mode_ignores_streamstatus_flag() {
        let stats = ShoutcastStats {
            songtitle: Some("Artist - Track".into()),
            currentlisteners: Some(0),
            streamstatus: Some(0),
        };
        let metadata = ShoutcastProvider::normalize(&stats, false);
        assert_eq!(metadata.stream_status, StreamStatus::Online);
    }

    #[test]
    fn test_strict_mode_honors_streamstatus_zero() {
        let stats = ShoutcastStats {
            songtitle: Some("Artist - Track".into()),
            currentlisteners: Some(0),
            streamstatus: Some(0),
        };
        let metadata = ShoutcastProvider::normalize(&stats, true);
        assert_eq!(metadata.stream_status, StreamStatus::Offline);

        // Flag 1 stays online in strict mode
        let online = ShoutcastStats {
            streamstatus: Some(1),
            ..ShoutcastStats::default()
        };
        let metadata = ShoutcastProvider::normalize(&online, true);
        assert_eq!(metadata.stream_status, StreamStatus::Online);
    }

    #[test]
    fn test_stats_url_trims_separators() {
        assert_eq!(
            ShoutcastProvider::stats_url("http://radio.example.com:8000/;", 1, true),
            "http://radio.example.com:8000/stats?sid=1&json=1"
        );
        assert_eq!(
            ShoutcastProvider::stats_url("http://radio.example.com:8000", 2, false),
            "http://radio.example.com:8000/stats?sid=2"
        );
    }
}
