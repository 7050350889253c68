//! LRCLIB provider
//!
//! Free, no API key, excellent coverage. Returns both plain and synced
//! (LRC) lyrics; the synced form enables karaoke-style highlighting.

use crate::models::LyricsResult;
use crate::providers::{LyricsProvider, DEFAULT_USER_AGENT};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const API_URL: &str = "https://lrclib.net/api/get";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LrclibResponse {
    plain_lyrics: Option<String>,
    synced_lyrics: Option<String>,
}

/// LRCLIB.net lyrics provider
#[derive(Debug, Clone)]
pub struct LrclibProvider {
    client: Client,
}

impl LrclibProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a result from a response body; `None` when plain lyrics are
    /// absent (LRCLIB answers 404 with a JSON error body on misses)
    fn parse_response(body: &str, artist: &str, title: &str) -> Option<LyricsResult> {
        let response: LrclibResponse = serde_json::from_str(body).ok()?;
        let plain = response.plain_lyrics.filter(|lyrics| !lyrics.is_empty())?;

        let mut result = LyricsResult::found(plain, "lrclib.net", artist, title);
        if let Some(synced) = response.synced_lyrics.filter(|s| !s.is_empty()) {
            result = result.with_synced(synced);
        }
        Some(result)
    }
}

#[async_trait]
impl LyricsProvider for LrclibProvider {
    fn name(&self) -> &'static str {
        "lrclib.net"
    }

    async fn fetch(&self, artist: &str, title: &str) -> Option<LyricsResult> {
        let url = Url::parse_with_params(
            API_URL,
            &[("artist_name", artist), ("track_name", title)],
        )
        .ok()?;

        debug!(%url, "Fetching lyrics from LRCLIB");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, DEFAULT_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "LRCLIB returned non-success status");
            return None;
        }

        let body = response.text().await.ok()?;
        Self::parse_response(&body, artist, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_synced() {
        let body = r#"{
            "id": 123,
            "plainLyrics": "One more time\nWe're gonna celebrate",
            "syncedLyrics": "[00:22.10] One more time\n[00:25.30] We're gonna celebrate"
        }"#;
        let result = LrclibProvider::parse_response(body, "Daft Punk", "One More Time").unwrap();
        assert_eq!(result.lyrics, "One more time\nWe're gonna celebrate");
        assert_eq!(result.source, "lrclib.net");
        assert_eq!(result.is_synced, Some(true));
        assert!(result.synced_lyrics.as_deref().unwrap().starts_with("[00:22.10]"));
    }

    #[test]
    fn test_parse_plain_only() {
        let body = r#"{"plainLyrics": "some text", "syncedLyrics": null}"#;
        let result = LrclibProvider::parse_response(body, "A", "T").unwrap();
        assert_eq!(result.lyrics, "some text");
        assert!(result.is_synced.is_none());
        assert!(result.synced_lyrics.is_none());
    }

    #[test]
    fn test_parse_miss() {
        assert!(LrclibProvider::parse_response(r#"{"plainLyrics": null}"#, "A", "T").is_none());
        assert!(LrclibProvider::parse_response(r#"{"plainLyrics": ""}"#, "A", "T").is_none());
        assert!(LrclibProvider::parse_response("not json", "A", "T").is_none());
    }

    #[tokio::test]
    #[ignore = "Integration test - calls real LRCLIB API"]
    async fn test_fetch_real_lyrics() {
        let provider = LrclibProvider::new(Client::new());
        let result = provider.fetch("Daft Punk", "One More Time").await;
        assert!(result.is_some_and(|r| !r.lyrics.is_empty()));
    }
}
