//! lyrics.ovh provider
//!
//! Plain lyrics only, free, no API key.

use crate::models::LyricsResult;
use crate::providers::LyricsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const API_BASE: &str = "https://api.lyrics.ovh/v1/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LyricsOvhResponse {
    lyrics: Option<String>,
}

/// lyrics.ovh lyrics provider
#[derive(Debug, Clone)]
pub struct LyricsOvhProvider {
    client: Client,
}

impl LyricsOvhProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `https://api.lyrics.ovh/v1/{artist}/{title}` with encoded segments
    fn api_url(artist: &str, title: &str) -> Option<Url> {
        let mut url = Url::parse(API_BASE).ok()?;
        url.path_segments_mut().ok()?.push(artist).push(title);
        Some(url)
    }

    fn parse_response(body: &str, artist: &str, title: &str) -> Option<LyricsResult> {
        let response: LyricsOvhResponse = serde_json::from_str(body).ok()?;
        let lyrics = response.lyrics.filter(|lyrics| !lyrics.is_empty())?;
        Some(LyricsResult::found(lyrics, "lyrics.ovh", artist, title))
    }
}

#[async_trait]
impl LyricsProvider for LyricsOvhProvider {
    fn name(&self) -> &'static str {
        "lyrics.ovh"
    }

    async fn fetch(&self, artist: &str, title: &str) -> Option<LyricsResult> {
        let url = Self::api_url(artist, title)?;

        debug!(%url, "Fetching lyrics from lyrics.ovh");

        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "lyrics.ovh returned non-success status");
            return None;
        }

        let body = response.text().await.ok()?;
        Self::parse_response(&body, artist, title)
    }
}
