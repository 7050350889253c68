//! Album artwork and track duration enrichment
//!
//! Looks up artwork URL and track duration for an artist/title pair via
//! the iTunes Search API (free, no key). The first search result wins;
//! the artwork URL is derived by substituting the requested pixel size
//! into the 100x100 base URL iTunes returns.
//!
//! Results, including negative ones, are cached for the configured TTL
//! (24h by default) keyed on the lowercase artist+title pair, so a track
//! that keeps polling the front end costs one upstream search.

use onaircache::CacheStore;
use onairconfig::{ArtworkConfig, ArtworkSize};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Prefix for artwork cache keys (purged by the cache-clear operation)
pub const ARTWORK_CACHE_PREFIX: &str = "onair:artwork:";

/// iTunes Search API endpoint
const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Fixed timeout for search requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Size token present in iTunes artwork base URLs
const BASE_SIZE_TOKEN: &str = "100x100";

/// Result type alias for artwork operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an artwork lookup
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// ============================================================================
// Models
// ============================================================================

/// Enrichment result for an artist/title pair
///
/// An empty `TrackInfo` (no artwork, zero duration) doubles as the cached
/// negative result, so misses and hits go through one uniform path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub artwork_url: Option<String>,
    pub duration_ms: u64,
}

impl TrackInfo {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// iTunes search response (only the fields we read)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    #[serde(rename = "trackTimeMillis")]
    track_time_millis: Option<u64>,
}

// ============================================================================
// ArtworkService
// ============================================================================

/// Artwork and duration lookup with its own independent cache
#[derive(Debug, Clone)]
pub struct ArtworkService {
    config: ArtworkConfig,
    cache: CacheStore,
    client: Client,
}

impl ArtworkService {
    pub fn new(config: ArtworkConfig, cache: CacheStore, client: Client) -> Self {
        Self {
            config,
            cache,
            client,
        }
    }

    /// Get artwork URL and duration for a track
    ///
    /// Blank inputs and a disabled feature return the empty result
    /// immediately, without a network call.
    pub async fn track_info(&self, artist: &str, title: &str) -> TrackInfo {
        if !self.config.enable_artwork || artist.trim().is_empty() || title.trim().is_empty() {
            return TrackInfo::empty();
        }

        let cache_key = Self::cache_key(artist, title);
        if let Some(cached) = self.cache.get::<TrackInfo>(&cache_key).await {
            return cached;
        }

        let info = match self.fetch_from_itunes(artist, title).await {
            Ok(info) => info,
            Err(e) => {
                debug!(artist, title, error = %e, "Artwork lookup failed");
                TrackInfo::empty()
            }
        };

        // Negative results are cached too, avoiding repeated searches
        self.cache
            .put(
                &cache_key,
                &info,
                Duration::from_secs(self.config.cache_duration),
            )
            .await;

        info
    }

    /// Artwork-only entry point for callers that don't need duration
    pub async fn artwork(&self, artist: &str, title: &str) -> Option<String> {
        self.track_info(artist, title).await.artwork_url
    }

    /// Purge all cached artwork entries, returning the count removed
    pub async fn clear_cache(&self) -> usize {
        self.cache.remove_prefix(ARTWORK_CACHE_PREFIX).await
    }

    fn cache_key(artist: &str, title: &str) -> String {
        let key = format!("{}{}", artist, title).to_lowercase();
        onaircache::hash_key(ARTWORK_CACHE_PREFIX, &[&key])
    }

    async fn fetch_from_itunes(&self, artist: &str, title: &str) -> Result<TrackInfo> {
        let term = format!("{} {}", artist, title);
        let url = Url::parse_with_params(
            ITUNES_SEARCH_URL,
            &[
                ("term", term.as_str()),
                ("media", "music"),
                ("entity", "song"),
                ("limit", "1"),
            ],
        )?;

        debug!(%url, "Searching iTunes for track info");

        let body = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .text()
            .await?;

        Ok(Self::parse_search(&body, self.config.artwork_size))
    }

    /// Extract artwork and duration from a search response body
    ///
    /// Any parse problem or empty result list yields the empty info.
    fn parse_search(body: &str, size: ArtworkSize) -> TrackInfo {
        let response: SearchResponse = match serde_json::from_str(body) {
            Ok(response) => response,
            Err(_) => return TrackInfo::empty(),
        };

        let Some(track) = response.results.into_iter().next() else {
            return TrackInfo::empty();
        };

        TrackInfo {
            artwork_url: track
                .artwork_url_100
                .map(|base| Self::sized_url(&base, size)),
            duration_ms: track.track_time_millis.unwrap_or(0),
        }
    }

    /// Substitute the requested pixel dimensions into an artwork base URL
    fn sized_url(base: &str, size: ArtworkSize) -> String {
        base.replace(BASE_SIZE_TOKEN, size.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "resultCount": 1,
        "results": [
            {
                "artistName": "Daft Punk",
                "trackName": "One More Time",
                "artworkUrl100": "https://is1.mzstatic.com/image/thumb/x/100x100bb.jpg",
                "trackTimeMillis": 320357
            }
        ]
    }"#;

    #[test]
    fn test_size_substitution() {
        let base = "https://is1.mzstatic.com/image/thumb/x/100x100bb.jpg";
        assert_eq!(
            ArtworkService::sized_url(base, ArtworkSize::Large),
            "https://is1.mzstatic.com/image/thumb/x/600x600bb.jpg"
        );
        assert_eq!(
            ArtworkService::sized_url(base, ArtworkSize::Small),
            "https://is1.mzstatic.com/image/thumb/x/60x60bb.jpg"
        );
        assert_eq!(
            ArtworkService::sized_url(base, ArtworkSize::XLarge),
            "https://is1.mzstatic.com/image/thumb/x/1000x1000bb.jpg"
        );
    }

    #[test]
    fn test_parse_search_result() {
        let info = ArtworkService::parse_search(SEARCH_BODY, ArtworkSize::Medium);
        assert_eq!(
            info.artwork_url.as_deref(),
            Some("https://is1.mzstatic.com/image/thumb/x/300x300bb.jpg")
        );
        assert_eq!(info.duration_ms, 320_357);
    }

    #[test]
    fn test_parse_empty_results() {
        let info =
            ArtworkService::parse_search(r#"{"resultCount": 0, "results": []}"#, ArtworkSize::Medium);
        assert_eq!(info, TrackInfo::empty());
    }

    #[test]
    fn test_parse_garbage() {
        let info = ArtworkService::parse_search("<html>rate limited</html>", ArtworkSize::Medium);
        assert_eq!(info, TrackInfo::empty());
    }

    #[test]
    fn test_parse_result_without_duration() {
        let body = r#"{"results": [{"artworkUrl100": "https://img/100x100.jpg"}]}"#;
        let info = ArtworkService::parse_search(body, ArtworkSize::Small);
        assert_eq!(info.artwork_url.as_deref(), Some("https://img/60x60.jpg"));
        assert_eq!(info.duration_ms, 0);
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        assert_eq!(
            ArtworkService::cache_key("Daft Punk", "One More Time"),
            ArtworkService::cache_key("daft punk", "ONE MORE TIME")
        );
    }

    #[tokio::test]
    async fn test_blank_input_short_circuits() {
        let service = ArtworkService::new(
            ArtworkConfig::default(),
            CacheStore::new(),
            Client::new(),
        );
        assert_eq!(service.track_info("", "One More Time").await, TrackInfo::empty());
        assert_eq!(service.track_info("Daft Punk", "  ").await, TrackInfo::empty());
    }

    #[tokio::test]
    async fn test_disabled_feature_short_circuits() {
        let config = ArtworkConfig {
            enable_artwork: false,
            ..ArtworkConfig::default()
        };
        let service = ArtworkService::new(config, CacheStore::new(), Client::new());
        assert_eq!(
            service.track_info("Daft Punk", "One More Time").await,
            TrackInfo::empty()
        );
    }

    #[tokio::test]
    async fn test_cached_value_is_served() {
        let cache = CacheStore::new();
        let info = TrackInfo {
            artwork_url: Some("https://img/300x300.jpg".to_string()),
            duration_ms: 1000,
        };
        cache
            .put(
                &ArtworkService::cache_key("Daft Punk", "One More Time"),
                &info,
                Duration::from_secs(60),
            )
            .await;

        let service = ArtworkService::new(ArtworkConfig::default(), cache, Client::new());
        // Served from cache: no network call happens for an unreachable API
        assert_eq!(service.track_info("Daft Punk", "One More Time").await, info);
    }

    #[tokio::test]
    #[ignore = "Integration test - calls real iTunes API"]
    async fn test_real_itunes_lookup() {
        let service =
            ArtworkService::new(ArtworkConfig::default(), CacheStore::new(), Client::new());
        let info = service.track_info("Daft Punk", "One More Time").await;
        assert!(info.artwork_url.is_some());
        assert!(info.duration_ms > 0);
    }
}
