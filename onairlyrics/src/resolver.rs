//! Lyrics resolution with ordered fallback
//!
//! Tries providers strictly in order per request, short-circuiting on the
//! first non-empty answer. No retry within a provider and no parallel
//! dispatch. Both hits and total misses are cached for the configured
//! duration, so a track nobody has lyrics for does not hammer three
//! upstreams on every poll.

use crate::models::LyricsResult;
use crate::providers::{GreekLyricsProvider, LrclibProvider, LyricsOvhProvider, LyricsProvider};
use onaircache::CacheStore;
use onairconfig::LyricsConfig;
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// Prefix for lyrics cache keys (purged by the cache-clear operation)
pub const LYRICS_CACHE_PREFIX: &str = "onair:lyrics:";

/// Multi-provider lyrics resolver with its own cache
pub struct LyricsResolver {
    config: LyricsConfig,
    cache: CacheStore,
    providers: Vec<Arc<dyn LyricsProvider>>,
}

impl LyricsResolver {
    /// Create a resolver with the default provider chain:
    /// LRCLIB (plain + synced), then lyrics.ovh, then greeklyrics.gr
    pub fn new(config: LyricsConfig, cache: CacheStore, client: Client) -> Self {
        let providers: Vec<Arc<dyn LyricsProvider>> = vec![
            Arc::new(LrclibProvider::new(client.clone())),
            Arc::new(LyricsOvhProvider::new(client.clone())),
            Arc::new(GreekLyricsProvider::new(client)),
        ];
        Self::with_providers(config, cache, providers)
    }

    /// Create a resolver with an explicit provider chain
    pub fn with_providers(
        config: LyricsConfig,
        cache: CacheStore,
        providers: Vec<Arc<dyn LyricsProvider>>,
    ) -> Self {
        Self {
            config,
            cache,
            providers,
        }
    }

    /// Resolve lyrics for an artist/title pair
    pub async fn get_lyrics(&self, artist: &str, title: &str) -> LyricsResult {
        if !self.config.enable_lyrics || artist.trim().is_empty() || title.trim().is_empty() {
            return self.empty_result();
        }

        let cache_key = Self::cache_key(artist, title);
        if let Some(mut cached) = self.cache.get::<LyricsResult>(&cache_key).await {
            cached.cached = true;
            return cached;
        }

        let result = self.fetch_from_providers(artist, title).await;

        self.cache
            .put(&cache_key, &result, self.cache_ttl())
            .await;

        result
    }

    /// Purge all cached lyrics entries, returning the count removed
    pub async fn clear_cache(&self) -> usize {
        self.cache.remove_prefix(LYRICS_CACHE_PREFIX).await
    }

    /// Linear scan over the chain; first non-empty result wins
    async fn fetch_from_providers(&self, artist: &str, title: &str) -> LyricsResult {
        for provider in &self.providers {
            debug!(provider = provider.name(), artist, title, "Trying lyrics provider");

            if let Some(result) = provider.fetch(artist, title).await {
                if !result.is_empty() {
                    debug!(
                        provider = provider.name(),
                        length = result.lyrics.len(),
                        "Lyrics found"
                    );
                    return result;
                }
            }
        }

        debug!(artist, title, "No lyrics found from any provider");
        self.empty_result()
    }

    fn empty_result(&self) -> LyricsResult {
        LyricsResult::empty(self.config.custom_message.clone())
    }

    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.config.cache_duration * 60)
    }

    fn cache_key(artist: &str, title: &str) -> String {
        let key = format!("{}{}", artist, title).to_lowercase();
        onaircache::hash_key(LYRICS_CACHE_PREFIX, &[&key])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Scripted provider: returns a fixed answer, counting invocations
    struct ScriptedProvider {
        name: &'static str,
        answer: Option<String>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(name: &'static str, answer: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: answer.map(String::from),
                calls: AtomicU32::new(0),
            })
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LyricsProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, artist: &str, title: &str) -> Option<LyricsResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .as_ref()
                .map(|lyrics| LyricsResult::found(lyrics.clone(), self.name, artist, title))
        }
    }

    fn enabled_config() -> LyricsConfig {
        LyricsConfig {
            enable_lyrics: true,
            ..LyricsConfig::default()
        }
    }

    #[tokio::test]
    async fn test_provider_ordering_and_short_circuit() {
        let first = ScriptedProvider::new("first", None);
        let second = ScriptedProvider::new("second", Some("some text"));
        let third = ScriptedProvider::new("third", Some("never used"));

        let resolver = LyricsResolver::with_providers(
            enabled_config(),
            CacheStore::new(),
            vec![first.clone(), second.clone(), third.clone()],
        );

        let result = resolver.get_lyrics("ABBA", "SOS").await;

        assert_eq!(result.source, "second");
        assert_eq!(result.lyrics, "some text");
        assert_eq!(first.call_count(), 1);
        assert_eq!(second.call_count(), 1);
        assert_eq!(third.call_count(), 0, "chain must stop at the first hit");
    }

    #[tokio::test]
    async fn test_hit_is_cached() {
        let provider = ScriptedProvider::new("only", Some("some text"));
        let resolver = LyricsResolver::with_providers(
            enabled_config(),
            CacheStore::new(),
            vec![provider.clone()],
        );

        let fresh = resolver.get_lyrics("ABBA", "SOS").await;
        assert!(!fresh.cached);

        let cached = resolver.get_lyrics("ABBA", "SOS").await;
        assert!(cached.cached);
        assert_eq!(cached.lyrics, "some text");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_total_miss_is_cached_with_message() {
        let provider = ScriptedProvider::new("only", None);
        let config = LyricsConfig {
            enable_lyrics: true,
            custom_message: "Ask the DJ".to_string(),
            ..LyricsConfig::default()
        };
        let resolver =
            LyricsResolver::with_providers(config, CacheStore::new(), vec![provider.clone()]);

        let miss = resolver.get_lyrics("Nobody", "Unknown").await;
        assert!(miss.is_empty());
        assert_eq!(miss.message.as_deref(), Some("Ask the DJ"));

        // The miss itself is cached: the provider is not asked again
        let cached_miss = resolver.get_lyrics("Nobody", "Unknown").await;
        assert!(cached_miss.cached);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_short_circuits() {
        let provider = ScriptedProvider::new("only", Some("text"));
        let resolver = LyricsResolver::with_providers(
            enabled_config(),
            CacheStore::new(),
            vec![provider.clone()],
        );

        let result = resolver.get_lyrics("", "SOS").await;
        assert!(result.is_empty());
        assert_eq!(provider.call_count(), 0);

        let result = resolver.get_lyrics("ABBA", "   ").await;
        assert!(result.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_feature_short_circuits() {
        let provider = ScriptedProvider::new("only", Some("text"));
        let resolver = LyricsResolver::with_providers(
            LyricsConfig::default(), // enable_lyrics is false by default
            CacheStore::new(),
            vec![provider.clone()],
        );

        let result = resolver.get_lyrics("ABBA", "SOS").await;
        assert!(result.is_empty());
        assert_eq!(result.message.as_deref(), Some("Lyrics not available"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let provider = ScriptedProvider::new("only", Some("text"));
        let cache = CacheStore::new();
        let resolver = LyricsResolver::with_providers(
            enabled_config(),
            cache.clone(),
            vec![provider.clone()],
        );

        resolver.get_lyrics("ABBA", "SOS").await;
        assert_eq!(cache.len().await, 1);

        assert_eq!(resolver.clear_cache().await, 1);

        resolver.get_lyrics("ABBA", "SOS").await;
        assert_eq!(provider.call_count(), 2);
    }
}
