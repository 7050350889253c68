//! Cached metadata manager
//!
//! Wraps provider calls with the refresh policy: results are cached under
//! a structural hash of the full stream configuration with a TTL equal to
//! the refresh interval, so concurrent front-end polls within one cycle
//! share a single upstream fetch. When metadata fetching is disabled the
//! provider is bypassed entirely and a cheap HEAD liveness probe answers
//! the online/offline question.

use crate::models::{NormalizedMetadata, StreamStatus};
use crate::providers::{provider_for, StreamProvider};
use onaircache::CacheStore;
use onairconfig::{Settings, StreamConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// Prefix for metadata cache keys (purged by the cache-clear operation)
pub const METADATA_CACHE_PREFIX: &str = "onair:metadata:";

/// HTTP statuses the liveness probe accepts as "online"
const PROBE_OK_STATUSES: [u16; 4] = [200, 301, 302, 307];

/// Snapshot payload for the `/status` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamStatistics {
    pub status: StreamStatus,
    pub listeners: u32,
    pub current_track: String,
    pub stream_type: String,
    pub last_update: String,
}

/// Manages the configured stream provider and the metadata cache
pub struct StreamManager {
    settings: Arc<Settings>,
    cache: CacheStore,
    client: Client,
    provider: Option<Arc<dyn StreamProvider>>,
}

impl StreamManager {
    /// Create a manager, resolving the provider from the configured
    /// stream type
    pub fn new(settings: Arc<Settings>, cache: CacheStore, client: Client) -> Self {
        let provider = provider_for(settings.stream.stream_type, client.clone());
        Self {
            settings,
            cache,
            client,
            provider,
        }
    }

    /// Create a manager with an explicit provider (test seam and custom
    /// provider support)
    pub fn with_provider(
        settings: Arc<Settings>,
        cache: CacheStore,
        client: Client,
        provider: Arc<dyn StreamProvider>,
    ) -> Self {
        Self {
            settings,
            cache,
            client,
            provider: Some(provider),
        }
    }

    /// Get the current metadata, served from cache when fresh
    ///
    /// `force_refresh` bypasses the cache read but still stores the fresh
    /// result for subsequent calls.
    pub async fn get_metadata(&self, force_refresh: bool) -> NormalizedMetadata {
        let config = &self.settings.stream;

        if !config.enable_metadata_fetch {
            return self.fallback_metadata(config).await;
        }

        let cache_key = onaircache::config_key(METADATA_CACHE_PREFIX, config);

        if !force_refresh {
            if let Some(cached) = self.cache.get::<NormalizedMetadata>(&cache_key).await {
                return cached;
            }
        }

        let provider = match &self.provider {
            Some(provider) => provider,
            // Unknown stream type: degraded but valid, no error recorded
            None => return NormalizedMetadata::empty(),
        };

        let metadata = provider.fetch_metadata(config).await;

        self.cache
            .put(
                &cache_key,
                &metadata,
                Duration::from_secs(config.refresh_interval),
            )
            .await;

        if config.debug_mode {
            debug!(?metadata, provider = provider.name(), "Fetched stream metadata");
        }

        metadata
    }

    /// Whether the stream currently reports online
    pub async fn is_stream_online(&self) -> bool {
        self.get_metadata(false).await.stream_status.is_online()
    }

    /// Statistics snapshot for the status endpoint
    pub async fn statistics(&self) -> StreamStatistics {
        let metadata = self.get_metadata(false).await;
        StreamStatistics {
            status: metadata.stream_status,
            listeners: metadata.listeners,
            current_track: metadata.raw_title,
            stream_type: self.settings.stream.stream_type.as_str().to_string(),
            last_update: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Purge all cached metadata entries, returning the count removed
    pub async fn clear_cache(&self) -> usize {
        self.cache.remove_prefix(METADATA_CACHE_PREFIX).await
    }

    /// Fallback result when metadata fetching is disabled: the configured
    /// fallback text as artist, with online/offline from the liveness probe
    async fn fallback_metadata(&self, config: &StreamConfig) -> NormalizedMetadata {
        let online = self.check_stream_connection(config).await;
        NormalizedMetadata {
            artist: config.fallback_text.clone(),
            title: String::new(),
            album: String::new(),
            listeners: 0,
            stream_status: if online {
                StreamStatus::Online
            } else {
                StreamStatus::Offline
            },
            raw_title: config.fallback_text.clone(),
            error: None,
        }
    }

    /// Lightweight HEAD probe against the base stream URL
    async fn check_stream_connection(&self, config: &StreamConfig) -> bool {
        if config.stream_url.is_empty() {
            return false;
        }

        let response = self
            .client
            .head(&config.stream_url)
            .timeout(Duration::from_secs(config.connection_timeout))
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                if config.debug_mode {
                    debug!(url = %config.stream_url, status, "Stream connection check");
                }
                PROBE_OK_STATUSES.contains(&status)
            }
            Err(e) => {
                if config.debug_mode {
                    debug!(url = %config.stream_url, error = %e, "Stream connection check failed");
                }
                false
            }
        }
    }
}
