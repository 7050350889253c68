//! # OnAir Server
//!
//! HTTP API boundary for the OnAir now-playing service. Wires the
//! configuration, cache, stream metadata manager, artwork enrichment and
//! lyrics resolution together behind a small JSON API served by axum.
//!
//! The binary loads [`onairconfig::Settings`] once at startup, builds one
//! shared [`reqwest::Client`] and one [`onaircache::CacheStore`], and
//! threads them explicitly into every service.

pub mod api;

use onairartwork::ArtworkService;
use onaircache::CacheStore;
use onairconfig::Settings;
use onairlyrics::LyricsResolver;
use onairstream::manager::StreamManager;
use reqwest::Client;
use std::sync::Arc;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub cache: CacheStore,
    pub stream: Arc<StreamManager>,
    pub artwork: Arc<ArtworkService>,
    pub lyrics: Arc<LyricsResolver>,
}

impl AppState {
    /// Build the full service graph from loaded settings
    pub fn new(settings: Arc<Settings>, cache: CacheStore, client: Client) -> Self {
        let stream = Arc::new(StreamManager::new(
            settings.clone(),
            cache.clone(),
            client.clone(),
        ));
        let artwork = Arc::new(ArtworkService::new(
            settings.artwork.clone(),
            cache.clone(),
            client.clone(),
        ));
        let lyrics = Arc::new(LyricsResolver::new(
            settings.lyrics.clone(),
            cache.clone(),
            client,
        ));
        Self {
            settings,
            cache,
            stream,
            artwork,
            lyrics,
        }
    }
}
