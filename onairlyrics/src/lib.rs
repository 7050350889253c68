//! # OnAir Lyrics
//!
//! Multi-provider lyrics lookup with caching for the now-playing service.
//!
//! Providers are tried strictly in order (LRCLIB, lyrics.ovh,
//! greeklyrics.gr) and the first non-empty answer wins. Results,
//! including total misses, are cached so repeated polls for the same
//! track do not re-query the upstream sources.
//!
//! ## Example
//!
//! ```no_run
//! use onairlyrics::LyricsResolver;
//! use onairconfig::LyricsConfig;
//! use onaircache::CacheStore;
//!
//! # async fn example() {
//! let config = LyricsConfig {
//!     enable_lyrics: true,
//!     ..LyricsConfig::default()
//! };
//! let resolver = LyricsResolver::new(config, CacheStore::new(), reqwest::Client::new());
//! let result = resolver.get_lyrics("Daft Punk", "One More Time").await;
//! println!("{} (from {})", result.lyrics, result.source);
//! # }
//! ```

pub mod models;
pub mod providers;
pub mod resolver;
pub mod slug;

pub use models::LyricsResult;
pub use providers::{GreekLyricsProvider, LrclibProvider, LyricsOvhProvider, LyricsProvider};
pub use resolver::{LyricsResolver, LYRICS_CACHE_PREFIX};
