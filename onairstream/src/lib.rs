//! Stream metadata acquisition and normalization for OnAir
//!
//! This crate polls an upstream streaming server (Icecast or Shoutcast
//! v1/v2) for current track metadata and listener counts, and normalizes
//! the differing server formats into one canonical shape.
//!
//! # Components
//!
//! - **Providers**: [`IcecastProvider`] and [`ShoutcastProvider`] behind
//!   the [`StreamProvider`] trait. Providers never fail: transport and
//!   parse errors become offline results.
//! - **Manager**: [`StreamManager`] wraps the resolved provider with a
//!   short-TTL cache keyed off the full stream configuration, a forced
//!   refresh path, and a liveness-probe fallback for stations that
//!   disable metadata fetching.
//!
//! # Example
//!
//! ```no_run
//! use onairstream::StreamManager;
//! use onairconfig::Settings;
//! use onaircache::CacheStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let settings = Arc::new(Settings::default());
//! let manager = StreamManager::new(settings, CacheStore::new(), reqwest::Client::new());
//!
//! let metadata = manager.get_metadata(false).await;
//! println!("{} - {}", metadata.artist, metadata.title);
//! # }
//! ```

pub mod error;
pub mod manager;
pub mod models;
pub mod providers;

// Re-exports
pub use error::{Error, Result};
pub use manager::{StreamManager, StreamStatistics, METADATA_CACHE_PREFIX};
pub use models::{split_title, NormalizedMetadata, StreamStatus, NO_TRACK_PLAYING};
pub use providers::{provider_for, IcecastProvider, ShoutcastProvider, StreamProvider};
