//! Lyrics provider abstraction
//!
//! Each provider knows one upstream source. The resolver tries them
//! strictly in order and keeps the first non-empty answer; a provider
//! signals "nothing found" (or any failure) with `None`, so the fragile
//! HTML-scraping fallback sits behind the same interface as the
//! structured APIs and can be swapped without touching resolver logic.

pub mod greeklyrics;
pub mod lrclib;
pub mod lyricsovh;

use crate::models::LyricsResult;
use async_trait::async_trait;

pub use greeklyrics::GreekLyricsProvider;
pub use lrclib::LrclibProvider;
pub use lyricsovh::LyricsOvhProvider;

/// User-Agent sent to the structured lyrics APIs
pub(crate) const DEFAULT_USER_AGENT: &str = "OnAir/0.1 (onairlyrics)";

/// A single lyrics source
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Source identifier recorded in results (e.g. "lrclib.net")
    fn name(&self) -> &'static str;

    /// Fetch lyrics; `None` on miss or any failure
    async fn fetch(&self, artist: &str, title: &str) -> Option<LyricsResult>;
}
