//! greeklyrics.gr scraping provider
//!
//! The strongest source for Greek-language lyrics, but it has no API:
//! this provider builds the song URL from transliterated slugs and
//! extracts the lyrics block from the page markup. Fragile by nature,
//! which is why it sits last in the chain and behind the same trait as
//! the structured providers.

use crate::models::LyricsResult;
use crate::providers::LyricsProvider;
use crate::slug::slugify;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::debug;

const SITE_BASE: &str = "https://www.greeklyrics.gr";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A desktop browser User-Agent; the site serves a different (useless)
/// page to obvious bots
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Markup patterns tried in sequence against the page
const LYRICS_PATTERNS: [&str; 3] = [
    r#"(?is)<div[^>]*class="[^"]*lyrics[^"]*"[^>]*>(.*?)</div>"#,
    r#"(?is)<div[^>]*id="[^"]*lyrics[^"]*"[^>]*>(.*?)</div>"#,
    r#"(?is)<pre[^>]*>(.*?)</pre>"#,
];

/// Minimum cleaned-text length for a match to count as real lyrics
/// (filters out empty containers and navigation fragments)
const MIN_LYRICS_LENGTH: usize = 50;

/// greeklyrics.gr HTML-scraping provider
#[derive(Debug, Clone)]
pub struct GreekLyricsProvider {
    client: Client,
}

impl GreekLyricsProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Song page URL: `https://www.greeklyrics.gr/{artist}-{title}`
    fn song_url(artist: &str, title: &str) -> String {
        format!("{}/{}-{}", SITE_BASE, slugify(artist), slugify(title))
    }

    /// Extract lyrics text from page markup
    ///
    /// Tries each container pattern in order and accepts the first match
    /// whose cleaned text exceeds the minimum length.
    fn extract_lyrics(html: &str) -> Option<String> {
        for pattern in LYRICS_PATTERNS {
            let re = Regex::new(pattern).ok()?;
            if let Some(captures) = re.captures(html) {
                let lyrics = Self::clean_fragment(&captures[1]);
                if lyrics.len() > MIN_LYRICS_LENGTH {
                    return Some(lyrics);
                }
            }
        }
        None
    }

    /// Turn a captured HTML fragment into plain text: `<br>` becomes a
    /// newline, remaining tags are dropped and entities decoded
    fn clean_fragment(fragment: &str) -> String {
        let with_newlines = fragment
            .replace("<br>", "\n")
            .replace("<br/>", "\n")
            .replace("<br />", "\n");

        let document = Html::parse_fragment(&with_newlines);
        let text: String = document.root_element().text().collect();
        text.trim().to_string()
    }
}

#[async_trait]
impl LyricsProvider for GreekLyricsProvider {
    fn name(&self) -> &'static str {
        "greeklyrics.gr"
    }

    async fn fetch(&self, artist: &str, title: &str) -> Option<LyricsResult> {
        let url = Self::song_url(artist, title);

        debug!(%url, "Fetching lyrics page from greeklyrics.gr");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "greeklyrics.gr returned non-success status");
            return None;
        }

        let body = response.text().await.ok()?;
        let lyrics = Self::extract_lyrics(&body)?;

        Some(LyricsResult::found(lyrics, "greeklyrics.gr", artist, title))
    }
}
