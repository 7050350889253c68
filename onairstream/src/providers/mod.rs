//! Stream provider abstraction
//!
//! A provider knows how to query one family of streaming servers for its
//! "now playing" stats and normalize the answer into
//! [`NormalizedMetadata`]. Providers never propagate errors: transport and
//! parse failures become offline results so callers need no special-casing.

pub mod icecast;
pub mod shoutcast;

use crate::models::{NormalizedMetadata, StreamStatus};
use async_trait::async_trait;
use onairconfig::{StreamConfig, StreamType};
use reqwest::Client;
use std::sync::Arc;

pub use icecast::IcecastProvider;
pub use shoutcast::ShoutcastProvider;

/// Polymorphic interface over stream server families
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Fetch and normalize the current metadata
    ///
    /// Never fails: network or parse problems yield an offline result
    /// carrying an error string.
    async fn fetch_metadata(&self, config: &StreamConfig) -> NormalizedMetadata;

    /// Convenience check built on `fetch_metadata`
    async fn is_stream_online(&self, config: &StreamConfig) -> bool {
        self.fetch_metadata(config).await.stream_status == StreamStatus::Online
    }
}

/// Resolve the provider for a configured stream type
///
/// Pure dispatch: returns `None` for unknown types, which the manager
/// turns into a degraded empty response.
pub fn provider_for(stream_type: StreamType, client: Client) -> Option<Arc<dyn StreamProvider>> {
    match stream_type {
        StreamType::Icecast => Some(Arc::new(IcecastProvider::new(client))),
        StreamType::ShoutcastV1 | StreamType::ShoutcastV2 => {
            Some(Arc::new(ShoutcastProvider::new(client)))
        }
        StreamType::Unknown => None,
    }
}

/// Truncate a response body for debug logs without splitting a char
pub(crate) fn snippet(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_dispatch() {
        let client = Client::new();
        assert_eq!(
            provider_for(StreamType::Icecast, client.clone()).map(|p| p.name()),
            Some("icecast")
        );
        assert_eq!(
            provider_for(StreamType::ShoutcastV1, client.clone()).map(|p| p.name()),
            Some("shoutcast")
        );
        assert_eq!(
            provider_for(StreamType::ShoutcastV2, client.clone()).map(|p| p.name()),
            Some("shoutcast")
        );
        assert!(provider_for(StreamType::Unknown, client).is_none());
    }
}
