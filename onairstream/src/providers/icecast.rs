//! Icecast stream provider
//!
//! Queries the `status-json.xsl` stats endpoint and picks the source whose
//! `listenurl` contains the configured mount point. Icecast can report a
//! single source as a bare object or several as an array; both shapes are
//! accepted.

use crate::error::{Error, Result};
use crate::models::NormalizedMetadata;
use crate::providers::{snippet, StreamProvider};
use async_trait::async_trait;
use onairconfig::StreamConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Icecast stats response: `{"icestats": {"source": Source | [Source]}}`
#[derive(Debug, Deserialize)]
struct IcecastStatus {
    icestats: Icestats,
}

#[derive(Debug, Deserialize)]
struct Icestats {
    #[serde(default)]
    source: Option<SourceList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceList {
    Many(Vec<IcecastSource>),
    One(Box<IcecastSource>),
}

impl SourceList {
    fn into_vec(self) -> Vec<IcecastSource> {
        match self {
            SourceList::Many(sources) => sources,
            SourceList::One(source) => vec![*source],
        }
    }
}

#[derive(Debug, Deserialize)]
struct IcecastSource {
    #[serde(default)]
    listenurl: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    listeners: Option<u32>,
}

/// Icecast provider implementation
#[derive(Debug, Clone)]
pub struct IcecastProvider {
    client: Client,
}

impl IcecastProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Stats endpoint for a configured base URL
    fn stats_url(stream_url: &str) -> String {
        format!("{}/status-json.xsl", stream_url.trim_end_matches('/'))
    }

    /// Parse a stats payload and normalize the source matching `mount_point`
    fn parse_status(body: &str, mount_point: &str) -> Result<NormalizedMetadata> {
        let status: IcecastStatus =
            serde_json::from_str(body).map_err(|_| Error::InvalidPayload("Icecast"))?;

        let sources = status
            .icestats
            .source
            .ok_or(Error::InvalidPayload("Icecast"))?
            .into_vec();

        let mount = mount_point.trim_start_matches('/');
        let source = sources
            .into_iter()
            .find(|s| {
                s.listenurl
                    .as_deref()
                    .is_some_and(|url| url.contains(mount))
            })
            .ok_or(Error::MountNotFound)?;

        Ok(NormalizedMetadata::from_raw_title(
            source.title.as_deref().unwrap_or(""),
            source.listeners.unwrap_or(0),
        ))
    }

    async fn try_fetch(&self, config: &StreamConfig) -> Result<NormalizedMetadata> {
        let url = Self::stats_url(&config.stream_url);
        if config.debug_mode {
            debug!(%url, "Fetching Icecast stats");
        }

        let body = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(config.connection_timeout))
            .send()
            .await?
            .text()
            .await?;

        if config.debug_mode {
            debug!(response = %snippet(&body, 500), "Icecast stats response");
        }

        Self::parse_status(&body, &config.mount_point)
    }
}

#[async_trait]
impl StreamProvider for IcecastProvider {
    fn name(&self) -> &'static str {
        "icecast"
    }

    async fn fetch_metadata(&self, config: &StreamConfig) -> NormalizedMetadata {
        match self.try_fetch(config).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "Icecast fetch failed");
                NormalizedMetadata::offline(e.to_string())
            }
        }
    }
}
