//! JSON API routes
//!
//! Four endpoints under `/api/nowplaying`:
//!
//! - `GET /metadata` - current track, enriched with artwork and duration
//! - `GET /status`   - stream statistics snapshot
//! - `GET /lyrics`   - lyrics lookup for an explicit artist/title pair
//! - `POST /cache/clear` - privileged purge of all service caches
//!
//! Every response carries a `success` flag; the metadata response also
//! echoes the display configuration so a front end can render itself
//! without a second round trip.

use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use onairconfig::DisplayConfig;
use onairlyrics::LyricsResult;
use onairstream::manager::StreamStatistics;
use onairstream::models::NormalizedMetadata;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MetadataQuery {
    /// Bypass the metadata cache for this request
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize)]
pub struct LyricsQuery {
    pub artist: String,
    pub title: String,
}

/// Normalized metadata plus the enrichment fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataPayload {
    #[serde(flatten)]
    pub metadata: NormalizedMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub success: bool,
    pub data: MetadataPayload,
    /// Display toggles echoed for the front end
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub data: StreamStatistics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LyricsResponse {
    pub success: bool,
    pub data: LyricsResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/nowplaying/metadata
async fn get_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Json<MetadataResponse> {
    let metadata = state.stream.get_metadata(query.force).await;
    let display = &state.settings.display;

    let mut artwork_url = None;
    let mut duration_ms = None;

    if display.show_artwork || display.show_track_time {
        let info = state
            .artwork
            .track_info(&metadata.artist, &metadata.title)
            .await;
        if display.show_artwork {
            artwork_url = info.artwork_url;
        }
        if display.show_track_time && info.duration_ms > 0 {
            duration_ms = Some(info.duration_ms);
        }
    }

    // No artwork found: substitute the configured fallback image
    if display.show_artwork && artwork_url.is_none() && !display.fallback_image.is_empty() {
        artwork_url = Some(display.fallback_image.clone());
    }

    Json(MetadataResponse {
        success: true,
        data: MetadataPayload {
            metadata,
            artwork_url,
            duration_ms,
        },
        display: display.clone(),
    })
}

/// GET /api/nowplaying/status
async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let data = state.stream.statistics().await;
    Json(StatusResponse {
        success: true,
        data,
    })
}

/// GET /api/nowplaying/lyrics
async fn get_lyrics(
    State(state): State<AppState>,
    Query(query): Query<LyricsQuery>,
) -> Json<LyricsResponse> {
    let data = state.lyrics.get_lyrics(&query.artist, &query.title).await;
    Json(LyricsResponse {
        success: true,
        data,
    })
}

/// POST /api/nowplaying/cache/clear
///
/// Requires `Authorization: Bearer <admin_token>`. When no admin token is
/// configured the endpoint is refused outright rather than left open.
async fn clear_cache(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ClearCacheResponse>) {
    let Some(expected) = state.settings.server.admin_token.as_deref() else {
        return (
            StatusCode::FORBIDDEN,
            Json(ClearCacheResponse {
                success: false,
                message: "Cache clearing is disabled: no admin token configured".to_string(),
            }),
        );
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented != Some(expected) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ClearCacheResponse {
                success: false,
                message: "Invalid or missing admin token".to_string(),
            }),
        );
    }

    let removed = state.stream.clear_cache().await
        + state.artwork.clear_cache().await
        + state.lyrics.clear_cache().await;

    info!(removed, "Caches cleared via API");

    (
        StatusCode::OK,
        Json(ClearCacheResponse {
            success: true,
            message: format!("Cleared {} cached entries", removed),
        }),
    )
}

/// Build the API router over the shared application state
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/nowplaying/metadata", get(get_metadata))
        .route("/api/nowplaying/status", get(get_status))
        .route("/api/nowplaying/lyrics", get(get_lyrics))
        .route("/api/nowplaying/cache/clear", post(clear_cache))
        .with_state(state)
}
