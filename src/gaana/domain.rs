//! Internal domain models for Gaana catalog lookups.
//!
//! These types are OUR types - they don't change when the API gateway
//! changes. Every gateway response gets converted into these types via
//! the adapter, and callers only ever see these.

use chrono::{DateTime, Utc};

/// Source tag stamped on every record so hosts can attribute candidates.
pub const DATA_SOURCE: &str = "Gaana";

/// A catalog album with its ordered track listing.
#[derive(Debug, Clone, Default)]
pub struct AlbumInfo {
    /// Album title, entity-unescaped
    pub title: String,
    /// Numeric catalog id, stringified
    pub album_id: Option<String>,
    /// URL slug accepted by the info endpoints
    pub seokey: Option<String>,
    /// Display artist names (comma-joined by the catalog)
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub artist_seokey: Option<String>,
    /// Tracks in listing order, carrying 1-based indices
    pub tracks: Vec<TrackInfo>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub label: Option<String>,
    /// Artwork URL; cleared by the source when the image fails validation
    pub cover_art_url: Option<String>,
    pub play_count: Option<u64>,
    pub favorite_count: Option<u64>,
    /// Source tag hosts use to attribute candidates, [`DATA_SOURCE`] on
    /// every mapped record
    pub source: &'static str,
}

/// A single catalog track, standalone or from an album listing.
#[derive(Debug, Clone, Default)]
pub struct TrackInfo {
    /// Track title, entity-unescaped
    pub title: String,
    pub track_id: Option<String>,
    pub seokey: Option<String>,
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub artist_seokey: Option<String>,
    /// Title of the album the track belongs to, entity-unescaped
    pub album: Option<String>,
    /// Position in the album listing, 1-based; unset for bare search hits
    pub index: Option<u32>,
    /// Duration in whole seconds
    pub length: Option<u32>,
    pub genres: Option<String>,
    pub popularity: Option<u64>,
    pub favorite_count: Option<u64>,
    /// When this record was fetched
    pub updated: Option<DateTime<Utc>>,
    /// Source tag, [`DATA_SOURCE`] on every mapped record
    pub source: &'static str,
}

/// A catalog artist. Used for display and lookup only.
#[derive(Debug, Clone, Default)]
pub struct ArtistInfo {
    pub name: String,
    pub artist_id: Option<String>,
    pub seokey: Option<String>,
    pub album_count: Option<u64>,
    pub track_count: Option<u64>,
}

/// One entry of a playlist, reduced to the fields a tagger searches by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistItem {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Errors that can occur while talking to the gateway.
///
/// These never escape the client's public collection methods; they exist
/// so the failure reason survives into the debug log.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
