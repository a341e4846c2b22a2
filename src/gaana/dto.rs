//! Gaana API gateway DTOs.
//!
//! These structs mirror the exact shape of the gateway's JSON responses.
//! Every field is optional: the gateway passes upstream payloads through
//! with keys dropped freely, and a record must never fail to decode
//! because a field we don't need is absent. Unknown fields are ignored.
//!
//! Conversion into domain types happens in `adapter` - nothing else in
//! the crate should touch these.

use serde::Deserialize;

/// A value the gateway sends either as a JSON number or as a display
/// string ("55K+", "1.2M+", "123~45").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Genres arrive as a single comma-joined string or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Genres {
    One(String),
    Many(Vec<String>),
}

/// One album record from `/albums/search` or `/albums/info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    pub title: Option<String>,
    pub album_id: Option<NumberOrString>,
    pub seokey: Option<String>,
    pub artists: Option<String>,
    pub artist_ids: Option<NumberOrString>,
    pub artist_seokeys: Option<String>,
    pub release_date: Option<String>,
    pub label: Option<String>,
    pub play_count: Option<NumberOrString>,
    pub favorite_count: Option<NumberOrString>,
    pub images: Option<Images>,
    /// Kept raw; the adapter decodes elements one by one so a malformed
    /// track cannot sink the whole album.
    pub tracks: Option<Vec<serde_json::Value>>,
}

/// One song record from `/songs/search`, `/songs/info`, a nested album
/// track list or `/playlists/info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Song {
    pub title: Option<String>,
    pub track_id: Option<NumberOrString>,
    pub seokey: Option<String>,
    pub artists: Option<String>,
    pub artist_ids: Option<NumberOrString>,
    pub artist_seokeys: Option<String>,
    pub album: Option<String>,
    pub duration: Option<NumberOrString>,
    pub popularity: Option<NumberOrString>,
    pub play_count: Option<NumberOrString>,
    pub favorite_count: Option<NumberOrString>,
    pub genres: Option<Genres>,
}

/// One artist record from `/artists/search` or `/artists/info`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artist {
    pub name: Option<String>,
    pub artist_id: Option<NumberOrString>,
    pub seokey: Option<String>,
    /// Count fields on the info payload, display-formatted like play counts
    pub albums: Option<NumberOrString>,
    pub tracks: Option<NumberOrString>,
}

/// Artwork URL container nested inside album records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    pub urls: Option<ImageUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUrls {
    pub large_artwork: Option<String>,
}
