//! Converts Gaana gateway DTOs into domain records.
//!
//! This is the ONLY place where gateway shapes are turned into our types.
//! Conversion never fails: absent or unparseable fields become `None` or
//! an empty string, and a malformed nested track is skipped rather than
//! sinking its album.

use chrono::Utc;

use super::domain::{AlbumInfo, ArtistInfo, PlaylistItem, TrackInfo, DATA_SOURCE};
use super::dto;

/// Convert an album detail record, mapping its nested track list with
/// 1-based indices.
pub fn album_info(record: &dto::Album) -> AlbumInfo {
    let (year, month, day) = match record.release_date.as_deref().and_then(release_date_parts) {
        Some((y, m, d)) => (Some(y), Some(m), Some(d)),
        None => (None, None, None),
    };

    let mut tracks = Vec::new();
    for raw in record.tracks.as_deref().unwrap_or_default() {
        match serde_json::from_value::<dto::Song>(raw.clone()) {
            Ok(song) => {
                let mut track = track_info(&song);
                track.index = Some(tracks.len() as u32 + 1);
                tracks.push(track);
            }
            Err(err) => tracing::debug!(error = %err, "skipping malformed album track"),
        }
    }

    AlbumInfo {
        title: unescape_entities(record.title.as_deref().unwrap_or_default()),
        album_id: id_string(record.album_id.as_ref()),
        seokey: record.seokey.clone(),
        artist: record.artists.clone(),
        artist_id: id_string(record.artist_ids.as_ref()),
        artist_seokey: record.artist_seokeys.clone(),
        tracks,
        year,
        month,
        day,
        label: record.label.clone(),
        cover_art_url: record
            .images
            .as_ref()
            .and_then(|images| images.urls.as_ref())
            .and_then(|urls| urls.large_artwork.clone()),
        play_count: record.play_count.as_ref().and_then(parse_count),
        favorite_count: record.favorite_count.as_ref().and_then(parse_count),
        source: DATA_SOURCE,
    }
}

/// Convert a song record. Works the same for standalone search hits and
/// album-nested tracks; the album mapping sets `index` afterwards.
pub fn track_info(record: &dto::Song) -> TrackInfo {
    TrackInfo {
        title: unescape_entities(record.title.as_deref().unwrap_or_default()),
        track_id: id_string(record.track_id.as_ref()),
        seokey: record.seokey.clone(),
        artist: record.artists.clone(),
        artist_id: id_string(record.artist_ids.as_ref()),
        artist_seokey: record.artist_seokeys.clone(),
        album: record.album.as_deref().map(unescape_entities),
        index: None,
        length: duration_secs(record.duration.as_ref()),
        genres: genres_string(record.genres.as_ref()),
        popularity: popularity(record),
        favorite_count: record.favorite_count.as_ref().and_then(parse_count),
        updated: Some(Utc::now()),
        source: DATA_SOURCE,
    }
}

pub fn artist_info(record: &dto::Artist) -> ArtistInfo {
    ArtistInfo {
        name: unescape_entities(record.name.as_deref().unwrap_or_default()),
        artist_id: id_string(record.artist_id.as_ref()),
        seokey: record.seokey.clone(),
        album_count: record.albums.as_ref().and_then(parse_count),
        track_count: record.tracks.as_ref().and_then(parse_count),
    }
}

/// Reduce a playlist song to the fields a tagger searches by, trimmed.
pub fn playlist_item(record: &dto::Song) -> PlaylistItem {
    PlaylistItem {
        title: unescape_entities(record.title.as_deref().unwrap_or_default())
            .trim()
            .to_string(),
        artist: record.artists.as_deref().unwrap_or_default().trim().to_string(),
        album: unescape_entities(record.album.as_deref().unwrap_or_default())
            .trim()
            .to_string(),
    }
}

/// The gateway HTML-escapes text fields. `&amp;` is replaced last so
/// double-escaped input cannot re-expand.
fn unescape_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Ids arrive as numbers or strings depending on the endpoint; normalize
/// to a string.
fn id_string(value: Option<&dto::NumberOrString>) -> Option<String> {
    match value? {
        dto::NumberOrString::Int(i) => Some(i.to_string()),
        dto::NumberOrString::Float(f) => Some(f.to_string()),
        dto::NumberOrString::Str(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
    }
}

/// Parse a count the gateway may abbreviate: "55K+" is 55000, "1.2M+" is
/// 1200000, "<100" is 100, plain digits pass through. Unparseable input
/// yields `None`.
fn parse_count(value: &dto::NumberOrString) -> Option<u64> {
    match value {
        dto::NumberOrString::Int(i) => u64::try_from(*i).ok(),
        dto::NumberOrString::Float(f) if *f >= 0.0 && f.is_finite() => Some(*f as u64),
        dto::NumberOrString::Float(_) => None,
        dto::NumberOrString::Str(s) => parse_count_str(s),
    }
}

fn parse_count_str(raw: &str) -> Option<u64> {
    let mut s = raw.trim();
    s = s.strip_prefix('<').unwrap_or(s);
    s = s.strip_suffix('+').unwrap_or(s);
    let (digits, scale) = if let Some(rest) = s.strip_suffix('K').or_else(|| s.strip_suffix('k')) {
        (rest, 1_000.0)
    } else if let Some(rest) = s.strip_suffix('M').or_else(|| s.strip_suffix('m')) {
        (rest, 1_000_000.0)
    } else {
        (s, 1.0)
    };
    let value: f64 = digits.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * scale) as u64)
}

/// Track popularity is "plays~favorites"; the integer before `~` wins,
/// falling back to the album-style play count field.
fn popularity(record: &dto::Song) -> Option<u64> {
    let direct = match record.popularity.as_ref() {
        Some(dto::NumberOrString::Str(s)) => s
            .split('~')
            .next()
            .and_then(|head| head.trim().parse().ok()),
        Some(dto::NumberOrString::Int(i)) => u64::try_from(*i).ok(),
        Some(dto::NumberOrString::Float(f)) if *f >= 0.0 && f.is_finite() => Some(*f as u64),
        _ => None,
    };
    direct.or_else(|| record.play_count.as_ref().and_then(parse_count))
}

/// Durations arrive as whole-second strings, sometimes padded.
fn duration_secs(value: Option<&dto::NumberOrString>) -> Option<u32> {
    match value? {
        dto::NumberOrString::Int(i) => u32::try_from(*i).ok(),
        dto::NumberOrString::Float(f) if *f >= 0.0 && f.is_finite() => Some(*f as u32),
        dto::NumberOrString::Float(_) => None,
        dto::NumberOrString::Str(s) => s.trim().parse().ok(),
    }
}

/// Release dates are "YYYY-MM-DD"; anything else yields no date at all.
fn release_date_parts(raw: &str) -> Option<(i32, u32, u32)> {
    let mut parts = raw.trim().split('-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((year, month, day))
}

fn genres_string(value: Option<&dto::Genres>) -> Option<String> {
    match value? {
        dto::Genres::One(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        dto::Genres::Many(list) => {
            let joined = list
                .iter()
                .map(|genre| genre.trim())
                .filter(|genre| !genre.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
    }
}
