//! Source service - orchestrates the lookup flow against the gateway.
//!
//! This is the high-level API hosts consume:
//! 1. Sanitize the free-text query
//! 2. Search the gateway for hits
//! 3. Fetch the detail record for each hit and map it
//! 4. Validate cover art before an album carries its URL

use crate::artwork::ArtworkValidator;
use crate::gaana::{
    adapter,
    client::GaanaClient,
    domain::{AlbumInfo, ArtistInfo, PlaylistItem, TrackInfo},
    dto, query,
};

/// Gaana metadata source.
pub struct GaanaSource {
    client: GaanaClient,
    artwork: ArtworkValidator,
}

impl GaanaSource {
    /// Create a source for the given gateway base URL.
    pub fn new(baseurl: impl Into<String>) -> Self {
        Self {
            client: GaanaClient::new(baseurl),
            artwork: ArtworkValidator::new(),
        }
    }

    /// Album candidates for a release/artist pair.
    ///
    /// For likely various-artists releases the artist name only hurts
    /// the search, so the query is the release title alone. Hits whose
    /// detail fetch comes back empty are skipped.
    pub async fn album_candidates(
        &self,
        artist: &str,
        release: &str,
        va_likely: bool,
    ) -> Vec<AlbumInfo> {
        let clean = query::sanitize(&candidate_query(artist, release, va_likely));
        tracing::debug!(query = %clean, "searching for albums");

        let hits = self.client.search_albums(&clean).await;
        let total = hits.len();
        let mut albums = Vec::new();
        for (i, hit) in hits.iter().enumerate() {
            let Some(seokey) = hit.seokey.as_deref() else {
                tracing::debug!("album hit without seokey, skipping");
                continue;
            };
            let details = self.client.album_details(seokey).await;
            let Some(record) = details.first() else {
                tracing::debug!(seokey, "album details empty, skipping");
                continue;
            };
            let album = self.materialize_album(record).await;
            tracing::debug!(index = i + 1, total, title = %album.title, "processed album");
            albums.push(album);
        }
        albums
    }

    /// Track candidates for a title/artist pair.
    pub async fn track_candidates(&self, artist: &str, title: &str) -> Vec<TrackInfo> {
        let clean = query::sanitize(&format!("{title} {artist}"));
        tracing::debug!(query = %clean, "searching for tracks");

        let hits = self.client.search_songs(&clean).await;
        let total = hits.len();
        let mut tracks = Vec::new();
        for (i, hit) in hits.iter().enumerate() {
            let Some(seokey) = hit.seokey.as_deref() else {
                tracing::debug!("track hit without seokey, skipping");
                continue;
            };
            let details = self.client.song_details(seokey).await;
            let Some(record) = details.first() else {
                tracing::debug!(seokey, "track details empty, skipping");
                continue;
            };
            let track = adapter::track_info(record);
            tracing::debug!(index = i + 1, total, title = %track.title, "processed track");
            tracks.push(track);
        }
        tracks
    }

    /// Artist search, mapped straight from the search response.
    pub async fn artist_search(&self, query: &str) -> Vec<ArtistInfo> {
        let clean = query::sanitize(query);
        tracing::debug!(query = %clean, "searching for artists");
        self.client
            .search_artists(&clean)
            .await
            .iter()
            .map(adapter::artist_info)
            .collect()
    }

    /// Artist detail lookup by seokey.
    pub async fn artist_for_seokey(&self, seokey: &str) -> Option<ArtistInfo> {
        let details = self.client.artist_details(seokey).await;
        details.first().map(adapter::artist_info)
    }

    /// Fetch an album by its gaana.com URL. Anything that is not an
    /// album URL yields `None` without touching the network.
    pub async fn album_for_id(&self, album_url: &str) -> Option<AlbumInfo> {
        if !album_url.contains("gaana.com/album/") {
            return None;
        }
        tracing::debug!(url = album_url, "looking up album by URL");
        let details = self.client.album_details(seokey_from_url(album_url)).await;
        let record = details.first()?;
        Some(self.materialize_album(record).await)
    }

    /// Fetch a track by its gaana.com URL.
    pub async fn track_for_id(&self, track_url: &str) -> Option<TrackInfo> {
        if !track_url.contains("gaana.com/song/") {
            return None;
        }
        tracing::debug!(url = track_url, "looking up track by URL");
        let details = self.client.song_details(seokey_from_url(track_url)).await;
        details.first().map(adapter::track_info)
    }

    /// Playlist contents reduced to search-ready items.
    ///
    /// A URL without a playlist path is an operator mistake worth more
    /// than a debug line; it is logged as an error and yields nothing.
    pub async fn playlist_items(&self, playlist_url: &str) -> Vec<PlaylistItem> {
        if !playlist_url.contains("/playlist/") {
            tracing::error!(url = playlist_url, "not a Gaana playlist URL");
            return Vec::new();
        }
        let songs = self.client.playlist_details(seokey_from_url(playlist_url)).await;
        tracing::debug!(url = playlist_url, songs = songs.len(), "fetched playlist");
        songs.iter().map(adapter::playlist_item).collect()
    }

    /// Map an album record and validate its artwork URL, clearing the
    /// URL when the image does not decode.
    async fn materialize_album(&self, record: &dto::Album) -> AlbumInfo {
        let mut album = adapter::album_info(record);
        if let Some(url) = album.cover_art_url.take() {
            if self.artwork.is_decodable(&url).await {
                album.cover_art_url = Some(url);
            } else {
                tracing::debug!(url = %url, "cover art failed validation, dropping");
            }
        }
        album
    }
}

fn candidate_query(artist: &str, release: &str, va_likely: bool) -> String {
    if va_likely {
        release.to_string()
    } else {
        format!("{release} {artist}")
    }
}

/// The trailing path segment of a catalog URL is its seokey.
fn seokey_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
