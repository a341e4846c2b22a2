//! Capability trait for metadata sources.
//!
//! Hosts consume sources through this trait rather than the concrete
//! type, so a tagging pipeline can mix several sources and tests can
//! substitute canned ones.
//!
//! # Example
//!
//! ```ignore
//! use gaana_source::gaana::traits::MetadataSource;
//!
//! async fn gather(source: &impl MetadataSource) {
//!     let candidates = source.album_candidates("The Beatles", "Abbey Road", false).await;
//! }
//! ```

use async_trait::async_trait;

use super::domain::{AlbumInfo, TrackInfo, DATA_SOURCE};
use super::source::GaanaSource;

/// A catalog that can answer album/track candidate queries.
///
/// All methods degrade to empty/`None` rather than erroring; a source
/// that cannot answer simply contributes nothing.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Tag hosts use to attribute this source's candidates.
    fn source_name(&self) -> &'static str;

    /// Album candidates for a release/artist pair.
    async fn album_candidates(
        &self,
        artist: &str,
        release: &str,
        va_likely: bool,
    ) -> Vec<AlbumInfo>;

    /// Track candidates for a title/artist pair.
    async fn track_candidates(&self, artist: &str, title: &str) -> Vec<TrackInfo>;

    /// Resolve a catalog URL to a single album.
    async fn album_for_id(&self, album_url: &str) -> Option<AlbumInfo>;

    /// Resolve a catalog URL to a single track.
    async fn track_for_id(&self, track_url: &str) -> Option<TrackInfo>;
}

#[async_trait]
impl MetadataSource for GaanaSource {
    fn source_name(&self) -> &'static str {
        DATA_SOURCE
    }

    async fn album_candidates(
        &self,
        artist: &str,
        release: &str,
        va_likely: bool,
    ) -> Vec<AlbumInfo> {
        self.album_candidates(artist, release, va_likely).await
    }

    async fn track_candidates(&self, artist: &str, title: &str) -> Vec<TrackInfo> {
        self.track_candidates(artist, title).await
    }

    async fn album_for_id(&self, album_url: &str) -> Option<AlbumInfo> {
        self.album_for_id(album_url).await
    }

    async fn track_for_id(&self, track_url: &str) -> Option<TrackInfo> {
        self.track_for_id(track_url).await
    }
}
