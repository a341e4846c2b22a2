//! Gaana API gateway HTTP client.
//!
//! Talks to an unofficial gateway that fronts the Gaana catalog. Every
//! endpoint is a GET returning a JSON array; search queries must be
//! wrapped in double quotes or the gateway matches nothing.
//!
//! The public collection methods never fail: any network error, non-2xx
//! status or undecodable body is logged at debug level and degrades to an
//! empty `Vec`. Array elements are decoded one by one so a single
//! malformed record is skipped rather than aborting the batch.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::domain::SourceError;
use super::dto;

const SONG_SEARCH: &str = "/songs/search?query=";
const ALBUM_SEARCH: &str = "/albums/search?limit=5&query=";
const ARTIST_SEARCH: &str = "/artists/search?query=";
const SONG_DETAILS: &str = "/songs/info?seokey=";
const ALBUM_DETAILS: &str = "/albums/info?seokey=";
const ARTIST_DETAILS: &str = "/artists/info?seokey=";
const PLAYLIST_DETAILS: &str = "/playlists/info?seokey=";

/// All requests share one bounded timeout; there are no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gaana gateway client.
pub struct GaanaClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GaanaClient {
    /// Create a client for the given gateway base URL.
    ///
    /// The client is configured to:
    /// - Time out every request after 30 seconds
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn search_albums(&self, query: &str) -> Vec<dto::Album> {
        let url = self.search_url(ALBUM_SEARCH, query);
        self.fetch_collection(&url, "album search").await
    }

    pub async fn search_songs(&self, query: &str) -> Vec<dto::Song> {
        let url = self.search_url(SONG_SEARCH, query);
        self.fetch_collection(&url, "song search").await
    }

    pub async fn search_artists(&self, query: &str) -> Vec<dto::Artist> {
        let url = self.search_url(ARTIST_SEARCH, query);
        self.fetch_collection(&url, "artist search").await
    }

    /// Album detail lookup. The gateway answers with a one-element array.
    pub async fn album_details(&self, seokey: &str) -> Vec<dto::Album> {
        let url = self.details_url(ALBUM_DETAILS, seokey);
        self.fetch_collection(&url, "album details").await
    }

    pub async fn song_details(&self, seokey: &str) -> Vec<dto::Song> {
        let url = self.details_url(SONG_DETAILS, seokey);
        self.fetch_collection(&url, "song details").await
    }

    pub async fn artist_details(&self, seokey: &str) -> Vec<dto::Artist> {
        let url = self.details_url(ARTIST_DETAILS, seokey);
        self.fetch_collection(&url, "artist details").await
    }

    /// Playlist contents as song records.
    pub async fn playlist_details(&self, seokey: &str) -> Vec<dto::Song> {
        let url = self.details_url(PLAYLIST_DETAILS, seokey);
        self.fetch_collection(&url, "playlist details").await
    }

    /// Fetch a JSON array and decode each element, degrading to empty on
    /// any failure.
    async fn fetch_collection<T: DeserializeOwned>(&self, url: &str, what: &str) -> Vec<T> {
        match self.fetch_records(url).await {
            Ok(records) => decode_records(records, what),
            Err(err) => {
                tracing::debug!(request = what, error = %err, "request degraded to empty");
                Vec::new()
            }
        }
    }

    async fn fetch_records(&self, url: &str) -> Result<Vec<serde_json::Value>, SourceError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError(format!(
                "HTTP {}: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown"),
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// The gateway expects the query wrapped in double quotes; the quoted
    /// string is then percent-encoded as a whole.
    fn search_url(&self, endpoint: &str, query: &str) -> String {
        let quoted = format!("\"{query}\"");
        format!("{}{}{}", self.base_url, endpoint, urlencoding::encode(&quoted))
    }

    fn details_url(&self, endpoint: &str, seokey: &str) -> String {
        format!("{}{}{}", self.base_url, endpoint, urlencoding::encode(seokey))
    }
}

fn decode_records<T: DeserializeOwned>(records: Vec<serde_json::Value>, what: &str) -> Vec<T> {
    let mut decoded = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value(record) {
            Ok(value) => decoded.push(value),
            Err(err) => tracing::debug!(request = what, error = %err, "skipping malformed record"),
        }
    }
    decoded
}
