//! Cover art validation.
//!
//! Album records reference artwork by URL, and the catalog serves dead or
//! truncated images often enough that handing the URL straight to a host
//! pollutes its library. Before a URL is attached to an album the body is
//! fetched once and must decode as an actual image.

use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Checks that image URLs point at decodable images.
pub struct ArtworkValidator {
    http_client: reqwest::Client,
}

impl ArtworkValidator {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self { http_client }
    }

    /// Fetch the URL and try to decode the body as an image.
    ///
    /// Returns false on any failure: unreachable host, non-2xx status,
    /// or a body the image decoder rejects. Never errors or panics.
    pub async fn is_decodable(&self, url: &str) -> bool {
        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(url, error = %err, "artwork fetch failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "artwork fetch rejected");
            return false;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(url, error = %err, "artwork body read failed");
                return false;
            }
        };

        match image::load_from_memory(&body) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(url, error = %err, "artwork body is not an image");
                false
            }
        }
    }
}

impl Default for ArtworkValidator {
    fn default() -> Self {
        Self::new()
    }
}
