//! Gaana metadata source - searches the catalog and maps results into
//! records a tagging host can rank and apply.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our records
//! - **API DTOs** (`dto.rs`) - Exact gateway response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Query** (`query.rs`) - Search string sanitizing
//! - **Client** (`client.rs`) - HTTP client for the gateway endpoints
//! - **Source** (`service` in `source.rs`) - High-level orchestration of the lookup flow
//! - **Traits** (`traits.rs`) - The capability contract hosts consume
//!
//! This decoupling means:
//! 1. Gateway changes don't ripple through our codebase
//! 2. We can test the API contract independently
//! 3. Hosts can mix this source with others behind one trait
//!
//! # Usage
//!
//! ```ignore
//! use gaana_source::gaana::GaanaSource;
//!
//! let source = GaanaSource::new("https://gaana-gateway.example.com");
//! let candidates = source.album_candidates("The Beatles", "Abbey Road", false).await;
//! for album in &candidates {
//!     println!("{} ({:?})", album.title, album.year);
//! }
//! ```

pub mod adapter;
pub mod client;
pub mod domain;
pub mod dto;
pub mod query;
pub mod source;
pub mod traits;

pub use client::GaanaClient;
pub use domain::{AlbumInfo, ArtistInfo, PlaylistItem, SourceError, TrackInfo, DATA_SOURCE};
pub use source::GaanaSource;
pub use traits::MetadataSource;
