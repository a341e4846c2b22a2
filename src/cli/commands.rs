//! CLI command definitions and handlers.
//!
//! Each subcommand resolves the gateway configuration, runs its lookups on
//! a Tokio runtime, and prints the results, standing in for the tagging
//! host that would normally embed the source.

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config;
use crate::gaana::{AlbumInfo, GaanaSource, MetadataSource, TrackInfo};
use crate::matching::{self, LocalAlbum, LocalTrack};

/// Gaana metadata source CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gateway base URL, overriding the config file
    #[arg(long, env = "GAANA_BASEURL", global = true)]
    pub baseurl: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for album candidates, ranked against a local album
    SearchAlbums {
        /// Album artist
        artist: String,
        /// Release title
        release: String,
        /// Treat the release as various-artists (searches by title alone)
        #[arg(long)]
        va: bool,
        /// Release year of the local album, for ranking
        #[arg(long)]
        year: Option<i32>,
        /// Track count of the local album, for ranking
        #[arg(long)]
        tracks: Option<usize>,
    },
    /// Search for track candidates, ranked against a local track
    SearchTracks {
        /// Track artist
        artist: String,
        /// Track title
        title: String,
        /// Length of the local track in seconds, for ranking
        #[arg(long)]
        length: Option<u32>,
        /// Album position of the local track, for ranking
        #[arg(long)]
        index: Option<u32>,
    },
    /// Search the artist catalog
    SearchArtists {
        /// Free-text artist query
        query: String,
    },
    /// Look up an album by its gaana.com URL
    Album {
        /// Album URL, e.g. https://gaana.com/album/<seokey>
        url: String,
    },
    /// Look up a track by its gaana.com URL
    Track {
        /// Track URL, e.g. https://gaana.com/song/<seokey>
        url: String,
    },
    /// List a playlist's contents as search-ready items
    Playlist {
        /// Playlist URL, e.g. https://gaana.com/playlist/<seokey>
        url: String,
    },
    /// Show the effective configuration
    Config {
        /// Write a starter config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::SearchAlbums {
            artist,
            release,
            va,
            year,
            tracks,
        } => cmd_search_albums(
            &rt,
            cli.baseurl.as_deref(),
            artist,
            release,
            *va,
            *year,
            *tracks,
        ),
        Commands::SearchTracks {
            artist,
            title,
            length,
            index,
        } => cmd_search_tracks(&rt, cli.baseurl.as_deref(), artist, title, *length, *index),
        Commands::SearchArtists { query } => cmd_search_artists(&rt, cli.baseurl.as_deref(), query),
        Commands::Album { url } => cmd_album(&rt, cli.baseurl.as_deref(), url),
        Commands::Track { url } => cmd_track(&rt, cli.baseurl.as_deref(), url),
        Commands::Playlist { url } => cmd_playlist(&rt, cli.baseurl.as_deref(), url),
        Commands::Config { init } => cmd_config(cli.baseurl.as_deref(), *init),
    }
}

/// Resolve config, apply the CLI override, and build the source.
fn build_source(baseurl_override: Option<&str>) -> anyhow::Result<(GaanaSource, f64)> {
    let mut config = config::load()?;
    if let Some(url) = baseurl_override {
        config.source.baseurl = Some(url.to_string());
    }
    let baseurl = config.require_baseurl()?;
    tracing::debug!(baseurl, "using gateway");
    Ok((GaanaSource::new(baseurl), config.source.source_weight))
}

/// The local album stub candidates are ranked against. For a likely
/// various-artists release the artist name is not comparable.
fn local_album(
    artist: &str,
    release: &str,
    va: bool,
    year: Option<i32>,
    tracks: Option<usize>,
) -> LocalAlbum {
    LocalAlbum {
        artist: (!va).then(|| artist.to_string()),
        album: Some(release.to_string()),
        year,
        tracks: vec![LocalTrack::default(); tracks.unwrap_or(0)],
    }
}

/// Fetch album candidates and rank them against the local album, best
/// (lowest normalized distance) first.
async fn ranked_album_candidates(
    source: &impl MetadataSource,
    local: &LocalAlbum,
    artist: &str,
    release: &str,
    va_likely: bool,
    source_weight: f64,
) -> Vec<(f64, AlbumInfo)> {
    let mut ranked: Vec<(f64, AlbumInfo)> = source
        .album_candidates(artist, release, va_likely)
        .await
        .into_iter()
        .map(|album| {
            let dist = matching::album_distance(local, &album, source_weight).normalized();
            (dist, album)
        })
        .collect();
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

/// Fetch track candidates and rank them against the local track.
async fn ranked_track_candidates(
    source: &impl MetadataSource,
    local: &LocalTrack,
    artist: &str,
    title: &str,
    source_weight: f64,
) -> Vec<(f64, TrackInfo)> {
    let mut ranked: Vec<(f64, TrackInfo)> = source
        .track_candidates(artist, title)
        .await
        .into_iter()
        .map(|track| {
            let dist = matching::track_distance(local, &track, source_weight).normalized();
            (dist, track)
        })
        .collect();
    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

// ============================================================================
// Individual command implementations
// ============================================================================

fn cmd_search_albums(
    rt: &Runtime,
    baseurl: Option<&str>,
    artist: &str,
    release: &str,
    va: bool,
    year: Option<i32>,
    tracks: Option<usize>,
) -> anyhow::Result<()> {
    let (source, source_weight) = build_source(baseurl)?;
    let local = local_album(artist, release, va, year, tracks);

    rt.block_on(async {
        let ranked =
            ranked_album_candidates(&source, &local, artist, release, va, source_weight).await;
        if ranked.is_empty() {
            println!("No album candidates found.");
            return;
        }

        println!("Found {} album candidate(s):", ranked.len());
        for (dist, album) in &ranked {
            println!();
            print_album_summary(*dist, album);
        }
    });
    Ok(())
}

fn cmd_search_tracks(
    rt: &Runtime,
    baseurl: Option<&str>,
    artist: &str,
    title: &str,
    length: Option<u32>,
    index: Option<u32>,
) -> anyhow::Result<()> {
    let (source, source_weight) = build_source(baseurl)?;
    let local = LocalTrack {
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
        index,
        length,
    };

    rt.block_on(async {
        let ranked = ranked_track_candidates(&source, &local, artist, title, source_weight).await;
        if ranked.is_empty() {
            println!("No track candidates found.");
            return;
        }

        println!("Found {} track candidate(s):", ranked.len());
        for (dist, track) in &ranked {
            println!();
            print_track_summary(*dist, track);
        }
    });
    Ok(())
}

fn cmd_search_artists(rt: &Runtime, baseurl: Option<&str>, query: &str) -> anyhow::Result<()> {
    let (source, _) = build_source(baseurl)?;

    rt.block_on(async {
        let artists = source.artist_search(query).await;
        if artists.is_empty() {
            println!("No artists found.");
            return;
        }

        println!("Found {} artist(s):", artists.len());
        for artist in &artists {
            println!();
            println!("{}", artist.name);
            if let Some(count) = artist.album_count {
                println!("  Albums:  {}", count);
            }
            if let Some(count) = artist.track_count {
                println!("  Tracks:  {}", count);
            }
            if let Some(seokey) = &artist.seokey {
                println!("  URL:     https://gaana.com/artist/{}", seokey);
            }
        }
    });
    Ok(())
}

fn cmd_album(rt: &Runtime, baseurl: Option<&str>, url: &str) -> anyhow::Result<()> {
    let (source, _) = build_source(baseurl)?;

    rt.block_on(async {
        match source.album_for_id(url).await {
            Some(album) => print_album_details(&album),
            None => {
                println!("✗ No album found for {}", url);
                println!("  Expected a URL like https://gaana.com/album/<seokey>");
            }
        }
    });
    Ok(())
}

fn cmd_track(rt: &Runtime, baseurl: Option<&str>, url: &str) -> anyhow::Result<()> {
    let (source, _) = build_source(baseurl)?;

    rt.block_on(async {
        match source.track_for_id(url).await {
            Some(track) => print_track_details(&track),
            None => {
                println!("✗ No track found for {}", url);
                println!("  Expected a URL like https://gaana.com/song/<seokey>");
            }
        }
    });
    Ok(())
}

fn cmd_playlist(rt: &Runtime, baseurl: Option<&str>, url: &str) -> anyhow::Result<()> {
    let (source, _) = build_source(baseurl)?;

    rt.block_on(async {
        let items = source.playlist_items(url).await;
        if items.is_empty() {
            println!("No playlist items found.");
            return;
        }

        println!("Found {} playlist item(s):", items.len());
        for item in &items {
            println!("  {} - {} [{}]", item.artist, item.title, item.album);
        }
    });
    Ok(())
}

fn cmd_config(baseurl: Option<&str>, init: bool) -> anyhow::Result<()> {
    if init {
        let path = config::config_path().ok_or(config::ConfigError::NoConfigDir)?;
        if path.exists() {
            println!("Config file already exists at {:?}", path);
            return Ok(());
        }
        let mut config = config::Config::default();
        if let Some(url) = baseurl {
            config.source.baseurl = Some(url.to_string());
        }
        config::save(&config)?;
        println!("✓ Wrote starter config to {:?}", path);
        if config.source.baseurl.is_none() {
            println!("  Edit it to set `baseurl` under [source].");
        }
        return Ok(());
    }

    let mut config = config::load()?;
    if let Some(url) = baseurl {
        config.source.baseurl = Some(url.to_string());
    }

    match config::config_path() {
        Some(path) if path.exists() => println!("Config file: {:?}", path),
        Some(path) => println!("Config file: {:?} (not present, using defaults)", path),
        None => println!("Config file: (no config directory)"),
    }
    println!(
        "  baseurl:       {}",
        config.source.baseurl.as_deref().unwrap_or("(not set)")
    );
    println!("  source_weight: {}", config.source.source_weight);
    Ok(())
}

// ============================================================================
// Output formatting
// ============================================================================

fn print_album_summary(dist: f64, album: &AlbumInfo) {
    println!("[{:.3}] {}", dist, album.title);
    print_album_fields(album);
    if !album.tracks.is_empty() {
        println!("  Tracks:  {}", album.tracks.len());
    }
}

fn print_album_details(album: &AlbumInfo) {
    println!("{}", album.title);
    print_album_fields(album);
    if !album.tracks.is_empty() {
        println!("  Tracks:");
        for track in &album.tracks {
            let length = match track.length {
                Some(secs) => format!(" ({}:{:02})", secs / 60, secs % 60),
                None => String::new(),
            };
            match track.index {
                Some(index) => println!("    {:2}. {}{}", index, track.title, length),
                None => println!("        {}{}", track.title, length),
            }
        }
    }
}

fn print_album_fields(album: &AlbumInfo) {
    if let Some(artist) = &album.artist {
        println!("  Artist:  {}", artist);
    }
    match (album.year, album.month, album.day) {
        (Some(y), Some(m), Some(d)) => println!("  Date:    {:04}-{:02}-{:02}", y, m, d),
        (Some(y), _, _) => println!("  Year:    {}", y),
        _ => {}
    }
    if let Some(label) = &album.label {
        println!("  Label:   {}", label);
    }
    if let Some(count) = album.play_count {
        println!("  Plays:   {}", count);
    }
    if let Some(url) = &album.cover_art_url {
        println!("  Art:     {}", url);
    }
    if let Some(seokey) = &album.seokey {
        println!("  URL:     https://gaana.com/album/{}", seokey);
    }
}

fn print_track_summary(dist: f64, track: &TrackInfo) {
    println!("[{:.3}] {}", dist, track.title);
    print_track_fields(track);
}

fn print_track_details(track: &TrackInfo) {
    println!("{}", track.title);
    print_track_fields(track);
}

fn print_track_fields(track: &TrackInfo) {
    if let Some(artist) = &track.artist {
        println!("  Artist:  {}", artist);
    }
    if let Some(album) = &track.album {
        println!("  Album:   {}", album);
    }
    if let Some(secs) = track.length {
        println!("  Length:  {}:{:02}", secs / 60, secs % 60);
    }
    if let Some(genres) = &track.genres {
        println!("  Genres:  {}", genres);
    }
    if let Some(popularity) = track.popularity {
        println!("  Plays:   {}", popularity);
    }
    if let Some(seokey) = &track.seokey {
        println!("  URL:     https://gaana.com/song/{}", seokey);
    }
}

// ============================================================================
// Tests
// ============================================================================
