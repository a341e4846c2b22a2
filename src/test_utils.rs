//! Test utilities and fixtures for gaana-source tests.
//!
//! Provides canned gateway payloads, a tiny canned-response HTTP server
//! and network helpers to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use gaana_source::test_utils::{spawn_stub_server, StubRoute, album_search_json};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let base = spawn_stub_server(vec![
//!         StubRoute::json("/albums/search", album_search_json()),
//!     ]);
//!     // ... drive a client against `base`
//! }
//! ```

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// A canned response served when the request line contains `path`.
pub struct StubRoute {
    path: &'static str,
    status_line: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
}

impl StubRoute {
    pub fn json(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status_line: "HTTP/1.1 200 OK",
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(path: &'static str, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            path,
            status_line: "HTTP/1.1 200 OK",
            content_type,
            body,
        }
    }

    pub fn not_found(path: &'static str) -> Self {
        Self {
            path,
            status_line: "HTTP/1.1 404 Not Found",
            content_type: "text/plain",
            body: b"not found".to_vec(),
        }
    }
}

/// Spawn a thread answering HTTP requests with canned bodies, matched by
/// request-line substring. Returns the server's base URL.
///
/// Responses carry `Connection: close` so every request opens a fresh
/// connection. The listener thread lives until the test process exits.
pub fn spawn_stub_server(routes: Vec<StubRoute>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub server addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                match stream.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        request.extend_from_slice(&buf[..n]);
                        if request.windows(4).any(|window| window == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            let request_text = String::from_utf8_lossy(&request);
            let request_line = request_text.lines().next().unwrap_or_default();
            let route = routes.iter().find(|route| request_line.contains(route.path));

            let (status_line, content_type, body): (&str, &str, &[u8]) = match route {
                Some(route) => (route.status_line, route.content_type, &route.body),
                None => ("HTTP/1.1 404 Not Found", "text/plain", b"no route"),
            };

            let header = format!(
                "{status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
    });

    format!("http://{addr}")
}

/// A localhost URL nothing listens on: bind an ephemeral port, note it,
/// drop the listener. Connections are refused immediately, which keeps
/// degradation tests fast.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

/// A tiny valid PNG for artwork tests.
pub fn png_bytes() -> Vec<u8> {
    let image = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        2,
        2,
        image::Rgba([10, 20, 30, 255]),
    ));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode test png");
    bytes
}

/// One search hit, shaped like the `/albums/search` response.
pub fn album_search_json() -> &'static str {
    r#"[{"seokey": "abbey-road", "title": "Abbey Road", "album_id": 123456, "artists": "The Beatles"}]"#
}

/// Detail payload for that hit with two tracks, shaped like `/albums/info`.
pub fn album_details_json() -> &'static str {
    r#"[{
        "seokey": "abbey-road",
        "album_id": 123456,
        "title": "Abbey Road &quot;Remaster&quot;",
        "artists": "The Beatles",
        "artist_seokeys": "the-beatles",
        "artist_ids": 789,
        "release_date": "1969-09-26",
        "label": "Apple Records",
        "play_count": "55K+",
        "favorite_count": 1200,
        "tracks": [
            {"seokey": "come-together", "track_id": 1, "title": "Come Together", "artists": "The Beatles", "album": "Abbey Road", "duration": "259", "popularity": "100435~4"},
            {"seokey": "something", "track_id": 2, "title": "Something &amp; More", "artists": "The Beatles", "album": "Abbey Road", "duration": "182", "popularity": "90211~2"}
        ]
    }]"#
}

/// One search hit, shaped like the `/songs/search` response.
pub fn song_search_json() -> &'static str {
    r#"[{"seokey": "come-together", "title": "Come Together", "artists": "The Beatles"}]"#
}

/// Detail payload for that hit, shaped like `/songs/info`.
pub fn song_details_json() -> &'static str {
    r#"[{
        "seokey": "come-together",
        "track_id": 987,
        "title": "Come Together &quot;Remaster&quot;",
        "artists": "The Beatles",
        "artist_ids": "789",
        "album": "Abbey Road",
        "duration": "259",
        "popularity": "100435~4",
        "favorite_count": "55K+",
        "genres": ["Rock"]
    }]"#
}

/// Playlist contents, shaped like `/playlists/info`.
pub fn playlist_json() -> &'static str {
    r#"[
        {"title": " Come Together ", "artists": "The Beatles", "album": "Abbey Road"},
        {"title": "Something &quot;Live&quot;", "artists": " The Beatles ", "album": "Abbey Road &amp; More"}
    ]"#
}

/// Artist search response, shaped like `/artists/search`.
pub fn artist_search_json() -> &'static str {
    r#"[{"name": "The Beatles", "artist_id": 789, "seokey": "the-beatles", "albums": "25", "tracks": "300"}]"#
}
