//! Candidate scoring against local library items.
//!
//! Reproduces the weighted-penalty convention of autotagging hosts: each
//! compared attribute contributes penalties in [0,1] under a named key,
//! every key carries a fixed weight, and the weighted sum is the raw
//! distance (0 = perfect match). A normalized quotient against the
//! maximum possible penalty is exposed for display.
//!
//! `album_distance` and `track_distance` are pure functions; the
//! configured `source_weight` scales the aggregate raw penalty so one
//! source's candidates can be biased against another's without breaking
//! the exact-match-scores-zero property.

use std::collections::BTreeMap;

use crate::gaana::domain::{AlbumInfo, TrackInfo};

/// Years further apart than this take the full year penalty.
const YEAR_SPAN: f64 = 75.0;
/// Track length differences inside the grace window cost nothing.
const TRACK_LENGTH_GRACE: f64 = 10.0;
/// Length penalty reaches 1.0 once the over-grace difference hits this.
const TRACK_LENGTH_MAX: f64 = 30.0;

fn weight(key: &str) -> f64 {
    match key {
        "source" => 2.0,
        "artist" => 3.0,
        "album" => 3.0,
        "year" => 1.0,
        "tracks" => 2.0,
        "track_title" => 3.0,
        "track_artist" => 2.0,
        "track_index" => 1.0,
        "track_length" => 2.0,
        _ => 1.0,
    }
}

/// A local album the host is trying to tag, reduced to the attributes
/// this source can compare.
#[derive(Debug, Clone, Default)]
pub struct LocalAlbum {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub tracks: Vec<LocalTrack>,
}

/// A local track, standalone or part of a [`LocalAlbum`].
#[derive(Debug, Clone, Default)]
pub struct LocalTrack {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub index: Option<u32>,
    pub length: Option<u32>,
}

/// Weighted penalty accumulator.
#[derive(Debug, Clone)]
pub struct Distance {
    penalties: BTreeMap<&'static str, Vec<f64>>,
    scale: f64,
}

impl Distance {
    pub fn new() -> Self {
        Self::scaled(1.0)
    }

    /// An accumulator whose raw distance is scaled by `source_weight`.
    pub fn scaled(source_weight: f64) -> Self {
        Self {
            penalties: BTreeMap::new(),
            scale: source_weight,
        }
    }

    /// Record a penalty in [0,1] under a key; out-of-range values clamp.
    pub fn add(&mut self, key: &'static str, penalty: f64) {
        self.penalties
            .entry(key)
            .or_default()
            .push(penalty.clamp(0.0, 1.0));
    }

    /// Full penalty when the condition holds, none otherwise.
    pub fn add_expr(&mut self, key: &'static str, expr: bool) {
        self.add(key, if expr { 1.0 } else { 0.0 });
    }

    /// One unit penalty per whole number of difference.
    pub fn add_number(&mut self, key: &'static str, a: i64, b: i64) {
        let diff = (a - b).unsigned_abs();
        if diff == 0 {
            self.add(key, 0.0);
        } else {
            for _ in 0..diff {
                self.add(key, 1.0);
            }
        }
    }

    /// Penalty proportional to `value / ceiling`, clamped to [0,1].
    pub fn add_ratio(&mut self, key: &'static str, value: f64, ceiling: f64) {
        let penalty = if ceiling > 0.0 { value / ceiling } else { 0.0 };
        self.add(key, penalty);
    }

    /// Penalty from case-insensitive edit distance between two strings.
    pub fn add_string(&mut self, key: &'static str, a: &str, b: &str) {
        self.add(key, string_penalty(a, b));
    }

    /// Weighted sum of penalties, scaled by the source weight.
    pub fn raw(&self) -> f64 {
        let sum: f64 = self
            .penalties
            .iter()
            .map(|(key, penalties)| weight(key) * penalties.iter().sum::<f64>())
            .sum();
        self.scale * sum
    }

    /// Raw distance divided by the maximum penalty the recorded
    /// comparisons could have produced; 0.0 when nothing was compared.
    pub fn normalized(&self) -> f64 {
        let max: f64 = self
            .penalties
            .iter()
            .map(|(key, penalties)| weight(key) * penalties.len() as f64)
            .sum();
        if max > 0.0 { self.raw() / max } else { 0.0 }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::new()
    }
}

fn string_penalty(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    1.0 - strsim::normalized_levenshtein(&a, &b)
}

/// Score a candidate album against a local one.
///
/// Attributes absent on the local side are skipped; a local attribute the
/// candidate cannot answer takes the full penalty. Tracks are compared
/// pairwise in listing order (the host's matcher owns any smarter
/// pairing): each pair contributes its normalized track distance under
/// the `tracks` key, and a count mismatch adds one unit penalty per
/// differing track.
pub fn album_distance(local: &LocalAlbum, candidate: &AlbumInfo, source_weight: f64) -> Distance {
    let mut dist = Distance::scaled(source_weight);

    match (local.artist.as_deref(), candidate.artist.as_deref()) {
        (Some(ours), Some(theirs)) => dist.add_string("artist", ours, theirs),
        (Some(_), None) => dist.add("artist", 1.0),
        (None, _) => {}
    }

    if let Some(album) = local.album.as_deref() {
        dist.add_string("album", album, &candidate.title);
    }

    if let Some(year) = local.year {
        match candidate.year {
            Some(candidate_year) => {
                let diff = f64::from((year - candidate_year).abs());
                dist.add("year", (diff / YEAR_SPAN).min(1.0));
            }
            None => dist.add("year", 1.0),
        }
    }

    if !local.tracks.is_empty() {
        dist.add_number(
            "tracks",
            local.tracks.len() as i64,
            candidate.tracks.len() as i64,
        );
        for (ours, theirs) in local.tracks.iter().zip(&candidate.tracks) {
            dist.add("tracks", track_penalties(ours, theirs).normalized());
        }
    }

    dist
}

/// Score a candidate track against a local one.
pub fn track_distance(local: &LocalTrack, candidate: &TrackInfo, source_weight: f64) -> Distance {
    let mut dist = track_penalties(local, candidate);
    dist.scale = source_weight;
    dist
}

fn track_penalties(local: &LocalTrack, candidate: &TrackInfo) -> Distance {
    let mut dist = Distance::new();

    if let Some(title) = local.title.as_deref() {
        dist.add_string("track_title", title, &candidate.title);
    }

    match (local.artist.as_deref(), candidate.artist.as_deref()) {
        (Some(ours), Some(theirs)) => dist.add_string("track_artist", ours, theirs),
        (Some(_), None) => dist.add("track_artist", 1.0),
        (None, _) => {}
    }

    if let (Some(ours), Some(theirs)) = (local.index, candidate.index) {
        dist.add_expr("track_index", ours != theirs);
    }

    if let (Some(ours), Some(theirs)) = (local.length, candidate.length) {
        let diff = (f64::from(ours) - f64::from(theirs)).abs() - TRACK_LENGTH_GRACE;
        dist.add_ratio("track_length", diff, TRACK_LENGTH_MAX);
    }

    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn candidate_album() -> AlbumInfo {
        AlbumInfo {
            title: "Abbey Road".to_string(),
            artist: Some("The Beatles".to_string()),
            year: Some(1969),
            tracks: vec![
                candidate_track("Come Together", 1, 259),
                candidate_track("Something", 2, 182),
            ],
            ..Default::default()
        }
    }

    fn candidate_track(title: &str, index: u32, length: u32) -> TrackInfo {
        TrackInfo {
            title: title.to_string(),
            artist: Some("The Beatles".to_string()),
            index: Some(index),
            length: Some(length),
            ..Default::default()
        }
    }

    fn matching_local() -> LocalAlbum {
        LocalAlbum {
            artist: Some("The Beatles".to_string()),
            album: Some("Abbey Road".to_string()),
            year: Some(1969),
            tracks: vec![
                LocalTrack {
                    title: Some("Come Together".to_string()),
                    artist: Some("The Beatles".to_string()),
                    index: Some(1),
                    length: Some(259),
                },
                LocalTrack {
                    title: Some("Something".to_string()),
                    artist: Some("The Beatles".to_string()),
                    index: Some(2),
                    length: Some(182),
                },
            ],
        }
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let dist = album_distance(&matching_local(), &candidate_album(), 0.5);
        assert!(dist.raw().abs() < EPSILON, "raw was {}", dist.raw());
        assert!(dist.normalized().abs() < EPSILON);
    }

    #[test]
    fn test_string_comparison_is_case_insensitive() {
        let mut local = matching_local();
        local.album = Some("ABBEY ROAD".to_string());
        local.artist = Some("the beatles".to_string());
        let dist = album_distance(&local, &candidate_album(), 0.5);
        assert!(dist.raw().abs() < EPSILON);
    }

    #[test]
    fn test_single_mismatch_is_positive_and_bounded() {
        let mut local = matching_local();
        local.album = Some("Completely Different Name".to_string());
        let dist = album_distance(&local, &candidate_album(), 0.5);
        assert!(dist.raw() > 0.0);
        assert!(dist.raw() <= weight("album"));
    }

    #[test]
    fn test_year_difference_scales() {
        let mut local = matching_local();
        local.year = Some(1970);
        let dist = album_distance(&local, &candidate_album(), 1.0);
        let expected = weight("year") * (1.0 / YEAR_SPAN);
        assert!((dist.raw() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_missing_candidate_year_takes_full_penalty() {
        let mut candidate = candidate_album();
        candidate.year = None;
        let dist = album_distance(&matching_local(), &candidate, 1.0);
        assert!((dist.raw() - weight("year")).abs() < EPSILON);
    }

    #[test]
    fn test_track_count_mismatch_adds_unit_penalties() {
        let mut local = matching_local();
        local.tracks.push(LocalTrack {
            title: Some("Extra".to_string()),
            ..Default::default()
        });
        let dist = album_distance(&local, &candidate_album(), 1.0);
        // one differing track: a single full-weight unit under "tracks"
        assert!((dist.raw() - weight("tracks")).abs() < EPSILON);
    }

    #[test]
    fn test_source_weight_scales_raw_distance() {
        let mut local = matching_local();
        local.album = Some("Something Else".to_string());
        let full = album_distance(&local, &candidate_album(), 1.0);
        let half = album_distance(&local, &candidate_album(), 0.5);
        assert!((half.raw() - full.raw() * 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_track_length_grace_window() {
        let local = LocalTrack {
            length: Some(259),
            ..Default::default()
        };
        let near = candidate_track("x", 1, 264);
        let dist = track_distance(&local, &near, 1.0);
        assert!(dist.raw().abs() < EPSILON, "5s inside grace, raw {}", dist.raw());

        let far = candidate_track("x", 1, 289);
        let dist = track_distance(&local, &far, 1.0);
        let expected = weight("track_length") * ((30.0 - TRACK_LENGTH_GRACE) / TRACK_LENGTH_MAX);
        assert!((dist.raw() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_track_length_penalty_caps_at_weight() {
        let local = LocalTrack {
            length: Some(100),
            ..Default::default()
        };
        let way_off = candidate_track("x", 1, 500);
        let dist = track_distance(&local, &way_off, 1.0);
        assert!((dist.raw() - weight("track_length")).abs() < EPSILON);
    }

    #[test]
    fn test_track_index_mismatch() {
        let local = LocalTrack {
            index: Some(3),
            ..Default::default()
        };
        let candidate = candidate_track("x", 4, 200);
        let dist = track_distance(&local, &candidate, 1.0);
        assert!((dist.raw() - weight("track_index")).abs() < EPSILON);
    }

    #[test]
    fn test_empty_comparison_normalizes_to_zero() {
        let dist = Distance::new();
        assert_eq!(dist.raw(), 0.0);
        assert_eq!(dist.normalized(), 0.0);
    }

    #[test]
    fn test_add_clamps_out_of_range_penalties() {
        let mut dist = Distance::new();
        dist.add("album", 7.5);
        assert!((dist.raw() - weight("album")).abs() < EPSILON);

        let mut dist = Distance::new();
        dist.add("album", -2.0);
        assert_eq!(dist.raw(), 0.0);
    }

    #[test]
    fn test_explicit_source_penalty_key() {
        let mut dist = Distance::scaled(0.5);
        dist.add("source", 1.0);
        assert!((dist.raw() - 1.0).abs() < EPSILON);
    }
}
