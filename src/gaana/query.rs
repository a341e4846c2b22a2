//! Search query sanitizing.
//!
//! The gateway's search endpoints are picky: punctuation like "!" or "-"
//! can make a query return nothing even when the words match, and medium
//! markers like "CD1" or "disc 2" negate otherwise good results.

use once_cell::sync::Lazy;
use regex::Regex;

/// Medium markers embedded in release titles ("CD1", "Disc 2", "cd 10").
static MEDIUM_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(cd|disc)\s*\d+").expect("valid regex"));

/// Runs of non-word characters, Unicode-aware so non-English titles survive.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Normalize a free-text search string before it hits the gateway.
///
/// Collapses every non-word run to a single space, then removes medium
/// markers from the collapsed text, so "CD-1" goes the same way as
/// "CD1". Always returns a trimmed string, possibly empty.
pub fn sanitize(query: &str) -> String {
    let collapsed = NON_WORD.replace_all(query, " ");
    let stripped = MEDIUM_MARKER.replace_all(&collapsed, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_punctuation_runs() {
        assert_eq!(sanitize("Let It Be!!!"), "Let It Be");
        assert_eq!(sanitize("AC/DC - Back in Black"), "AC DC Back in Black");
    }

    #[test]
    fn removes_medium_markers() {
        assert_eq!(sanitize("Abbey Road (Disc 1)"), "Abbey Road");
        assert_eq!(sanitize("The Wall CD2"), "The Wall");
        assert_eq!(sanitize("Greatest Hits disc 10 remaster"), "Greatest Hits remaster");
    }

    #[test]
    fn removes_markers_split_by_punctuation() {
        assert_eq!(sanitize("Abbey Road CD-1"), "Abbey Road");
        assert_eq!(sanitize("The Dark Side of the Moon (Disc.2)"), "The Dark Side of the Moon");
    }

    #[test]
    fn medium_marker_is_case_insensitive() {
        assert_eq!(sanitize("Live DISC 3"), "Live");
        assert_eq!(sanitize("Live cd1"), "Live");
    }

    #[test]
    fn keeps_words_containing_marker_letters() {
        assert_eq!(sanitize("Discovery 1"), "Discovery 1");
        assert_eq!(sanitize("acdc 2"), "acdc 2");
    }

    #[test]
    fn preserves_non_english_words() {
        assert_eq!(sanitize("tu hai to mujhe"), "tu hai to mujhe");
        assert_eq!(sanitize("Café Tacvba: Re"), "Café Tacvba Re");
        assert_eq!(sanitize("तू है तो"), "तू है तो");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize("  Kind   of\tBlue  "), "Kind of Blue");
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("!!! --- ???"), "");
        assert_eq!(sanitize("CD1"), "");
    }

    proptest! {
        /// Any input sanitizes without panicking, trimmed and single-spaced
        #[test]
        fn sanitize_output_is_trimmed_and_single_spaced(input in "\\PC*") {
            let clean = sanitize(&input);
            prop_assert!(!clean.starts_with(' '), "leading space in: {:?}", clean);
            prop_assert!(!clean.ends_with(' '), "trailing space in: {:?}", clean);
            prop_assert!(!clean.contains("  "), "double space in: {:?}", clean);
        }

        /// Everything left after sanitizing is word characters and spaces
        #[test]
        fn sanitize_output_has_no_non_word_residue(input in "\\PC*") {
            let clean = sanitize(&input).replace(' ', "");
            prop_assert!(!NON_WORD.is_match(&clean), "residue in: {:?}", clean);
        }
    }
}
