// ============================================================
// Layer 3 - Gloss Lexical Rules
// ============================================================
// A gloss mixes lexical stems ("dog", "Look") with grammatical
// tags ("PL", "ERG", "3SG") joined by `.`, `-` and `~`.
//
// Telling them apart is purely lexical: every maximal run of an
// optional capital followed by lowercase letters is a stem, the
// rest (uppercase tags, digits, punctuation) is not. There is no
// tag inventory lookup.
//
// Marker insertion and stem extraction both walk the same runs,
// so a sentence always has exactly as many [STEM] markers as
// extracted stems:
//
//   "dogCat-PL"   ->  [STEM][STEM]-PL    dog, Cat
//   "1sg-go"      ->  1[STEM]-[STEM]     sg, go

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder standing in for a stem in gloss token sequences
pub const STEM_MARKER: &str = "[STEM]";

/// Morpheme separators inside a gloss word
pub const MORPHEME_SEPARATORS: [char; 3] = ['.', '-', '~'];

lazy_static! {
    static ref STEM_RUN: Regex = Regex::new(r"[A-Z]?[a-z]+").unwrap();
}

/// Stem runs of a gloss, left to right.
///
/// `girl` and `Look` are stems; `PL`, `3SG` and the empty string
/// yield nothing.
pub fn stem_runs(gloss: &str) -> impl Iterator<Item = &str> {
    STEM_RUN.find_iter(gloss).map(|m| m.as_str())
}

/// Replace every stem run with [STEM]
pub fn mark_stems(gloss: &str) -> Cow<'_, str> {
    STEM_RUN.replace_all(gloss, STEM_MARKER)
}

/// Number of placeholder markers in a token
pub fn count_markers(token: &str) -> usize {
    token.matches(STEM_MARKER).count()
}
