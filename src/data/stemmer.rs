// ============================================================
// Layer 4 - Stem Tokenizer
// ============================================================
// The second, sentence-level dataset. The model reads the whole
// free translation and writes the sentence's stems in order:
//
//   translation: "The girl looked."
//   gloss:       "girl-ERG look-PST"
//
//   src:   t h e _ g i r l _ l o o k e d
//   stems: g i r l _ l o o k
//
// Stem order is gloss order, left to right. The reconstructor
// later fills [STEM] placeholders in exactly this order, so the
// two must never disagree.

use crate::data::preprocessor::{explode, Preprocessor};
use crate::domain::gloss::stem_runs;

/// Separator between stems inside a stem sequence
pub const STEM_SEPARATOR: &str = "_";

pub struct StemTokenizer {
    preprocessor: Preprocessor,
}

impl StemTokenizer {
    pub fn new() -> Self {
        Self { preprocessor: Preprocessor::new() }
    }

    /// Character-level translation tokens
    pub fn tokenize_translation(&self, translation: &str) -> String {
        self.preprocessor.translation_tokens(translation)
    }

    /// Character-level stem sequence for a gloss line
    pub fn stem_sequence(&self, gloss: &str) -> String {
        explode(&extract_stems(gloss).join(STEM_SEPARATOR))
    }
}

impl Default for StemTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, lowercased stems of a gloss line. Tags are dropped.
/// One stem per [STEM] marker `tokenize_gloss` writes for the
/// same line.
pub fn extract_stems(gloss: &str) -> Vec<String> {
    stem_runs(gloss).map(str::to_lowercase).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::window::tokenize_gloss;
    use crate::domain::gloss::count_markers;
    use proptest::prelude::*;

    #[test]
    fn test_extract_stems_drops_tags() {
        assert_eq!(extract_stems("Dog-PL.Cat"), vec!["dog", "cat"]);
        assert_eq!(extract_stems("girl-ERG look-PST"), vec!["girl", "look"]);
        assert!(extract_stems("3SG-PL").is_empty());
    }

    #[test]
    fn test_stem_sequence_is_char_level() {
        let t = StemTokenizer::new();
        assert_eq!(t.stem_sequence("girl-ERG look-PST"), "g i r l _ l o o k");
    }

    #[test]
    fn test_translation_tokens() {
        let t = StemTokenizer::new();
        assert_eq!(t.tokenize_translation("The girl looked."), "t h e _ g i r l _ l o o k e d");
    }

    fn marker_count(gloss: &str) -> usize {
        tokenize_gloss(gloss).iter().map(|w| count_markers(&w.to_line())).sum()
    }

    #[test]
    fn test_placeholders_match_stems_for_typical_gloss() {
        let gloss = "Dog-PL.Cat girl-ERG 3SG~see";
        assert_eq!(marker_count(gloss), extract_stems(gloss).len());
    }

    #[test]
    fn test_placeholders_match_stems_for_irregular_morphemes() {
        assert_eq!(extract_stems("bird(s)-PL see"), vec!["bird", "s", "see"]);
        assert_eq!(extract_stems("dogCat-PL"), vec!["dog", "cat"]);
        assert_eq!(extract_stems("1sg-go"), vec!["sg", "go"]);
        assert_eq!(extract_stems("3=see go"), vec!["see", "go"]);

        for gloss in ["bird(s)-PL see", "3=see go", "dogCat-PL", "1sg-go"] {
            assert_eq!(marker_count(gloss), extract_stems(gloss).len(), "{gloss}");
        }
    }

    // Morphemes as they turn up in real corpora: clean stems and
    // tags, but also mixed case, digits, brackets and clitic `=`
    fn arb_morpheme() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Z]?[a-z]{1,6}",
            "[A-Z0-9]{1,4}",
            "[A-Za-z0-9()=]{1,8}",
        ]
    }

    fn arb_gloss_word() -> impl Strategy<Value = String> {
        (
            arb_morpheme(),
            prop::collection::vec((prop_oneof![Just('.'), Just('-'), Just('~')], arb_morpheme()), 0..4),
        )
            .prop_map(|(head, tail)| {
                let mut word = head;
                for (sep, m) in tail {
                    word.push(sep);
                    word.push_str(&m);
                }
                word
            })
    }

    proptest! {
        #[test]
        fn prop_placeholder_count_equals_stem_count(
            words in prop::collection::vec(arb_gloss_word(), 1..8)
        ) {
            let gloss = words.join(" ");
            prop_assert_eq!(marker_count(&gloss), extract_stems(&gloss).len());
        }
    }
}
