// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Normalises raw source and translation lines before they are
// turned into character-level model tokens.
//
// Source lines (object language):
//   1. lowercase
//   2. drop `.` `,` `;` `:`
//   3. split on single spaces into words
//
// Translation lines (for the stem model):
//   1. lowercase
//   2. drop `.` `,` `;` `:` `!` `-` `'` `"` and parenthesised
//      single words such as "(lit)"
//   3. spaces become `_` so word boundaries survive as characters
//
// The model works on characters, so both end with `explode`,
// which space-separates every character of a string.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SOURCE_PUNCT: Regex      = Regex::new(r"[.,;:]").unwrap();
    static ref TRANSLATION_PUNCT: Regex = Regex::new(r#"[.,;:!\-'"]|\(\w+\)"#).unwrap();
}

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Lowercase, strip sentence punctuation and split into words.
    ///
    /// Splitting is on single spaces, not arbitrary whitespace:
    /// a doubled space yields an empty word, which keeps the word
    /// count identical to the gloss line split the same way.
    pub fn source_words(&self, source: &str) -> Vec<String> {
        let lowered = source.to_lowercase();
        let cleaned = SOURCE_PUNCT.replace_all(&lowered, "");
        cleaned.split(' ').map(str::to_string).collect()
    }

    /// Character-level translation tokens, `_` between words.
    pub fn translation_tokens(&self, translation: &str) -> String {
        let lowered = translation.to_lowercase();
        let cleaned = TRANSLATION_PUNCT.replace_all(&lowered, "");
        explode(&cleaned.replace(' ', "_"))
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// "word" -> "w o r d"
pub fn explode(text: &str) -> String {
    text.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_words_lowercase_and_strip() {
        let p = Preprocessor::new();
        assert_eq!(p.source_words("Kidbą, rokʼo."), vec!["kidbą", "rokʼo"]);
    }

    #[test]
    fn test_source_words_keep_empty_between_double_space() {
        let p = Preprocessor::new();
        assert_eq!(p.source_words("a  b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_translation_tokens() {
        let p = Preprocessor::new();
        assert_eq!(p.translation_tokens("It's big (lit)!"), "i t s _ b i g _");
    }

    #[test]
    fn test_translation_drops_hyphen_and_quotes() {
        let p = Preprocessor::new();
        assert_eq!(p.translation_tokens("\"Re-do\""), "r e d o");
    }

    #[test]
    fn test_explode_is_char_level() {
        assert_eq!(explode("ʼab"), "ʼ a b");
        assert_eq!(explode(""), "");
    }
}
