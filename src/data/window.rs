// ============================================================
// Layer 4 - Windowed Tokenizer
// ============================================================
// Builds one model example per source word: the word itself
// plus `window_size` neighbours on each side, every word spelled
// out as space-separated characters.
//
// The sentence is padded with boundary markers so that every
// window has the same width, even at the sentence edges.
//
// Example with window_size = 1, sentence "ab cd ef":
//
//   padded:   <START> | a b | c d | e f | <END>
//   word 0:   <START> | a b | c d
//   word 1:   a b     | c d | e f
//   word 2:   c d     | e f | <END>
//
// Width is always 2 * window_size + 1. Window i is the padded
// slice [i, i + 2 * window_size + 1), so the centre element of
// window i is word i.
//
// The target side for each word is its gloss with every stem
// replaced by [STEM] and each morpheme separator split out:
//
//   "girl-ERG"  ->  [STEM] - ERG

use serde::{Deserialize, Serialize};

use crate::data::preprocessor::{explode, Preprocessor};
use crate::domain::gloss::{mark_stems, MORPHEME_SEPARATORS};

pub const START_MARKER: &str = "<START>";
pub const END_MARKER: &str   = "<END>";

/// Separator placed between words of a window in the pair file
pub const WORD_SEPARATOR: &str = " _ ";

// ─── WordWindow ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWindow {
    /// The normalised word this window is centred on
    pub center_word: String,

    /// 2 * window_size + 1 elements: exploded words or markers
    pub tokens: Vec<String>,
}

impl WordWindow {
    /// Source line for the pair file
    pub fn to_line(&self) -> String {
        self.tokens.join(WORD_SEPARATOR)
    }
}

// ─── GlossWord ────────────────────────────────────────────────────────────────
/// Target tokens for one word: placeholders, tags, separators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossWord {
    pub tokens: Vec<String>,
}

impl GlossWord {
    /// Target line for the pair file
    pub fn to_line(&self) -> String {
        self.tokens.join(" ")
    }
}

// ─── WindowTokenizer ──────────────────────────────────────────────────────────
pub struct WindowTokenizer {
    window_size: usize,
    preprocessor: Preprocessor,
}

impl WindowTokenizer {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            preprocessor: Preprocessor::new(),
        }
    }

    /// Width of every window this tokenizer produces
    pub fn width(&self) -> usize {
        2 * self.window_size + 1
    }

    /// Normalise a source line and window every word in it
    pub fn tokenize_source(&self, source: &str) -> Vec<WordWindow> {
        let words = self.preprocessor.source_words(source);
        self.windows(&words)
    }

    /// Window an already-normalised word sequence
    pub fn windows(&self, words: &[String]) -> Vec<WordWindow> {
        let w = self.window_size;

        let mut padded: Vec<String> = Vec::with_capacity(words.len() + 2 * w);
        padded.extend(std::iter::repeat(START_MARKER.to_string()).take(w));
        padded.extend(words.iter().map(|word| explode(word)));
        padded.extend(std::iter::repeat(END_MARKER.to_string()).take(w));

        words
            .iter()
            .enumerate()
            .map(|(i, word)| WordWindow {
                center_word: word.clone(),
                tokens:      padded[i..i + self.width()].to_vec(),
            })
            .collect()
    }

    /// Split a gloss line into per-word target token sequences
    pub fn tokenize_gloss(&self, gloss: &str) -> Vec<GlossWord> {
        tokenize_gloss(gloss)
    }
}

/// Replace stems with [STEM] and split each gloss word on
/// `.`, `-` and `~`, keeping the separators as tokens.
pub fn tokenize_gloss(gloss: &str) -> Vec<GlossWord> {
    let replaced = mark_stems(gloss);

    replaced
        .split(' ')
        .map(|word| {
            let mut spaced = String::with_capacity(word.len() * 2);
            for c in word.chars() {
                if MORPHEME_SEPARATORS.contains(&c) {
                    spaced.push(' ');
                    spaced.push(c);
                    spaced.push(' ');
                } else {
                    spaced.push(c);
                }
            }
            GlossWord {
                tokens: spaced.split_whitespace().map(str::to_string).collect(),
            }
        })
        .collect()
}
