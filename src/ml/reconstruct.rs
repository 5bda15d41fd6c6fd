// ============================================================
// Layer 5 - Gloss Reconstructor
// ============================================================
// Turns per-word voted gloss tokens plus per-sentence stem
// predictions back into a full sentence gloss:
//
//   voted words:  [STEM]-PL.[STEM]   [STEM]-ERG
//   stems:        dog, cat, girl
//   result:       dog-PL.cat girl-ERG
//
// Placeholders are filled left to right, one stem each. When
// the stem model under-predicts, the remaining [STEM] markers
// are left in the output on purpose so they are easy to spot.
//
// Word rows: the windowed decoder saw one line per word, all
// sentences back to back, so the row of word j in sentence i is
// the running word count of sentences 0..i plus j.
//
// Stem rows: the stem decoder saw one line per sentence. Its log
// is scanned row 0, 1, 2, ... until a row has no hypothesis. The
// scan is an owned iterator, so it can only be walked once and
// only forwards.

use std::iter::FusedIterator;

use crate::domain::gloss::{count_markers, STEM_MARKER};
use crate::ml::ensemble::vote;
use crate::ml::hypothesis::{GenerationLog, HypothesisSet};

// ─── StemPredictions ──────────────────────────────────────────────────────────
/// Single-pass scan over a stem model's generation log.
/// Yields the top-1 stem list of row 0, 1, 2, ... and stops at the
/// first row without a hypothesis.
pub struct StemPredictions {
    log:      GenerationLog,
    next_row: usize,
    finished: bool,
}

impl StemPredictions {
    pub fn new(log: GenerationLog) -> Self {
        Self { log, next_row: 0, finished: false }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(GenerationLog::parse(text))
    }
}

impl Iterator for StemPredictions {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.log.best(self.next_row) {
            Some(hypothesis) => {
                self.next_row += 1;
                Some(split_stem_hypothesis(hypothesis))
            }
            None => {
                tracing::debug!("Stem predictions exhausted after {} rows", self.next_row);
                self.finished = true;
                None
            }
        }
    }
}

impl FusedIterator for StemPredictions {}

/// "d o g _ c a t" -> ["dog", "cat"]
pub fn split_stem_hypothesis(hypothesis: &str) -> Vec<String> {
    hypothesis
        .replace(' ', "")
        .split('_')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Sentence reconstruction ──────────────────────────────────────────────────

/// Fill each [STEM] occurrence with the next stem, join with spaces.
pub fn reconstruct_sentence<S: AsRef<str>>(gloss_tokens: &[S], stems: &[String]) -> String {
    let mut remaining = stems.iter();
    gloss_tokens
        .iter()
        .map(|token| fill_placeholders(token.as_ref(), &mut remaining))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fill_placeholders<'a>(token: &str, stems: &mut impl Iterator<Item = &'a String>) -> String {
    let mut out  = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(pos) = rest.find(STEM_MARKER) {
        out.push_str(&rest[..pos]);
        match stems.next() {
            Some(stem) => out.push_str(stem),
            None => {
                // Out of stems: keep this and any later markers
                out.push_str(&rest[pos..]);
                return out;
            }
        }
        rest = &rest[pos + STEM_MARKER.len()..];
    }

    out.push_str(rest);
    out
}

// ─── GlossReconstructor ───────────────────────────────────────────────────────

/// Final gloss of one sentence
#[derive(Debug, Clone, PartialEq)]
pub struct SentencePrediction {
    pub gloss: String,
    /// [STEM] markers left because stems ran out
    pub unfilled: usize,
    /// Words for which no model proposed anything
    pub missing_words: usize,
}

/// Votes every word across the ensemble logs and fills stems.
pub struct GlossReconstructor {
    logs: Vec<GenerationLog>,
}

impl GlossReconstructor {
    pub fn new(logs: Vec<GenerationLog>) -> Self {
        Self { logs }
    }

    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| GenerationLog::parse(t.as_ref())).collect())
    }

    pub fn member_count(&self) -> usize {
        self.logs.len()
    }

    /// Voted gloss token for one word row. None when no member
    /// has a hypothesis for the row.
    pub fn vote_row(&self, row: usize) -> Option<String> {
        let sets: Vec<HypothesisSet> = self.logs.iter().map(|log| log.hypotheses(row)).collect();
        vote(&sets)
    }

    /// One prediction per sentence. `word_counts[i]` is the number
    /// of words of sentence i; `stems` is consumed once, one item
    /// per sentence. A sentence with no stem item keeps its markers.
    pub fn reconstruct<I>(&self, word_counts: &[usize], stems: I) -> Vec<SentencePrediction>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut stems = stems.into_iter();
        let mut row   = 0usize;

        word_counts
            .iter()
            .enumerate()
            .map(|(sentence, &words)| {
                let mut tokens        = Vec::with_capacity(words);
                let mut missing_words = 0usize;

                for _ in 0..words {
                    match self.vote_row(row) {
                        Some(token) => tokens.push(token),
                        None => {
                            tracing::warn!("No hypothesis for word row {} (sentence {})", row, sentence);
                            missing_words += 1;
                            tokens.push(String::new());
                        }
                    }
                    row += 1;
                }

                let sentence_stems = stems.next().unwrap_or_default();
                let gloss          = reconstruct_sentence(&tokens, &sentence_stems);
                let unfilled       = count_markers(&gloss);

                SentencePrediction { gloss, unfilled, missing_words }
            })
            .collect()
    }
}
