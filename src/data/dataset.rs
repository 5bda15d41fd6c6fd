use serde::{Deserialize, Serialize};

use crate::data::stemmer::StemTokenizer;
use crate::data::window::{GlossWord, WindowTokenizer, WordWindow};
use crate::domain::record::Record;
use crate::domain::traits::ModelExample;

// ─── Windowed dataset ─────────────────────────────────────────────────────────

/// One word-level example: a window and, for glossed records, its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedExample {
    pub record_index: usize,
    pub window:       WordWindow,
    pub gloss:        Option<GlossWord>,
}

impl ModelExample for WindowedExample {
    fn source_line(&self) -> String {
        self.window.to_line()
    }

    fn target_line(&self) -> Option<String> {
        self.gloss.as_ref().map(GlossWord::to_line)
    }
}

/// All word windows of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedEntry {
    pub record_index: usize,
    pub examples:     Vec<WindowedExample>,
}

pub struct WindowedDataset {
    entries: Vec<WindowedEntry>,
}

impl WindowedDataset {
    pub fn build(records: &[Record], window_size: usize) -> Self {
        let tokenizer = WindowTokenizer::new(window_size);
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| build_windowed_entry(&tokenizer, index, record))
            .collect();
        Self { entries }
    }

    /// Words per record, in record order. Row numbers in the
    /// generation log count words across these sentences.
    pub fn word_counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.examples.len()).collect()
    }

    /// Every word example, flattened in record order
    pub fn examples(&self) -> impl Iterator<Item = &WindowedExample> {
        self.entries.iter().flat_map(|e| e.examples.iter())
    }
}

fn build_windowed_entry(tokenizer: &WindowTokenizer, index: usize, record: &Record) -> WindowedEntry {
    let windows = tokenizer.tokenize_source(&record.source);

    // Align gloss words to source words by position. A short
    // gloss leaves empty targets; a long one is cut so the two
    // pair files stay line-parallel.
    let mut glosses: Option<Vec<GlossWord>> = record.gloss.as_deref().map(|g| tokenizer.tokenize_gloss(g));
    if let Some(g) = glosses.as_mut() {
        if g.len() != windows.len() {
            tracing::warn!(
                "Record {}: {} source words but {} gloss words",
                index,
                windows.len(),
                g.len()
            );
            g.resize(windows.len(), GlossWord::default());
        }
    }

    let examples = windows
        .into_iter()
        .enumerate()
        .map(|(i, window)| WindowedExample {
            record_index: index,
            window,
            gloss: glosses.as_ref().map(|g| g[i].clone()),
        })
        .collect();

    WindowedEntry { record_index: index, examples }
}

// ─── Stem dataset ─────────────────────────────────────────────────────────────

/// Sentence-level stem example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemExample {
    pub record_index: usize,
    /// Character-level translation
    pub source: String,
    /// Character-level stem sequence, absent for covered records
    pub stems: Option<String>,
}

impl ModelExample for StemExample {
    fn source_line(&self) -> String {
        self.source.clone()
    }

    fn target_line(&self) -> Option<String> {
        self.stems.clone()
    }
}

pub struct StemDataset {
    examples: Vec<StemExample>,
}

impl StemDataset {
    pub fn build(records: &[Record]) -> Self {
        let tokenizer = StemTokenizer::new();
        let examples = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if record.translation.is_none() {
                    tracing::debug!("Record {} has no translation; empty source line", index);
                }
                StemExample {
                    record_index: index,
                    source: tokenizer.tokenize_translation(record.translation.as_deref().unwrap_or("")),
                    stems:  record.gloss.as_deref().map(|g| tokenizer.stem_sequence(g)),
                }
            })
            .collect();
        Self { examples }
    }

    pub fn examples(&self) -> &[StemExample] {
        &self.examples
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn glossed(source: &str, gloss: &str, translation: &str) -> Record {
        Record::new(source, Some(gloss.into()), Some(translation.into()))
    }

    fn covered(source: &str) -> Record {
        Record::new(source, None, None)
    }

    #[test]
    fn test_windowed_dataset_pairs_words_with_glosses() {
        let records = vec![glossed("Ab cd", "dog-PL see", "Dogs see.")];
        let ds      = WindowedDataset::build(&records, 1);

        let examples: Vec<_> = ds.examples().collect();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].source_line(), "<START> _ a b _ c d");
        assert_eq!(examples[0].target_line().as_deref(), Some("[STEM] - PL"));
        assert_eq!(examples[1].target_line().as_deref(), Some("[STEM]"));
    }

    #[test]
    fn test_covered_records_have_no_targets() {
        let records = vec![covered("ab cd ef")];
        let ds      = WindowedDataset::build(&records, 2);
        assert_eq!(ds.word_counts(), vec![3]);
        assert!(ds.examples().all(|e| e.target_line().is_none()));
    }

    #[test]
    fn test_gloss_alignment_is_padded_and_cut() {
        let short = WindowedDataset::build(&[glossed("a b c", "x", "")], 1);
        let targets: Vec<_> = short.examples().map(|e| e.target_line().unwrap()).collect();
        assert_eq!(targets, vec!["[STEM]", "", ""]);

        let long = WindowedDataset::build(&[glossed("a", "x y z", "")], 1);
        assert_eq!(long.examples().count(), 1);
    }

    #[test]
    fn test_word_counts_follow_records() {
        let records = vec![covered("a b"), covered("c"), covered("d e f")];
        let ds      = WindowedDataset::build(&records, 0);
        assert_eq!(ds.word_counts(), vec![2, 1, 3]);

        let indices: Vec<usize> = ds.examples().map(|e| e.record_index).collect();
        assert_eq!(indices, vec![0, 0, 1, 2, 2, 2]);
    }

    #[test]
    fn test_stem_dataset() {
        let records = vec![glossed("x y", "girl-ERG look-PST", "The girl looked.")];
        let ds      = StemDataset::build(&records);
        let e       = &ds.examples()[0];
        assert_eq!(e.source_line(), "t h e _ g i r l _ l o o k e d");
        assert_eq!(e.target_line().as_deref(), Some("g i r l _ l o o k"));
    }

    #[test]
    fn test_stem_dataset_without_translation() {
        let ds = StemDataset::build(&[covered("x")]);
        assert_eq!(ds.examples()[0].source_line(), "");
        assert!(ds.examples()[0].target_line().is_none());
    }
}
