// ============================================================
// Layer 6 - Prediction Metrics
// ============================================================
// Summarises one prediction run and appends it to a CSV file so
// runs with different window sizes / ensembles can be compared.
//
// Columns:
//   - language, split
//   - members:        number of ensemble logs voted over
//   - sentences, words
//   - unfilled:       [STEM] markers left in the output
//   - missing_words:  words no model produced anything for
//   - word_accuracy:  exact-match gloss words vs gold (dev only,
//                     empty when no gold corpus is available)
//
// Example:
//   language,split,members,sentences,words,unfilled,missing_words,word_accuracy
//   ddo,dev,2,445,2012,37,0,0.781312

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ml::reconstruct::SentencePrediction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetrics {
    pub language:      String,
    pub split:         String,
    pub members:       usize,
    pub sentences:     usize,
    pub words:         usize,
    pub unfilled:      usize,
    pub missing_words: usize,
    pub word_accuracy: Option<f64>,
}

impl PredictionMetrics {
    pub fn from_predictions(
        language:    &str,
        split:       &str,
        members:     usize,
        word_counts: &[usize],
        predictions: &[SentencePrediction],
    ) -> Self {
        Self {
            language:      language.to_string(),
            split:         split.to_string(),
            members,
            sentences:     predictions.len(),
            words:         word_counts.iter().sum(),
            unfilled:      predictions.iter().map(|p| p.unfilled).sum(),
            missing_words: predictions.iter().map(|p| p.missing_words).sum(),
            word_accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.word_accuracy = Some(accuracy);
        self
    }
}

/// Fraction of gold gloss words predicted exactly, position by
/// position within each sentence. Extra predicted words count
/// for nothing; missing ones count as wrong.
pub fn word_accuracy<P: AsRef<str>, G: AsRef<str>>(predicted: &[P], gold: &[G]) -> f64 {
    let mut correct = 0usize;
    let mut total   = 0usize;

    for (pred, gold) in predicted.iter().zip(gold) {
        let pred_words: Vec<&str> = pred.as_ref().split_whitespace().collect();
        for (i, gold_word) in gold.as_ref().split_whitespace().enumerate() {
            total += 1;
            if pred_words.get(i) == Some(&gold_word) {
                correct += 1;
            }
        }
    }

    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file does not exist yet
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "language,split,members,sentences,words,unfilled,missing_words,word_accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &PredictionMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        let accuracy = m.word_accuracy.map(|a| format!("{a:.6}")).unwrap_or_default();
        writeln!(
            f,
            "{},{},{},{},{},{},{},{}",
            m.language, m.split, m.members, m.sentences, m.words, m.unfilled, m.missing_words, accuracy,
        )?;

        tracing::info!(
            "{} {}: {} sentences, {} words, {} unfilled stems, accuracy {}",
            m.language,
            m.split,
            m.sentences,
            m.words,
            m.unfilled,
            if accuracy.is_empty() { "n/a" } else { accuracy.as_str() },
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_accuracy() {
        let pred = ["dog-PL see", "one"];
        let gold = ["dog-PL look", "one"];
        assert!((word_accuracy(&pred, &gold) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_accuracy_short_prediction() {
        assert_eq!(word_accuracy(&["a"], &["a b"]), 0.5);
        assert_eq!(word_accuracy::<&str, &str>(&[], &[]), 0.0);
    }

    #[test]
    fn test_metrics_from_predictions() {
        let preds = vec![
            SentencePrediction { gloss: "a [STEM]".into(), unfilled: 1, missing_words: 0 },
            SentencePrediction { gloss: "".into(), unfilled: 0, missing_words: 1 },
        ];
        let m = PredictionMetrics::from_predictions("ddo", "dev", 2, &[2, 1], &preds);
        assert_eq!(m.sentences, 2);
        assert_eq!(m.words, 3);
        assert_eq!(m.unfilled, 1);
        assert_eq!(m.missing_words, 1);
        assert!(m.word_accuracy.is_none());
    }

    #[test]
    fn test_logger_appends_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        let m      = PredictionMetrics::from_predictions("git", "test", 1, &[1], &[]);

        logger.log(&m).unwrap();
        logger.log(&m.clone().with_accuracy(0.5)).unwrap();

        let csv   = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "git,test,1,0,1,0,0,");
        assert_eq!(lines[2], "git,test,1,0,1,0,0,0.500000");
    }
}
