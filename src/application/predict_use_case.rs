// ============================================================
// Layer 2 - PredictUseCase
// ============================================================
// Turns the decoder's generation logs into a glossed corpus:
//
//   Step 1: Load the covered records of the split     (Layer 4)
//   Step 2: Count words per sentence (row layout)     (Layer 4)
//   Step 3: Parse every ensemble member's log         (Layer 5)
//   Step 4: Vote per word, fill stems per sentence    (Layer 5)
//   Step 5: Splice predictions into the covered file  (Layer 6)
//   Step 6: Log run metrics, with accuracy when the
//           gold uncovered corpus is available        (Layer 6)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::data::dataset::WindowedDataset;
use crate::domain::record::RecordKind;
use crate::domain::traits::CorpusSource;
use crate::infra::corpus_writer::write_predictions;
use crate::infra::languages::LanguageMap;
use crate::infra::metrics::{word_accuracy, MetricsLogger, PredictionMetrics};
use crate::ml::reconstruct::{GlossReconstructor, StemPredictions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictConfig {
    pub data_dir:       String,
    pub language:       String,
    pub languages_file: Option<String>,
    /// `dev` or `test`
    pub split:          String,
    /// One generation log per ensemble member
    pub window_logs:    Vec<String>,
    /// Generation log of the stem model
    pub stem_log:       Option<String>,
    pub output:         String,
    /// Where metrics.csv goes; defaults to the output's folder
    pub metrics_dir:    Option<String>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data".to_string(),
            language:       "ddo".to_string(),
            languages_file: None,
            split:          "dev".to_string(),
            window_logs:    Vec::new(),
            stem_log:       None,
            output:         "results.txt".to_string(),
            metrics_dir:    None,
        }
    }
}

pub struct PredictUseCase {
    config: PredictConfig,
}

impl PredictUseCase {
    pub fn new(config: PredictConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline; returns the sentence predictions written
    pub fn execute(&self) -> Result<Vec<String>> {
        let cfg = &self.config;
        if cfg.window_logs.is_empty() {
            bail!("At least one window model generation log is required");
        }

        let languages = LanguageMap::load(cfg.languages_file.as_deref().map(Path::new))?;
        let loader    = languages.loader(&cfg.data_dir, &cfg.language)?;

        // ── Steps 1-2: Covered records and their word counts ──────────────────
        // Window size does not change the word count, so 0 will do
        let covered     = loader.load_records(&cfg.split, RecordKind::Covered)?;
        let word_counts = WindowedDataset::build(&covered, 0).word_counts();

        // ── Step 3: Ensemble logs ─────────────────────────────────────────────
        let texts = cfg
            .window_logs
            .iter()
            .map(|path| read_log(path))
            .collect::<Result<Vec<_>>>()?;
        let reconstructor = GlossReconstructor::from_texts(&texts);
        tracing::info!("Voting over {} ensemble members", reconstructor.member_count());

        // ── Step 4: Vote and reconstruct ──────────────────────────────────────
        let stems: Box<dyn Iterator<Item = Vec<String>>> = match &cfg.stem_log {
            Some(path) => Box::new(StemPredictions::from_text(&read_log(path)?)),
            None => {
                tracing::warn!("No stem log given; [STEM] placeholders will stay unfilled");
                Box::new(std::iter::empty())
            }
        };
        let predictions = reconstructor.reconstruct(&word_counts, stems);
        let glosses: Vec<String> = predictions.iter().map(|p| p.gloss.clone()).collect();

        // ── Step 5: Write the glossed corpus ──────────────────────────────────
        let output = PathBuf::from(&cfg.output);
        write_predictions(&loader.path(&cfg.split, RecordKind::Covered), &output, &glosses)?;

        // ── Step 6: Metrics ───────────────────────────────────────────────────
        let mut metrics = PredictionMetrics::from_predictions(
            &cfg.language,
            &cfg.split,
            reconstructor.member_count(),
            &word_counts,
            &predictions,
        );
        if loader.exists(&cfg.split, RecordKind::Uncovered) {
            let gold: Vec<String> = loader
                .load_records(&cfg.split, RecordKind::Uncovered)?
                .into_iter()
                .map(|r| r.gloss.unwrap_or_default())
                .collect();
            metrics = metrics.with_accuracy(word_accuracy(&glosses, &gold));
        }

        let metrics_dir = match &cfg.metrics_dir {
            Some(dir) => PathBuf::from(dir),
            None => output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let logger = MetricsLogger::new(&metrics_dir)?;
        logger.log(&metrics)?;
        tracing::debug!("Metrics appended to '{}'", logger.csv_path().display());

        Ok(glosses)
    }
}

fn read_log(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read generation log '{}'", path))
}
