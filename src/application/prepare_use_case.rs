// ============================================================
// Layer 2 - PrepareUseCase
// ============================================================
// Builds the datasets the external model is trained on:
//
//   Step 1: Resolve the language's corpus folder   (Layer 6 - infra)
//   Step 2: Load train / dev uncovered records     (Layer 4 - data)
//   Step 3: Load test covered records if present   (Layer 4 - data)
//   Step 4: For each window size, window every
//           word and write the pair files          (Layer 4 + 6)
//   Step 5: Optionally build the stem dataset and
//           write its pair files                   (Layer 4 + 6)
//
// Nothing is trained here; the pair files are the hand-off.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::dataset::{StemDataset, WindowedDataset};
use crate::domain::record::{Record, RecordKind};
use crate::domain::traits::CorpusSource;
use crate::infra::languages::LanguageMap;
use crate::infra::pair_files::{DatasetSplits, PairFileWriter};

// ─── Configuration ────────────────────────────────────────────────────────────
// Saved next to every dataset folder so a pair file can always
// be traced back to the settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub data_dir:       String,
    pub output_dir:     String,
    pub language:       String,
    pub languages_file: Option<String>,
    pub window_sizes:   Vec<usize>,
    pub stemmer:        bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data".to_string(),
            output_dir:     ".".to_string(),
            language:       "ddo".to_string(),
            languages_file: None,
            window_sizes:   vec![1, 2],
            stemmer:        false,
        }
    }
}

/// Train / dev / test records of one language
struct CorpusSplits {
    train: Vec<Record>,
    dev:   Vec<Record>,
    test:  Vec<Record>,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline; returns the dataset folders written
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let cfg = &self.config;
        if cfg.window_sizes.is_empty() && !cfg.stemmer {
            bail!("Nothing to prepare: no window sizes given and the stem dataset is disabled");
        }

        // ── Step 1: Resolve corpus folder ─────────────────────────────────────
        let languages = LanguageMap::load(cfg.languages_file.as_deref().map(Path::new))?;
        let loader    = languages.loader(&cfg.data_dir, &cfg.language)?;

        // ── Steps 2-3: Load records ───────────────────────────────────────────
        let train = loader.load_records("train", RecordKind::Uncovered)?;
        let dev   = loader.load_records("dev", RecordKind::Uncovered)?;
        let test  = if loader.exists("test", RecordKind::Covered) {
            loader.load_records("test", RecordKind::Covered)?
        } else {
            tracing::warn!("No covered test corpus for '{}'; test files will be empty", cfg.language);
            Vec::new()
        };
        let splits = CorpusSplits { train, dev, test };

        let mut folders = Vec::new();

        // ── Step 4: Windowed datasets ─────────────────────────────────────────
        for &window_size in &cfg.window_sizes {
            folders.push(self.write_windowed(&splits, window_size)?);
        }

        // ── Step 5: Stem dataset ──────────────────────────────────────────────
        if cfg.stemmer {
            folders.push(self.write_stemmer(&splits)?);
        }

        Ok(folders)
    }

    fn write_windowed(&self, splits: &CorpusSplits, window_size: usize) -> Result<PathBuf> {
        let cfg = &self.config;
        tracing::info!("Building window={} dataset for '{}'", window_size, cfg.language);

        let train = WindowedDataset::build(&splits.train, window_size);
        let dev   = WindowedDataset::build(&splits.dev, window_size);
        let test  = WindowedDataset::build(&splits.test, window_size);

        let writer = PairFileWriter::new(
            &cfg.output_dir,
            PairFileWriter::windowed_prefix(&cfg.language, window_size),
        )?;
        writer.write_splits(
            &DatasetSplits {
                train: train.examples().collect(),
                dev:   dev.examples().collect(),
                test:  test.examples().collect(),
            },
            "gloss",
        )?;
        writer.save_config("prepare_config", cfg)?;

        Ok(writer.dir().to_path_buf())
    }

    fn write_stemmer(&self, splits: &CorpusSplits) -> Result<PathBuf> {
        let cfg = &self.config;
        tracing::info!("Building stem dataset for '{}'", cfg.language);

        let train = StemDataset::build(&splits.train);
        let dev   = StemDataset::build(&splits.dev);
        let test  = StemDataset::build(&splits.test);

        let writer = PairFileWriter::new(&cfg.output_dir, PairFileWriter::stemmer_prefix(&cfg.language))?;
        writer.write_splits(
            &DatasetSplits {
                train: train.examples().iter().collect(),
                dev:   dev.examples().iter().collect(),
                test:  test.examples().iter().collect(),
            },
            "stems",
        )?;
        writer.save_config("prepare_config", cfg)?;

        Ok(writer.dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TRAIN: &str = "\\t Ab cd\n\\g dog-PL see\n\\l Dogs see.\n\n\\t Ef\n\\g one\n\\l One.\n";
    const DEV: &str   = "\\t Gh\n\\g girl-ERG\n\\l The girl.\n";
    const TEST: &str  = "\\t ij kl\n\\g \n\\l Two words.\n";

    fn corpus_dir() -> tempfile::TempDir {
        let dir  = tempfile::tempdir().unwrap();
        let tsez = dir.path().join("Tsez");
        fs::create_dir_all(&tsez).unwrap();
        fs::write(tsez.join("ddo-train-track1-uncovered"), TRAIN).unwrap();
        fs::write(tsez.join("ddo-dev-track1-uncovered"), DEV).unwrap();
        fs::write(tsez.join("ddo-test-track1-covered"), TEST).unwrap();
        dir
    }

    fn config(data: &Path, out: &Path) -> PrepareConfig {
        PrepareConfig {
            data_dir:     data.display().to_string(),
            output_dir:   out.display().to_string(),
            window_sizes: vec![1],
            stemmer:      true,
            ..PrepareConfig::default()
        }
    }

    #[test]
    fn test_writes_windowed_and_stem_pair_files() {
        let data = corpus_dir();
        let out  = tempfile::tempdir().unwrap();

        let folders = PrepareUseCase::new(config(data.path(), out.path())).execute().unwrap();
        assert_eq!(folders.len(), 2);

        let w1 = out.path().join("ddo-w1-fairseq-data");
        assert_eq!(
            fs::read_to_string(w1.join("ddo-w1-train.src")).unwrap(),
            "<START> _ a b _ c d\na b _ c d _ <END>\n<START> _ e f _ <END>"
        );
        assert_eq!(
            fs::read_to_string(w1.join("ddo-w1-train.gloss")).unwrap(),
            "[STEM] - PL\n[STEM]\n[STEM]"
        );
        assert_eq!(
            fs::read_to_string(w1.join("ddo-w1-test.src")).unwrap(),
            "<START> _ i j _ k l\ni j _ k l _ <END>"
        );
        assert!(w1.join("prepare_config.json").exists());

        let stems = out.path().join("ddo-stemmer-fairseq-data");
        assert_eq!(
            fs::read_to_string(stems.join("ddo-stemmer-dev.stems")).unwrap(),
            "g i r l"
        );
        assert_eq!(
            fs::read_to_string(stems.join("ddo-stemmer-test.src")).unwrap(),
            "t w o _ w o r d s"
        );
    }

    #[test]
    fn test_unknown_language_fails() {
        let data = corpus_dir();
        let out  = tempfile::tempdir().unwrap();
        let cfg  = PrepareConfig { language: "xyz".into(), ..config(data.path(), out.path()) };

        let err = PrepareUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("unsupported language code 'xyz'"));
    }

    #[test]
    fn test_nothing_to_do_is_rejected() {
        let cfg = PrepareConfig { window_sizes: vec![], stemmer: false, ..PrepareConfig::default() };
        assert!(PrepareUseCase::new(cfg).execute().is_err());
    }
}
