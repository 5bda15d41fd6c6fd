// ============================================================
// Layer 6 - Pair File Writer
// ============================================================
// Writes model-facing datasets as parallel plain-text files,
// one example per line. Line i of `.src` aligns with line i of
// the target file, and there are no record separators.
//
// Layout for language `ddo`:
//
//   <out>/ddo-w1-fairseq-data/
//     ddo-w1-train.src   ddo-w1-train.gloss
//     ddo-w1-dev.src     ddo-w1-dev.gloss
//     ddo-w1-test.src
//     prepare_config.json
//
//   <out>/ddo-stemmer-fairseq-data/
//     ddo-stemmer-train.src   ddo-stemmer-train.stems
//     ddo-stemmer-dev.src     ddo-stemmer-dev.stems
//     ddo-stemmer-test.src
//
// The dev `.src` file is what gets fed to the decoder, so its
// line numbers are the `H-<row>` indices read back later.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::traits::ModelExample;

/// Splits of one dataset, each a list of model examples
pub struct DatasetSplits<'a, E: ModelExample> {
    pub train: Vec<&'a E>,
    pub dev:   Vec<&'a E>,
    pub test:  Vec<&'a E>,
}

pub struct PairFileWriter {
    dir:    PathBuf,
    prefix: String,
}

impl PairFileWriter {
    /// Writer for `<out>/<prefix>-fairseq-data`. Creates the folder.
    pub fn new(out_dir: impl AsRef<Path>, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let dir    = out_dir.as_ref().join(format!("{prefix}-fairseq-data"));
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(Self { dir, prefix })
    }

    /// Folder name prefix for the windowed dataset
    pub fn windowed_prefix(code: &str, window_size: usize) -> String {
        format!("{code}-w{window_size}")
    }

    /// Folder name prefix for the stem dataset
    pub fn stemmer_prefix(code: &str) -> String {
        format!("{code}-stemmer")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, split: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.{}", self.prefix, split, extension))
    }

    /// Write train/dev source and target files plus the test source
    /// file. `target_ext` is `gloss` or `stems`.
    pub fn write_splits<E: ModelExample>(
        &self,
        splits:     &DatasetSplits<'_, E>,
        target_ext: &str,
    ) -> Result<()> {
        self.write_source("train", &splits.train)?;
        self.write_target("train", target_ext, &splits.train)?;
        self.write_source("dev", &splits.dev)?;
        self.write_target("dev", target_ext, &splits.dev)?;
        self.write_source("test", &splits.test)?;

        tracing::info!(
            "Wrote {} train, {} dev, {} test examples to '{}'",
            splits.train.len(),
            splits.dev.len(),
            splits.test.len(),
            self.dir.display()
        );
        Ok(())
    }

    pub fn write_source<E: ModelExample>(&self, split: &str, examples: &[&E]) -> Result<PathBuf> {
        let lines: Vec<String> = examples.iter().map(|e| e.source_line()).collect();
        self.write_lines(self.path(split, "src"), &lines)
    }

    /// Target lines; examples without a target write an empty line
    /// so the files stay parallel.
    pub fn write_target<E: ModelExample>(
        &self,
        split:     &str,
        extension: &str,
        examples:  &[&E],
    ) -> Result<PathBuf> {
        let lines: Vec<String> = examples
            .iter()
            .map(|e| e.target_line().unwrap_or_default())
            .collect();
        self.write_lines(self.path(split, extension), &lines)
    }

    /// Save the run configuration next to the data files
    pub fn save_config<C: Serialize>(&self, name: &str, config: &C) -> Result<()> {
        let path = self.dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }

    fn write_lines(&self, path: PathBuf, lines: &[String]) -> Result<PathBuf> {
        fs::write(&path, lines.join("\n"))
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote {} lines to '{}'", lines.len(), path.display());
        Ok(path)
    }
}
