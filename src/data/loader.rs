// ============================================================
// Layer 4 - Corpus Loader
// ============================================================
// Reads shared-task corpus files for one language.
//
// Directory layout:
//
//   <data_dir>/
//     Tsez/
//       ddo-train-track1-uncovered
//       ddo-dev-track1-uncovered
//       ddo-dev-track1-covered
//       ddo-test-track1-covered
//
// The folder name per language comes from the LanguageMap
// (infra layer); this loader only knows the resolved folder.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::data::parser::parse_corpus;
use crate::domain::record::{Record, RecordKind};
use crate::domain::traits::CorpusSource;

pub struct CorpusLoader {
    /// <data_dir>/<Folder>
    dir: PathBuf,
    /// Language code used as the file-name prefix
    code: String,
}

impl CorpusLoader {
    pub fn new(dir: impl Into<PathBuf>, code: impl Into<String>) -> Self {
        Self {
            dir:  dir.into(),
            code: code.into(),
        }
    }

    /// Path of one split, e.g. `ddo-dev-track1-covered`
    pub fn path(&self, split: &str, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}-{}-track1-{}", self.code, split, kind.file_suffix()))
    }

    pub fn exists(&self, split: &str, kind: RecordKind) -> bool {
        self.path(split, kind).exists()
    }
}

impl CorpusSource for CorpusLoader {
    fn read_raw(&self, split: &str, kind: RecordKind) -> Result<String> {
        let path = self.path(split, kind);
        fs::read_to_string(&path)
            .with_context(|| format!("Cannot read corpus '{}'", path.display()))
    }

    fn load_records(&self, split: &str, kind: RecordKind) -> Result<Vec<Record>> {
        let path    = self.path(split, kind);
        let text    = self.read_raw(split, kind)?;
        let records = parse_corpus(&text, kind)
            .with_context(|| format!("Cannot parse corpus '{}'", path.display()))?;

        tracing::info!("Loaded {} records from '{}'", records.len(), path.display());
        Ok(records)
    }
}
