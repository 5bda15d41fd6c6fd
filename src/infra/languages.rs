// ============================================================
// Layer 6 - Language Configuration
// ============================================================
// Maps a language code to the corpus folder it lives in under
// the data directory:
//
//   ddo -> Tsez       git -> Gitksan     arp -> Arapaho
//   ntu -> Natugu     lez -> Lezgi       nyb -> Nyangbo
//   usp -> Uspanteko
//
// The built-in table covers the shared-task languages. A JSON
// file can replace it:
//
//   { "languages": { "ddo": "Tsez", "xyz": "MyLanguage" } }
//
// The map is validated once when it is loaded; after that,
// resolving an unknown code is an UnsupportedLanguage error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

use crate::data::loader::CorpusLoader;
use crate::domain::error::{GlossError, GlossResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMap {
    languages: BTreeMap<String, String>,
}

impl Default for LanguageMap {
    fn default() -> Self {
        let languages = [
            ("ddo", "Tsez"),
            ("git", "Gitksan"),
            ("arp", "Arapaho"),
            ("ntu", "Natugu"),
            ("lez", "Lezgi"),
            ("nyb", "Nyangbo"),
            ("usp", "Uspanteko"),
        ]
        .into_iter()
        .map(|(code, folder)| (code.to_string(), folder.to_string()))
        .collect();

        Self { languages }
    }
}

impl LanguageMap {
    /// Load a JSON language table, or the built-in one when no
    /// path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read language config '{}'", path.display()))?;
        let map: LanguageMap = serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse language config '{}'", path.display()))?;
        map.validate()?;

        tracing::info!("Loaded {} languages from '{}'", map.languages.len(), path.display());
        Ok(map)
    }

    pub fn validate(&self) -> GlossResult<()> {
        if self.languages.is_empty() {
            return Err(GlossError::InvalidConfig("no languages configured".into()));
        }
        for (code, folder) in &self.languages {
            if code.trim().is_empty() {
                return Err(GlossError::InvalidConfig("empty language code".into()));
            }
            if folder.trim().is_empty() {
                return Err(GlossError::InvalidConfig(format!("empty corpus folder for '{}'", code)));
            }
        }
        Ok(())
    }

    /// Corpus folder name for a language code
    pub fn corpus_dir(&self, code: &str) -> GlossResult<&str> {
        match self.languages.get(code) {
            Some(folder) => Ok(folder.as_str()),
            None => {
                tracing::warn!("Configured languages: {}", self.codes().collect::<Vec<_>>().join(", "));
                Err(GlossError::UnsupportedLanguage(code.to_string()))
            }
        }
    }

    /// Loader for `<data_dir>/<Folder>/<code>-*`
    pub fn loader(&self, data_dir: impl AsRef<Path>, code: &str) -> GlossResult<CorpusLoader> {
        let folder = self.corpus_dir(code)?;
        Ok(CorpusLoader::new(data_dir.as_ref().join(folder), code))
    }

    /// Configured language codes, sorted
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::domain::record::RecordKind;

    #[test]
    fn test_defaults_cover_shared_task_languages() {
        let map = LanguageMap::default();
        assert_eq!(map.corpus_dir("ddo").unwrap(), "Tsez");
        assert_eq!(map.corpus_dir("usp").unwrap(), "Uspanteko");
        assert_eq!(map.codes().count(), 7);
    }

    #[test]
    fn test_unknown_code_is_unsupported() {
        let err = LanguageMap::default().corpus_dir("xyz").unwrap_err();
        assert_eq!(err, GlossError::UnsupportedLanguage("xyz".into()));
    }

    #[test]
    fn test_loader_points_at_language_folder() {
        let loader = LanguageMap::default().loader("data", "git").unwrap();
        assert_eq!(
            loader.path("dev", RecordKind::Covered),
            PathBuf::from("data/Gitksan/git-dev-track1-covered")
        );
    }

    #[test]
    fn test_validation_rejects_empty_entries() {
        let parse = |json: &str| serde_json::from_str::<LanguageMap>(json).unwrap();

        assert!(parse(r#"{ "languages": {} }"#).validate().is_err());
        assert!(parse(r#"{ "languages": { "abc": " " } }"#).validate().is_err());
        assert!(parse(r#"{ "languages": { "abc": "Abc" } }"#).validate().is_ok());
    }

    #[test]
    fn test_load_from_json_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("languages.json");
        fs::write(&path, r#"{ "languages": { "xyz": "Xyzish" } }"#).unwrap();

        let map = LanguageMap::load(Some(&path)).unwrap();
        assert_eq!(map.corpus_dir("xyz").unwrap(), "Xyzish");
        assert!(map.corpus_dir("ddo").is_err());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(LanguageMap::load(None).unwrap(), LanguageMap::default());
    }
}
