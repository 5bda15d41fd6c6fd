// ============================================================
// Layer 3 - Core Traits
// ============================================================
// Seams between the layers: use cases read corpora through
// CorpusSource and the pair-file writer accepts any
// ModelExample, windowed or stem.

use anyhow::Result;

use crate::domain::record::{Record, RecordKind};

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can hand back the raw text of a corpus split.
///
/// Implementations:
///   - CorpusLoader -> reads `<data>/<Folder>/<code>-<split>-track1-*`
pub trait CorpusSource {
    /// Raw corpus text for one split
    fn read_raw(&self, split: &str, kind: RecordKind) -> Result<String>;

    /// Parsed records for one split
    fn load_records(&self, split: &str, kind: RecordKind) -> Result<Vec<Record>>;
}

// ─── ModelExample ─────────────────────────────────────────────────────────────
/// One model-facing example: a source line and, for training
/// data, the aligned target line. Written to the pair files.
pub trait ModelExample {
    fn source_line(&self) -> String;
    fn target_line(&self) -> Option<String>;
}
