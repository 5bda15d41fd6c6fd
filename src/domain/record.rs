// ============================================================
// Layer 3 - Record Domain Type
// ============================================================
// One annotated example from a shared-task corpus file:
//
//   \t Kidbą rokʼo.               <- source line (object language)
//   \g girl-ERG look-PST          <- gloss line
//   \l The girl looked.           <- free translation
//
// Records are separated by a blank line. Each field line starts
// with a fixed two-character tag followed by a space; the tag is
// stripped when a Record is built and restored by the writer.
//
// Covered records (the ones we predict for) have the gloss
// withheld, so `gloss` is None for them. Once parsed a Record is
// never mutated.

use serde::{Deserialize, Serialize};

/// Field tag for the source line
pub const SOURCE_TAG: &str = "\\t";
/// Field tag for the gloss line
pub const GLOSS_TAG: &str = "\\g";
/// Field tag for the translation line
pub const TRANSLATION_TAG: &str = "\\l";

/// Which layout a corpus file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Training / gold data: source, gloss and translation
    Uncovered,
    /// Evaluation input: gloss withheld, source always present
    Covered,
}

impl RecordKind {
    /// Minimum number of lines a record of this kind must have
    pub fn required_lines(self) -> usize {
        match self {
            RecordKind::Uncovered => 3,
            RecordKind::Covered   => 1,
        }
    }

    /// File-name suffix used by the shared-task corpus layout
    pub fn file_suffix(self) -> &'static str {
        match self {
            RecordKind::Uncovered => "uncovered",
            RecordKind::Covered   => "covered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw object-language text, tag stripped
    pub source: String,

    /// Morpheme gloss, tag stripped. None for covered records.
    pub gloss: Option<String>,

    /// Free translation, when the record carries one
    pub translation: Option<String>,
}

impl Record {
    pub fn new(
        source:      impl Into<String>,
        gloss:       Option<String>,
        translation: Option<String>,
    ) -> Self {
        Self {
            source: source.into(),
            gloss,
            translation,
        }
    }
}
