// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between a raw corpus file and the lines of the
// model pair files:
//
//   corpus file
//       │
//       ▼
//   CorpusLoader      -> reads the split for a language
//       │
//       ▼
//   parser            -> Records (tags stripped)
//       │
//       ├──────────────────────┐
//       ▼                      ▼
//   WindowTokenizer        StemTokenizer
//   (word windows +        (translation chars +
//    [STEM] glosses)        stem sequence)
//       │                      │
//       ▼                      ▼
//   WindowedDataset        StemDataset
//
// Each step is a pure function of its input and is tested on
// its own.

/// Reads corpus splits from the shared-task directory layout
pub mod loader;

/// Splits corpus text into Records
pub mod parser;

/// Lowercasing, punctuation stripping, character explosion
pub mod preprocessor;

/// Word windows and gloss placeholder tokens
pub mod window;

/// Translation tokens and stem sequences
pub mod stemmer;

/// Per-record model examples
pub mod dataset;
