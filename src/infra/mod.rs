// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// File-boundary concerns shared by the use cases:
//
//   languages.rs     - language code -> corpus folder mapping,
//                      built in or loaded from JSON
//
//   pair_files.rs    - writes the parallel `.src` / target files
//                      the external model trains and decodes on,
//                      plus the run config as JSON
//
//   corpus_writer.rs - splices sentence predictions into the
//                      covered corpus
//
//   metrics.rs       - per-run summary appended to metrics.csv

/// Language code to corpus folder configuration
pub mod languages;

/// Model pair-file output
pub mod pair_files;

/// Prediction corpus output
pub mod corpus_writer;

/// Prediction run metrics CSV
pub mod metrics;
