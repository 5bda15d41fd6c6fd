// ============================================================
// Layer 5 - Model Output Layer
// ============================================================
// The sequence model itself runs outside this program. This
// layer is the contract with its output:
//
//   hypothesis.rs  - parse `H-<row>` lines of a generation log
//                    into scored candidate sets
//
//   ensemble.rs    - sum candidate scores across models and
//                    pick the best one per row
//
//   reconstruct.rs - walk word rows sentence by sentence, fill
//                    [STEM] placeholders from the stem model
//
// Nothing here touches the filesystem.

/// Generation log parsing
pub mod hypothesis;

/// Score-sum ensemble voting
pub mod ensemble;

/// Sentence gloss reconstruction
pub mod reconstruct;
