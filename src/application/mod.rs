// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Each use case wires the lower layers together for one command:
//
//   prepare - corpus -> windowed / stem pair files for the
//             external sequence model
//   predict - generation logs -> voted, stem-filled glosses
//             spliced back into the covered corpus
//
// No printing here (Layer 1) and no parsing or file formats
// (Layers 4 and 6); only the order things happen in.

/// Dataset preparation workflow
pub mod prepare_use_case;

/// Ensemble prediction workflow
pub mod predict_use_case;
