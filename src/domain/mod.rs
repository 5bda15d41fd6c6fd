// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain structs, lexical rules and traits shared by every
// other layer. No file I/O here.

// An annotated corpus record
pub mod record;

// Stem / tag classification and the [STEM] placeholder
pub mod gloss;

// Error taxonomy
pub mod error;

// Abstractions implemented by the data layer
pub mod traits;
