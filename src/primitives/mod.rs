// ============================================================================
// pulse-cells - Primitives Module
// The public cell handle and its derivation operators
// ============================================================================

pub mod cell;
pub mod derive;

// Re-export for convenience
pub use cell::{cell, ReactiveCell};
