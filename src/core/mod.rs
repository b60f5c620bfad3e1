// ============================================================================
// pulse-cells - Core Module
// Fundamental types and thread-local context for the cell graph
// ============================================================================

pub mod context;
pub mod types;

// Re-export commonly used items
pub use context::{with_context, CellContext};
pub use types::{CellInner, ObserverFn, SubscriberKey};
