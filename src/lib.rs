// ============================================================================
// pulse-cells - Push-Based Reactive Cells for Rust
// ============================================================================
//
// A reactive cell is a mutable container whose value changes can be observed
// (subscribe/unsubscribe) and can drive derived cells (map/apply/flat_map).
// Propagation is synchronous and push-based: a set_value call stores the new
// value, notifies subscribers in registration order, then pushes into every
// derived child recursively, all before returning. detach() severs a cell
// from the derivation graph permanently.
// ============================================================================

pub mod core;
pub mod macros;
pub mod primitives;
pub mod reactivity;

// Re-export core items at crate root for ergonomic access
pub use crate::core::context::{with_context, CellContext};
pub use crate::core::types::{CellInner, ObserverFn, SubscriberKey};

// Re-export primitives at crate root
pub use crate::primitives::cell::{cell, ReactiveCell};

// =============================================================================
// TESTS
// =============================================================================
