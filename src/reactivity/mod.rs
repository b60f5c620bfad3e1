// ============================================================================
// pulse-cells - Reactivity Module
// The synchronous propagation engine behind every cell update
// ============================================================================

pub mod propagation;

pub(crate) use propagation::propagate;
