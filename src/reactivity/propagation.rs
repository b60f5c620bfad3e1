// ============================================================================
// pulse-cells - Propagation
// Synchronous fan-out from a cell to its subscribers and derived children
// ============================================================================
//
// Fan-out order is fixed: all direct subscribers in registration order, then
// every propagation edge in registration order, each edge recursing into its
// child before the next edge fires. The whole cascade completes before the
// triggering set_value returns - there is no batching or deferral.
//
// Borrow safety follows the "snapshot-then-invoke" pattern: the subscriber
// and edge lists are cloned out of their RefCells before any callback runs,
// so a callback may freely subscribe, unsubscribe, or derive on the cell it
// was notified by.
// ============================================================================

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::core::types::{CellInner, DependentKey};

// =============================================================================
// FAN-OUT
// =============================================================================

/// Push a cell's freshly stored value to its subscribers and dependents.
///
/// The value must already be stored; this function only performs the
/// notification cascade. A panicking observer or edge is caught and reported
/// so the rest of the fan-out still runs - one bad callback cannot starve
/// the others.
pub(crate) fn propagate<T: Clone>(inner: &CellInner<T>) {
    let value = inner.get();

    notify_subscribers(inner, &value);

    // Detached cells keep notifying their own subscribers but never forward
    // into previously-derived children.
    if inner.is_attached() {
        propagate_dependents(inner, &value);
    }
}

/// Invoke every external observer with the new value, in registration order.
fn notify_subscribers<T>(inner: &CellInner<T>, value: &T) {
    for (key, observer) in inner.snapshot_subscribers() {
        if catch_unwind(AssertUnwindSafe(|| observer(value))).is_err() {
            tracing::error!(?key, "observer panicked during fan-out; continuing");
        }
    }
}

/// Fire every propagation edge with the new value, pruning defunct edges.
fn propagate_dependents<T>(inner: &CellInner<T>, value: &T) {
    let mut defunct: Vec<DependentKey> = Vec::new();

    for (key, edge) in inner.snapshot_dependents() {
        match catch_unwind(AssertUnwindSafe(|| edge(value))) {
            Ok(true) => {}
            Ok(false) => defunct.push(key),
            Err(_) => {
                // The derivation function panicked; the child keeps its
                // previous value and the edge stays registered.
                tracing::error!(?key, "derivation panicked during fan-out; child unchanged");
            }
        }
    }

    inner.remove_dependents(&defunct);
}

// =============================================================================
// TESTS
// =============================================================================
