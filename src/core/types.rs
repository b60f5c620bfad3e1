// ============================================================================
// pulse-cells - Type Definitions
// Keys, callback aliases, and the cell storage behind ReactiveCell<T>
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::context::mint_key;

// =============================================================================
// KEYS
// =============================================================================

/// Opaque handle returned by `ReactiveCell::subscribe`.
///
/// Keys are minted from a thread-local monotonic counter, so a key is unique
/// within the thread and is never reused. Passing a key to the wrong cell's
/// `unsubscribe` is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberKey(u64);

impl SubscriberKey {
    pub(crate) fn mint() -> Self {
        Self(mint_key())
    }
}

/// Internal handle for a propagation edge (parent -> derived child link).
///
/// Same key space as `SubscriberKey`, but edges are managed by the derivation
/// operators, never by external code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DependentKey(u64);

impl DependentKey {
    pub(crate) fn mint() -> Self {
        Self(mint_key())
    }
}

// =============================================================================
// CALLBACK ALIASES
// =============================================================================

/// An external observer registered via `subscribe`.
pub type ObserverFn<T> = Rc<dyn Fn(&T)>;

/// A propagation edge into a derived cell.
///
/// The edge receives the parent's new value and pushes the recomputed value
/// into the child. Returning `false` tells the parent the edge is defunct
/// (the child was detached) and should be pruned.
pub(crate) type DependentFn<T> = Rc<dyn Fn(&T) -> bool>;

// =============================================================================
// CELL INNER (the data behind ReactiveCell<T>)
// =============================================================================

/// The internal storage for a reactive cell.
///
/// This is separate from `ReactiveCell<T>` so that propagation edges can hold
/// `Rc<CellInner<T>>` directly: an edge stored in a parent owns its child's
/// inner, while the child holds no reference back to the parent. The edge
/// direction keeps the graph acyclic in `Rc` terms.
pub struct CellInner<T> {
    /// The current value
    value: RefCell<T>,

    /// External observers, kept in registration order
    subscribers: RefCell<Vec<(SubscriberKey, ObserverFn<T>)>>,

    /// Propagation edges into derived cells, kept in registration order
    dependents: RefCell<Vec<(DependentKey, DependentFn<T>)>>,

    /// Whether this cell still participates in the propagation graph
    attached: Cell<bool>,
}

impl<T> CellInner<T> {
    /// Create a new cell holding the given value, attached, with no
    /// subscribers and no dependents.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            dependents: RefCell::new(Vec::new()),
            attached: Cell::new(true),
        }
    }

    // =========================================================================
    // VALUE ACCESS
    // =========================================================================

    /// Get the current value (cloning).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    /// Get the current value, or `None` if it is exclusively borrowed.
    pub fn try_get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value.try_borrow().ok().map(|v| v.clone())
    }

    /// Access the current value with a closure (avoids cloning).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Store a new value without notifying anyone.
    ///
    /// Fan-out is the caller's responsibility (see `reactivity::propagation`);
    /// keeping the write separate is what makes the update atomic with
    /// respect to observers.
    pub(crate) fn store(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    // =========================================================================
    // SUBSCRIBERS
    // =========================================================================

    /// Register an external observer. The observer is NOT invoked here; it
    /// only fires on subsequent updates.
    pub fn subscribe(&self, observer: ObserverFn<T>) -> SubscriberKey {
        let key = SubscriberKey::mint();
        self.subscribers.borrow_mut().push((key, observer));
        key
    }

    /// Remove the observer registered under `key`. Unknown keys are ignored.
    pub fn unsubscribe(&self, key: SubscriberKey) {
        self.subscribers.borrow_mut().retain(|(k, _)| *k != key);
    }

    /// Remove every external observer. Propagation edges are unaffected.
    pub fn unsubscribe_all(&self) {
        self.subscribers.borrow_mut().clear();
    }

    /// Number of registered external observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Clone out the subscriber list so callbacks can run without holding
    /// the `RefCell` borrow (an observer may subscribe or unsubscribe on
    /// this same cell while it runs).
    pub(crate) fn snapshot_subscribers(&self) -> Vec<(SubscriberKey, ObserverFn<T>)> {
        self.subscribers.borrow().clone()
    }

    // =========================================================================
    // DEPENDENTS (derivation edges)
    // =========================================================================

    /// Register a propagation edge into a derived cell.
    ///
    /// A detached cell accepts the call but registers nothing: deriving from
    /// it yields a child frozen at its construction-time snapshot. The
    /// minted key is still returned; removing it later is the usual no-op.
    pub(crate) fn add_dependent(&self, edge: DependentFn<T>) -> DependentKey {
        let key = DependentKey::mint();
        if self.attached.get() {
            self.dependents.borrow_mut().push((key, edge));
        }
        key
    }

    /// Remove a single propagation edge. Unknown keys are ignored.
    pub(crate) fn remove_dependent(&self, key: DependentKey) {
        self.dependents.borrow_mut().retain(|(k, _)| *k != key);
    }

    /// Remove a batch of defunct edges after a fan-out pass.
    pub(crate) fn remove_dependents(&self, keys: &[DependentKey]) {
        if keys.is_empty() {
            return;
        }
        self.dependents.borrow_mut().retain(|(k, _)| !keys.contains(k));
    }

    /// Number of live propagation edges out of this cell.
    pub fn dependent_count(&self) -> usize {
        self.dependents.borrow().len()
    }

    /// Clone out the edge list, same borrow-safety reasoning as
    /// `snapshot_subscribers` (an edge may add further edges while it runs,
    /// e.g. a derivation performed inside an observer).
    pub(crate) fn snapshot_dependents(&self) -> Vec<(DependentKey, DependentFn<T>)> {
        self.dependents.borrow().clone()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Sever this cell from the propagation graph. Irreversible.
    ///
    /// Clears the outgoing edge list (releasing ownership of derived
    /// children) and marks the cell detached so that edges targeting it
    /// prune themselves on the next upstream fire. Returns `false` if the
    /// cell was already detached.
    pub fn detach(&self) -> bool {
        if !self.attached.get() {
            return false;
        }
        self.attached.set(false);
        self.dependents.borrow_mut().clear();
        true
    }

    /// Whether this cell still participates in propagation.
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

// =============================================================================
// TESTS
// =============================================================================
