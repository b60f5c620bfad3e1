// ============================================================================
// pulse-cells - Reactive Cell
// The core observable value container
// ============================================================================

use std::rc::Rc;

use crate::core::types::{CellInner, SubscriberKey};
use crate::reactivity::propagate;

// =============================================================================
// REACTIVE CELL<T> - The public cell handle
// =============================================================================

/// A mutable container whose value changes can be observed.
///
/// Updating a cell synchronously notifies every subscriber in registration
/// order and then pushes into any cells derived from it (`map`, `apply`,
/// `flat_map`), all before `set_value` returns.
///
/// Cloning the handle is cheap and shares the same underlying cell.
///
/// # Example
///
/// ```
/// use pulse_cells::cell;
///
/// let count = cell(0);
/// assert_eq!(count.get(), 0);
///
/// count.set_value(|n| n + 5);
/// assert_eq!(count.get(), 5);
/// ```
pub struct ReactiveCell<T> {
    inner: Rc<CellInner<T>>,
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> ReactiveCell<T> {
    /// Create a new cell with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(CellInner::new(value)),
        }
    }

    pub(crate) fn from_inner(inner: Rc<CellInner<T>>) -> Self {
        Self { inner }
    }

    // =========================================================================
    // VALUE ACCESS
    // =========================================================================

    /// Get the current value (cloning). Never fails, no side effects.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.get()
    }

    /// Get the current value, returning `None` if the borrow fails.
    ///
    /// In normal usage this always succeeds; the `None` arm only shows up
    /// when the value is exclusively borrowed elsewhere, where `get` would
    /// panic instead.
    pub fn try_get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.try_get()
    }

    /// Access the current value with a closure (avoids cloning).
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    ///
    /// let items = cell(vec![1, 2, 3]);
    /// let sum = items.with(|v| v.iter().sum::<i32>());
    /// assert_eq!(sum, 6);
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    /// Compute a new value from the current one, store it, and fan out.
    ///
    /// Every subscriber is invoked with the new value in registration order,
    /// then the update pushes into derived cells, recursively; the whole
    /// cascade completes before this call returns.
    ///
    /// If the updater panics, the panic propagates out of `set_value` and
    /// the cell's value is left unchanged - nobody is notified.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    ///
    /// let count = cell(10);
    /// count.set_value(|n| n * 2);
    /// assert_eq!(count.get(), 20);
    /// ```
    pub fn set_value(&self, updater: impl FnOnce(&T) -> T)
    where
        T: Clone,
    {
        let next = self.inner.with(|current| updater(current));
        self.inner.store(next);
        propagate(&self.inner);
    }

    /// Replace the value outright. Shorthand for `set_value(|_| value)`.
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        self.set_value(move |_| value);
    }

    // =========================================================================
    // SUBSCRIPTION MANAGEMENT
    // =========================================================================

    /// Register an observer to run on every subsequent update.
    ///
    /// The observer is NOT invoked at registration time; it first fires on
    /// the next `set_value`. Returns a fresh key for `unsubscribe`.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let count = cell(0);
    /// let seen = Rc::new(Cell::new(0));
    ///
    /// let seen_clone = seen.clone();
    /// count.subscribe(move |v| seen_clone.set(*v));
    ///
    /// assert_eq!(seen.get(), 0); // not invoked on registration
    /// count.set_value(|_| 42);
    /// assert_eq!(seen.get(), 42);
    /// ```
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriberKey {
        self.inner.subscribe(Rc::new(observer))
    }

    /// Remove the observer registered under `key`.
    ///
    /// Unknown or already-removed keys are a silent no-op, not a fault.
    pub fn unsubscribe(&self, key: SubscriberKey) {
        self.inner.unsubscribe(key);
    }

    /// Remove every external observer.
    ///
    /// Derived cells are unaffected: this clears direct subscribers only,
    /// never the internal parent-to-child derivation links.
    pub fn unsubscribe_all(&self) {
        self.inner.unsubscribe_all();
    }

    /// Number of registered external observers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Permanently sever this cell from the propagation graph.
    ///
    /// Previously-derived children freeze at the value they held at the
    /// moment of detachment. The cell itself keeps accepting `set_value`
    /// and keeps notifying its own direct subscribers. Calling `detach`
    /// twice is an idempotent no-op; there is no re-attach.
    pub fn detach(&self) {
        if self.inner.detach() {
            tracing::debug!("cell detached from propagation graph");
        }
    }

    /// Whether this cell still participates in propagation.
    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    /// Get a reference to the inner storage (for advanced use).
    pub fn inner(&self) -> &Rc<CellInner<T>> {
        &self.inner
    }
}

impl<T: std::fmt::Debug + Clone + 'static> std::fmt::Debug for ReactiveCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactiveCell")
            .field("value", &self.get())
            .field("attached", &self.is_attached())
            .finish()
    }
}

// =============================================================================
// CELL CREATION FUNCTION
// =============================================================================

/// Create a new reactive cell.
///
/// # Example
///
/// ```
/// use pulse_cells::cell;
///
/// let name = cell(String::from("hello"));
/// name.set_value(|s| format!("{s}, world"));
/// assert_eq!(name.get(), "hello, world");
/// ```
pub fn cell<T: 'static>(value: T) -> ReactiveCell<T> {
    ReactiveCell::new(value)
}

// =============================================================================
// TESTS
// =============================================================================
