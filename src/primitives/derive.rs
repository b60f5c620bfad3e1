// ============================================================================
// pulse-cells - Derivation Operators
// map / apply / flat_map - derived cells kept in sync by propagation edges
// ============================================================================
//
// All three operators reduce to the same mechanism: construct a child cell
// from a snapshot of the source(s), then register a propagation edge on each
// source that recomputes the child and fans out from it. The edge owns the
// child's inner, so intermediate derived cells (e.g. the partially-applied
// cell in `f.apply(&x).apply(&y)`) stay alive as long as an ancestor does;
// the child never references its parent, keeping the graph acyclic.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::types::{CellInner, DependentKey};
use crate::primitives::cell::ReactiveCell;
use crate::reactivity::propagate;

// =============================================================================
// MAP
// =============================================================================

impl<T: 'static> ReactiveCell<T> {
    /// Create a cell whose value is `f` applied to this cell's value.
    ///
    /// The child is initialized from the current value and recomputed on
    /// every subsequent update of this cell, then fans out to its own
    /// subscribers and dependents transitively. Chains arbitrarily deep.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    ///
    /// let count = cell(10);
    /// let doubled = count.map(|n| n * 2);
    /// assert_eq!(doubled.get(), 20);
    ///
    /// count.set_value(|n| n + 5);
    /// assert_eq!(doubled.get(), 30);
    /// ```
    pub fn map<U, F>(&self, f: F) -> ReactiveCell<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        let child = Rc::new(CellInner::new(self.inner().with(|v| f(v))));

        let target = Rc::clone(&child);
        self.inner().add_dependent(Rc::new(move |parent: &T| {
            if !target.is_attached() {
                return false;
            }
            target.store(f(parent));
            propagate(&target);
            true
        }));

        ReactiveCell::from_inner(child)
    }

    /// Create a cell that re-binds to the cell returned by `f`.
    ///
    /// The child is initialized from `f(current).get()`. When THIS cell
    /// changes, `f` runs again and the child re-binds to the freshly
    /// returned inner cell, dropping the edge on the previous inner cell so
    /// stale subscriptions never accumulate. Changes to the current inner
    /// cell alone also reach the child.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    ///
    /// let outer = cell(1);
    /// let derived = outer.flat_map(|n| cell(n * 100));
    /// assert_eq!(derived.get(), 100);
    ///
    /// outer.set_value(|_| 2);
    /// assert_eq!(derived.get(), 200);
    /// ```
    pub fn flat_map<U, F>(&self, f: F) -> ReactiveCell<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> ReactiveCell<U> + 'static,
    {
        let first = self.inner().with(|v| f(v));
        let child = Rc::new(CellInner::new(first.inner().get()));

        let key = bind_inner(&first, &child);
        let binding = RefCell::new(InnerBinding { source: first, key });

        let target = Rc::clone(&child);
        self.inner().add_dependent(Rc::new(move |outer: &T| {
            if !target.is_attached() {
                // Unhook from the current inner cell as well.
                let bound = binding.borrow();
                bound.source.inner().remove_dependent(bound.key);
                return false;
            }

            let next = f(outer);
            let next_key = bind_inner(&next, &target);
            let previous = {
                let mut bound = binding.borrow_mut();
                std::mem::replace(
                    &mut *bound,
                    InnerBinding {
                        source: next.clone(),
                        key: next_key,
                    },
                )
            };
            previous.source.inner().remove_dependent(previous.key);

            target.store(next.inner().get());
            propagate(&target);
            true
        }));

        ReactiveCell::from_inner(child)
    }
}

/// The child's current link to an inner cell produced by `flat_map`'s
/// function. Holding the source handle keeps a freshly-created inner cell
/// alive for as long as the binding stands.
struct InnerBinding<U: 'static> {
    source: ReactiveCell<U>,
    key: DependentKey,
}

/// Forward an inner cell's updates into the `flat_map` child.
fn bind_inner<U: Clone + 'static>(
    source: &ReactiveCell<U>,
    target: &Rc<CellInner<U>>,
) -> DependentKey {
    let target = Rc::clone(target);
    source.inner().add_dependent(Rc::new(move |value: &U| {
        if !target.is_attached() {
            return false;
        }
        target.store(value.clone());
        propagate(&target);
        true
    }))
}

// =============================================================================
// APPLY
// =============================================================================

impl<F: 'static> ReactiveCell<F> {
    /// Combine a cell of functions with a cell of arguments.
    ///
    /// The child holds `function(argument)` and recomputes when EITHER
    /// source changes, reapplying the possibly-updated function to the
    /// possibly-updated argument. Currying combines any number of
    /// independent cells into one derived value.
    ///
    /// Each edge references the opposite source weakly; if one source is
    /// dropped, the combination silently freezes at its last value.
    ///
    /// # Example
    ///
    /// ```
    /// use pulse_cells::cell;
    ///
    /// let add = cell(|a: &i32| {
    ///     let a = *a;
    ///     move |b: &i32| a + b
    /// });
    /// let x = cell(10);
    /// let y = cell(20);
    ///
    /// let sum = add.apply(&x).apply(&y);
    /// assert_eq!(sum.get(), 30);
    ///
    /// x.set_value(|_| 15);
    /// assert_eq!(sum.get(), 35);
    /// ```
    pub fn apply<A, B>(&self, argument: &ReactiveCell<A>) -> ReactiveCell<B>
    where
        F: Fn(&A) -> B,
        A: 'static,
        B: Clone + 'static,
    {
        let initial = self.inner().with(|f| argument.inner().with(|a| f(a)));
        let child = Rc::new(CellInner::new(initial));

        // Function-side edge: a new function arrived, read the argument
        // through a weak reference.
        {
            let arg_weak = Rc::downgrade(argument.inner());
            let target = Rc::clone(&child);
            self.inner().add_dependent(Rc::new(move |func: &F| {
                if !target.is_attached() {
                    return false;
                }
                let Some(arg) = arg_weak.upgrade() else {
                    return false;
                };
                target.store(arg.with(|a| func(a)));
                propagate(&target);
                true
            }));
        }

        // Argument-side edge: a new argument arrived, read the function
        // through a weak reference.
        {
            let func_weak = Rc::downgrade(self.inner());
            let target = Rc::clone(&child);
            argument.inner().add_dependent(Rc::new(move |arg: &A| {
                if !target.is_attached() {
                    return false;
                }
                let Some(func) = func_weak.upgrade() else {
                    return false;
                };
                target.store(func.with(|f| f(arg)));
                propagate(&target);
                true
            }));
        }

        ReactiveCell::from_inner(child)
    }
}

// =============================================================================
// TESTS
// =============================================================================
