// ============================================================================
// pulse-cells - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Observers and derivation functions frequently capture cell handles or
/// `Rc`-wrapped state; this reduces the boilerplate of cloning them first.
///
/// # Usage
///
/// ```rust
/// use pulse_cells::{cell, cloned};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let count = cell(0);
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// count.subscribe(cloned!(log => move |v| log.borrow_mut().push(*v)));
///
/// count.set_value(|n| n + 1);
/// assert_eq!(*log.borrow(), vec![1]);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}
