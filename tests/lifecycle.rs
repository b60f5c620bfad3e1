use pulse_cells::{cell, cloned};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn detach_severs_incoming_and_outgoing_propagation() {
    let upstream = cell(1);
    let middle = upstream.map(|n| n + 1);
    let downstream = middle.map(|n| n * 10);

    assert!(middle.is_attached());
    middle.detach();
    assert!(!middle.is_attached());

    upstream.set_value(|_| 100);

    // Nothing below the detachment point moved.
    assert_eq!(middle.get(), 2);
    assert_eq!(downstream.get(), 20);
}

#[test]
fn detach_is_permanent_and_idempotent() {
    let upstream = cell(1);
    let child = upstream.map(|n| n * 2);

    child.detach();
    child.detach();
    child.detach();

    upstream.set_value(|_| 50);
    assert_eq!(child.get(), 2);
    assert!(!child.is_attached());
}

#[test]
fn detached_cell_still_serves_reads_writes_and_subscribers() {
    let source = cell(10);
    source.detach();

    let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));
    source.subscribe(cloned!(seen => move |v| seen.borrow_mut().push(*v)));

    source.set_value(|n| n + 5);
    assert_eq!(source.get(), 15);
    assert_eq!(*seen.borrow(), vec![15]);
}

#[test]
fn defunct_edges_are_pruned_on_the_next_upstream_fire() {
    let parent = cell(1);
    let child = parent.map(|n| n + 1);
    assert_eq!(parent.subscriber_count(), 0);
    assert_eq!(parent.inner().dependent_count(), 1);

    child.detach();
    // The edge only learns about the detachment when it next fires.
    assert_eq!(parent.inner().dependent_count(), 1);

    parent.set_value(|_| 2);
    assert_eq!(parent.inner().dependent_count(), 0);
}

#[test]
fn unsubscribe_all_clears_observers_but_not_derivations() {
    let source = cell(0);
    let fired = Rc::new(Cell::new(0));

    source.subscribe(cloned!(fired => move |_| fired.set(fired.get() + 1)));
    source.subscribe(cloned!(fired => move |_| fired.set(fired.get() + 1)));
    let child = source.map(|n| n * 2);

    source.unsubscribe_all();
    source.set_value(|_| 5);

    assert_eq!(fired.get(), 0);
    assert_eq!(child.get(), 10);
}

#[test]
fn dropping_the_last_handle_releases_derived_children() {
    let weak;
    {
        let parent = cell(1);
        let child = parent.map(|n| n + 1);
        weak = Rc::downgrade(child.inner());
        drop(child);

        // The parent's edge keeps the child alive.
        assert!(weak.upgrade().is_some());
        drop(parent);
    }

    // With the parent gone, the edge (and the child it owned) is gone too.
    assert!(weak.upgrade().is_none());
}

#[test]
fn detaching_the_parent_releases_ownership_of_children() {
    let parent = cell(1);
    let child = parent.map(|n| n + 1);
    let weak = Rc::downgrade(child.inner());
    drop(child);

    assert!(weak.upgrade().is_some());

    // detach clears the edge list, dropping the only strong reference.
    parent.detach();
    assert!(weak.upgrade().is_none());
}

#[test]
fn keys_are_never_reused_within_a_thread() {
    let a = cell(0);
    let b = cell(0);

    let k1 = a.subscribe(|_| {});
    a.unsubscribe(k1);
    let k2 = a.subscribe(|_| {});
    let k3 = b.subscribe(|_| {});

    assert_ne!(k1, k2);
    assert_ne!(k1, k3);
    assert_ne!(k2, k3);
}

#[test]
fn flat_map_inner_edges_do_not_survive_rebinding() {
    let held: Rc<RefCell<Vec<pulse_cells::ReactiveCell<i32>>>> = Rc::new(RefCell::new(Vec::new()));

    let outer = cell(0);
    let derived = outer.flat_map(cloned!(held => move |n| {
        let inner = cell(*n);
        held.borrow_mut().push(inner.clone());
        inner
    }));

    for _ in 0..5 {
        outer.set_value(|n| n + 1);
    }
    assert_eq!(derived.get(), 5);

    let held = held.borrow();
    assert_eq!(held.len(), 6);
    for stale in &held[..5] {
        assert_eq!(stale.inner().dependent_count(), 0);
    }
    assert_eq!(held[5].inner().dependent_count(), 1);
}

#[test]
fn try_get_reads_like_get_from_outside_a_callback() {
    let source = cell(7);
    assert_eq!(source.try_get(), Some(7));

    source.set_value(|n| n + 1);
    assert_eq!(source.try_get(), Some(8));
}
