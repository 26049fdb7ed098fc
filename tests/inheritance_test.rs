use dynref::concurrency::scoped::{self, spawn_inheriting};
use dynref::ScopedCell;
use std::sync::{mpsc, Barrier};
use std::thread;

#[test]
fn child_inherits_the_spawning_threads_value() {
    let n = ScopedCell::new(1);
    n.with_value(2, || {
        scoped::with_inherit_scope(&n, |s| {
            s.spawn(|| assert_eq!(n.get(), 2)).join().unwrap();
        });
    });
    assert_eq!(n.get(), 1);
}

#[test]
fn children_capture_the_value_at_their_own_spawn_time() {
    let n = ScopedCell::new(1);
    thread::scope(|outer| {
        outer.spawn(|| {
            n.with_value(2, || {
                scoped::with_inherit_scope(&n, |s| {
                    let inner = n.with_value(3, || s.spawn(|| n.get()));
                    let sibling = s.spawn(|| n.get());
                    assert_eq!(inner.join().unwrap(), 3);
                    assert_eq!(sibling.join().unwrap(), 2);
                });
            });
        });
    });
}

#[test]
fn grandchild_sees_the_childs_value_not_the_parents() {
    let n = ScopedCell::new(0);
    n.with_value(1, || {
        scoped::with_inherit_scope(&n, |s| {
            s.spawn(|| {
                assert_eq!(n.get(), 1);
                n.with_value(2, || {
                    scoped::with_inherit_scope(&n, |inner| {
                        inner.spawn(|| assert_eq!(n.get(), 2)).join().unwrap();
                    });
                });
                assert_eq!(n.get(), 1);
            })
            .join()
            .unwrap();
        });
    });
}

#[test]
fn later_parent_overrides_do_not_reach_a_running_child() {
    let n = ScopedCell::new(1);
    let n_ref = &n;
    let (ready_tx, ready_rx) = mpsc::channel();
    let (go_tx, go_rx) = mpsc::channel();

    n.with_value(2, || {
        scoped::with_inherit_scope(n_ref, |s| {
            let child = s.spawn(move || {
                ready_tx.send(()).unwrap();
                go_rx.recv().unwrap();
                n_ref.get()
            });
            ready_rx.recv().unwrap();
            n_ref.with_value(3, || {
                go_tx.send(()).unwrap();
                // The child captured 2 at spawn time; the parent's later
                // override to 3 must not reach it.
                assert_eq!(child.join().unwrap(), 2);
            });
        });
    });
}

#[test]
fn child_overrides_never_leak_back_to_the_parent() {
    let n = ScopedCell::new(1);
    n.with_value(2, || {
        scoped::with_inherit_scope(&n, |s| {
            s.spawn(|| n.with_value(99, || assert_eq!(n.get(), 99)))
                .join()
                .unwrap();
        });
        assert_eq!(n.get(), 2);
    });
    assert_eq!(n.get(), 1);
}

#[test]
fn concurrent_override_stacks_never_interleave() {
    let n = ScopedCell::new(0);
    let barrier = Barrier::new(2);
    thread::scope(|s| {
        for base in [10, 20] {
            let n = &n;
            let barrier = &barrier;
            s.spawn(move || {
                for _ in 0..100 {
                    barrier.wait();
                    n.with_value(base, || {
                        assert_eq!(n.get(), base);
                        n.with_value(base + 1, || assert_eq!(n.get(), base + 1));
                        assert_eq!(n.get(), base);
                    });
                    assert_eq!(n.get(), 0);
                }
            });
        }
    });
}

#[test]
fn detached_spawn_inherits_too() {
    let n = ScopedCell::new(String::from("root"));
    let handle = n.with_value(String::from("task"), || {
        spawn_inheriting(&n, {
            let n = n.clone();
            move || n.get()
        })
    });
    assert_eq!(handle.join().unwrap(), "task");
    assert_eq!(n.get(), "root");
}

#[test]
fn snapshot_is_a_point_in_time_copy() {
    let n = ScopedCell::new(1);
    let snap = n.with_value(2, || n.snapshot());
    assert_eq!(n.get(), 1);
    assert_eq!(*snap.value(), 2);

    let guard = snap.enter();
    assert_eq!(n.get(), 2);
    drop(guard);
    assert_eq!(n.get(), 1);

    assert_eq!(snap.into_value(), 2);
}

#[test]
fn snapshots_compose_across_cells() {
    let id = ScopedCell::new(0u64);
    let level = ScopedCell::new("info");
    let id_ref = &id;
    let level_ref = &level;

    id.with_value(7, || {
        level_ref.with_value("debug", || {
            let id_snap = id_ref.snapshot();
            let level_snap = level_ref.snapshot();
            thread::scope(|s| {
                s.spawn(move || {
                    let _id = id_snap.enter();
                    let _level = level_snap.enter();
                    assert_eq!(id_ref.get(), 7);
                    assert_eq!(level_ref.get(), "debug");
                });
            });
        });
    });
}

#[test]
fn panicking_child_still_clears_its_slot() {
    let n = ScopedCell::new(1);
    n.with_value(2, || {
        scoped::with_inherit_scope(&n, |s| {
            let child = s.spawn(|| -> () { panic!("child failed") });
            assert!(child.join().is_err());
        });
    });
    // The child's seeded slot died with the child; nothing leaked into the
    // shared state observable from this thread.
    assert_eq!(n.get(), 1);
}
