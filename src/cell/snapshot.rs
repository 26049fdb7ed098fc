//! Cross-thread carrier for inheritance-at-spawn.

use std::sync::Arc;

use super::guard::OverrideGuard;
use super::scoped_cell::Shared;

/// An owned copy of a cell's effective value, captured on one thread for
/// installation on another.
///
/// This is the one-time inheritance copy: capture happens on the spawning
/// thread (so the child sees the parent's value *as of the spawn call*),
/// the snapshot moves into the child's closure, and [`enter`](Snapshot::enter)
/// installs it before the child's body runs. After capture the snapshot
/// never tracks later overrides on the capturing thread.
///
/// Several cells are inherited together by capturing one snapshot per cell
/// and entering each in the child:
///
/// ```rust
/// use dynref::ScopedCell;
///
/// let id = ScopedCell::new(0u64);
/// let level = ScopedCell::new("info");
///
/// id.with_value(7, || {
///     let id_snap = id.snapshot();
///     let level_snap = level.snapshot();
///     let id = &id;
///     let level = &level;
///     std::thread::scope(|s| {
///         s.spawn(move || {
///             let _id = id_snap.enter();
///             let _level = level_snap.enter();
///             assert_eq!(id.get(), 7);
///             assert_eq!(level.get(), "info");
///         });
///     });
/// });
/// ```
pub struct Snapshot<T> {
    shared: Arc<Shared<T>>,
    value: T,
}

impl<T> Snapshot<T> {
    pub(super) fn new(shared: Arc<Shared<T>>, value: T) -> Self {
        Self { shared, value }
    }

    /// Borrows the captured value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the snapshot, returning the captured value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: Clone> Snapshot<T> {
    /// Installs the captured value as the calling thread's current value
    /// until the returned guard drops.
    #[must_use = "the installed value is removed as soon as the guard drops"]
    pub fn enter(&self) -> OverrideGuard<'_, T> {
        OverrideGuard::install(&self.shared, self.value.clone())
    }
}

impl<T: Clone> Clone for Snapshot<T> {
    /// Clones the captured value; useful for fanning one capture out to
    /// several children.
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            value: self.value.clone(),
        }
    }
}
