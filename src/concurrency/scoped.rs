//! Inheritance-aware spawn helpers (std-only, minimal overhead).
//!
//! These helpers wrap the standard spawn primitives to provide two
//! patterns:
//! - **Scoped**: [`with_inherit_scope`] wraps `std::thread::scope` so
//!   children that borrow from the enclosing stack frame inherit a cell's
//!   value.
//! - **Detached**: [`spawn_inheriting`] wraps `std::thread::spawn` for
//!   `'static` workloads.
// The snapshot is taken on the spawning thread and moved into the child's
// closure; the spawn itself is the synchronization point, so the child
// never observes a stale or torn value.

use std::thread;

use crate::cell::ScopedCell;

/// A scoped environment whose spawned threads inherit a cell's value.
pub struct InheritScope<'scope, 'env, T> {
    scope: &'scope thread::Scope<'scope, 'env>,
    cell: &'env ScopedCell<T>,
}

impl<'scope, 'env, T> InheritScope<'scope, 'env, T>
where
    T: Clone + Send + Sync,
{
    /// Spawns a scoped thread seeded with the cell's current value.
    ///
    /// The value is captured here, on the spawning thread. Overrides the
    /// parent installs after this call never reach the child, and the
    /// child's own overrides never leak back. The child's slot is cleared
    /// when `f` exits, normally or by unwinding.
    #[inline]
    pub fn spawn<R, F>(&self, f: F) -> thread::ScopedJoinHandle<'scope, R>
    where
        R: Send + 'scope,
        F: FnOnce() -> R + Send + 'scope,
    {
        let snapshot = self.cell.snapshot();
        self.scope.spawn(move || {
            let _inherited = snapshot.enter();
            f()
        })
    }
}

/// Runs a scoped region whose spawned threads inherit `cell`'s value.
///
/// # Example
///
/// ```rust
/// use dynref::ScopedCell;
/// use dynref::concurrency::scoped;
///
/// let n = ScopedCell::new(1);
/// n.with_value(2, || {
///     scoped::with_inherit_scope(&n, |s| {
///         s.spawn(|| assert_eq!(n.get(), 2)).join().unwrap();
///     });
/// });
/// ```
#[inline]
pub fn with_inherit_scope<'env, T, R, F>(cell: &'env ScopedCell<T>, f: F) -> R
where
    T: Clone + Send + Sync,
    F: for<'scope> FnOnce(InheritScope<'scope, 'env, T>) -> R,
{
    thread::scope(|scope| f(InheritScope { scope, cell }))
}

/// Spawns a detached thread seeded with the cell's current value.
///
/// The detached counterpart of [`InheritScope::spawn`] for workloads that
/// outlive the spawning stack frame; the closure must capture its own
/// handle to the cell (a shallow [`ScopedCell::clone`]) if it needs to
/// read it.
#[inline]
pub fn spawn_inheriting<T, R, F>(cell: &ScopedCell<T>, f: F) -> thread::JoinHandle<R>
where
    T: Clone + Send + Sync + 'static,
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let snapshot = cell.snapshot();
    thread::spawn(move || {
        let _inherited = snapshot.enter();
        f()
    })
}
