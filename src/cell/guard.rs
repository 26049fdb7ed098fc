//! RAII restoration half of the override protocol.

use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use super::scoped_cell::Shared;

/// Restores a thread's prior slot state when dropped.
///
/// Produced internally by [`ScopedCell::with_value`] and publicly by
/// [`Snapshot::enter`]. Restoration runs in `Drop`, so it executes on
/// every exit path out of the guarded region, including panic unwinding.
///
/// The guard is `!Send`: it must be dropped on the thread whose slot it
/// overrode. A guard restores the state that was current when it was
/// installed, so manually held guards must be dropped in LIFO order for
/// strict nesting; `with_value` enforces that ordering structurally.
///
/// [`ScopedCell::with_value`]: super::ScopedCell::with_value
/// [`Snapshot::enter`]: super::Snapshot::enter
pub struct OverrideGuard<'a, T> {
    shared: &'a Shared<T>,
    thread: ThreadId,
    /// Slot state immediately before this push: `Some` restores a prior
    /// override, `None` clears the slot back to "unset".
    prior: Option<T>,
    /// Slots are thread-owned; the guard must not migrate.
    _not_send: PhantomData<*const ()>,
}

impl<'a, T> OverrideGuard<'a, T> {
    /// Installs `value` as the calling thread's current value, saving
    /// whatever the slot held before.
    pub(super) fn install(shared: &'a Shared<T>, value: T) -> Self {
        let thread = thread::current().id();
        let prior = shared.slots.insert(thread, value);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "dynref",
            ?thread,
            nested = prior.is_some(),
            "override installed"
        );
        Self {
            shared,
            thread,
            prior,
            _not_send: PhantomData,
        }
    }
}

impl<T> Drop for OverrideGuard<'_, T> {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "dynref",
            thread = ?self.thread,
            restored_prior = self.prior.is_some(),
            "override removed"
        );
        match self.prior.take() {
            Some(prior) => {
                self.shared.slots.insert(self.thread, prior);
            }
            None => {
                self.shared.slots.remove(&self.thread);
            }
        }
    }
}
