//! `ScopedCell` — a dynamically-scoped reference.
//!
//! The container holds one immutable default value plus a per-thread slot
//! table keyed by [`ThreadId`]. Reads probe the calling thread's slot and
//! fall back to the default; `with_value` installs an override for the
//! duration of a closure and restores the prior state when the closure
//! exits, normally or by unwinding.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::guard::OverrideGuard;
use super::snapshot::Snapshot;

/// State shared by every handle to the same logical cell.
pub(super) struct Shared<T> {
    /// Construction-time default, immutable thereafter.
    pub(super) default: T,
    /// Per-thread overrides. A missing entry means "defer to `default`".
    /// Each thread inserts, reads, and removes only its own key.
    pub(super) slots: DashMap<ThreadId, T>,
}

/// A dynamically-scoped reference to a value of type `T`.
///
/// Every thread observes the most recent value it has itself installed via
/// [`with_value`](ScopedCell::with_value) (or had installed for it at spawn
/// time by an inheriting spawn helper), falling back to the default given
/// at construction. Overrides nest per thread and are invisible to every
/// other thread.
///
/// Cloning the handle is shallow: clones share the default and the slot
/// table, so a clone moved into a spawned closure refers to the same
/// logical cell.
///
/// # Example
///
/// ```rust
/// use dynref::ScopedCell;
///
/// let n = ScopedCell::new(1);
/// n.with_value(2, || {
///     assert_eq!(n.get(), 2);
///     n.with_value(3, || assert_eq!(n.get(), 3));
///     assert_eq!(n.get(), 2);
/// });
/// assert_eq!(n.get(), 1);
/// ```
pub struct ScopedCell<T> {
    pub(super) shared: Arc<Shared<T>>,
}

impl<T> ScopedCell<T> {
    /// Creates a cell whose default value is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                default: initial,
                slots: DashMap::new(),
            }),
        }
    }

    /// Overrides the value observed by the calling thread for the duration
    /// of `op`, returning `op`'s result.
    ///
    /// The slot state current immediately before this call (a previous
    /// override, or "unset") is saved up front and reinstated when `op`
    /// exits, whether it returns normally or unwinds. A panic raised by
    /// `op` propagates unchanged after restoration; it is never caught,
    /// wrapped, or replaced.
    ///
    /// Calls nest: an inner `with_value` restores the outer override's
    /// value, not the default.
    pub fn with_value<R>(&self, value: T, op: impl FnOnce() -> R) -> R {
        let _guard = OverrideGuard::install(&self.shared, value);
        op()
    }
}

impl<T: Clone> ScopedCell<T> {
    /// Returns the effective value for the calling thread: this thread's
    /// override if one is active, else the default.
    ///
    /// Never fails and has no side effects; the slot probe is a single
    /// sharded-map read and no lock is held beyond it.
    #[inline]
    pub fn get(&self) -> T {
        match self.shared.slots.get(&thread::current().id()) {
            Some(slot) => slot.value().clone(),
            None => self.shared.default.clone(),
        }
    }

    /// Captures the calling thread's effective value for installation on
    /// another thread.
    ///
    /// The snapshot is a point-in-time copy: overrides performed by this
    /// thread after the capture never reach it.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(Arc::clone(&self.shared), self.get())
    }
}

impl<T> Clone for ScopedCell<T> {
    /// Shallow clone: the new handle shares the default and slot table.
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Default> Default for ScopedCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for ScopedCell<T> {
    fn from(initial: T) -> Self {
        Self::new(initial)
    }
}

impl<T: Clone + fmt::Display> fmt::Display for ScopedCell<T> {
    /// Renders exactly what [`get`](ScopedCell::get) currently returns for
    /// the calling thread.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ScopedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedCell").field(&self.get()).finish()
    }
}

impl<T: Clone + Serialize> Serialize for ScopedCell<T> {
    /// Serializes the effective value for the calling thread, mirroring
    /// the `Display` contract.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ScopedCell<T> {
    /// Deserializes a value and wraps it as a fresh cell's default.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
