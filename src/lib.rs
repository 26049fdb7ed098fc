//! # `dynref` - Dynamically-Scoped Reference Cells
//!
//! A small toolkit for threading cross-cutting context values (a current
//! request id, a current log level) implicitly through call chains and
//! concurrently spawned worker threads, without passing them as arguments.
//!
//! ## Core Abstractions
//!
//! 1. **Scoped cells** ([`ScopedCell<T>`]):
//!    - One immutable default value, shared by every thread.
//!    - Per-thread overrides with strict stack discipline: `with_value`
//!      installs a value for the duration of a closure and restores the
//!      prior state on *every* exit path, including panics.
//!    - Overrides on one thread are invisible to every other thread.
//!
//! 2. **Snapshots** ([`Snapshot<T>`]):
//!    - A one-time copy of the effective value as observed at capture time,
//!      installable on another thread. This is the inheritance-at-spawn
//!      building block.
//!
//! 3. **Inheriting spawns** ([`concurrency::scoped`]):
//!    - Wrappers around `std::thread::scope` / `std::thread::spawn` whose
//!      children start with the value the spawning thread observed at
//!      spawn time.
//!
//! ## Guarantees
//!
//! - **Unconditional restoration**: the prior value is reinstated before a
//!   panic unwinds out of [`ScopedCell::with_value`]; the payload passes
//!   through unmodified.
//! - **Thread isolation**: each thread owns its own slot; steady-state
//!   access never contends on another thread's state.
//! - **Point-in-time inheritance**: a child captures the parent's value at
//!   spawn time and is thereafter fully independent; later overrides on
//!   either side never reach the other.
//!
//! ## Example
//!
//! ```rust
//! use dynref::ScopedCell;
//!
//! let level = ScopedCell::new("info");
//! assert_eq!(level.get(), "info");
//!
//! let rendered = level.with_value("debug", || {
//!     format!("logging at {}", level.get())
//! });
//! assert_eq!(rendered, "logging at debug");
//! assert_eq!(level.get(), "info");
//! ```
//!
//! Spawned children inherit the spawning thread's value:
//!
//! ```rust
//! use dynref::ScopedCell;
//! use dynref::concurrency::scoped;
//!
//! let request_id = ScopedCell::new(0u64);
//!
//! request_id.with_value(42, || {
//!     scoped::with_inherit_scope(&request_id, |s| {
//!         s.spawn(|| assert_eq!(request_id.get(), 42)).join().unwrap();
//!     });
//! });
//! assert_eq!(request_id.get(), 0);
//! ```
//!
//! ## Known Limitation: Pooled Workers
//!
//! Inheritance and overrides are keyed by *thread*, not by logical unit of
//! work. A pooled worker thread that is reused across logical tasks keeps
//! whatever override or installed snapshot is still live from the previous
//! task. If you hand work to a thread pool, scope the value inside the
//! submitted job (capture a [`Snapshot`] and `enter` it at the top of the
//! job) rather than relying on ambient state; no automatic reset protocol
//! is provided.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cell;
pub mod concurrency;

pub use cell::{OverrideGuard, ScopedCell, Snapshot};

// Compile-time layout and auto-trait checks.
const _: () = {
    use core::mem;

    // The cell is a thin handle: one shared pointer, niche-optimizable.
    assert!(mem::size_of::<ScopedCell<u64>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Option<ScopedCell<u64>>>() == mem::size_of::<usize>());

    // Snapshots stay small: a shared pointer plus the captured value.
    // Loose upper bound to avoid platform brittleness.
    assert!(mem::size_of::<Snapshot<u64>>() <= mem::size_of::<usize>() * 3);

    const fn send_sync<T: Send + Sync>() {}
    send_sync::<ScopedCell<u64>>();
    send_sync::<Snapshot<u64>>();
};
