//! Scoped cell family - per-thread dynamically-scoped values.
//!
//! The module tree is intentionally stratified:
//! - `scoped_cell` is the public container: default value, per-thread
//!   slots, and the `with_value` override protocol.
//! - `guard` is the RAII half of the protocol: restoration of the prior
//!   slot state on every exit path.
//! - `snapshot` is the cross-thread carrier for inheritance-at-spawn.

mod guard;
mod scoped_cell;
mod snapshot;

pub use guard::OverrideGuard;
pub use scoped_cell::ScopedCell;
pub use snapshot::Snapshot;
