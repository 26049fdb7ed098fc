//! Concurrency helpers for scoped cells.
//!
//! Overrides are strictly thread-local; the helpers here are the only
//! cross-thread channel. They wrap the standard spawn primitives so that a
//! child thread's slot is seeded from the spawning thread's value at spawn
//! time, and cleared again when the child's body exits.

pub mod scoped;
