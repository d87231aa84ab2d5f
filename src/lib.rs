//! probe-table: a string-keyed set on open addressing with double hashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a membership table whose whole behavior is the probe sequence,
//!   the growth policy, and tombstone reuse, with each piece small enough to
//!   check on its own.
//! - Layers (leaves first):
//!   - `hashing`: `home_hash`/`step_hash`, pure polynomial folds over the
//!     key's bytes taken modulo the current capacity.
//!   - `probe`: bounded `(h1 + i*h2) mod m` sequence and the single search
//!     routine shared by every operation.
//!   - `slot`: `Empty | Occupied(String) | Tombstone` stored inline in a
//!     `Vec`; no per-slot allocation besides the key itself.
//!   - `ProbeTable`: `contains`/`insert`/`delete`, growth, and the debug dump.
//!   - `command`: the `? + -` line interpreter used by the binary.
//!
//! Constraints
//! - Capacity is a power of two, starts at 8, and only ever doubles.
//! - The step hash is forced odd, so every probe sequence is a permutation of
//!   the slots and terminates after at most `capacity` steps.
//! - `len() / capacity() < 3/4` after every insert. The check runs before
//!   probing, on the count the pending insert would produce.
//! - Tombstones do not count towards load; they are reused by inserts and
//!   dropped wholesale on growth.
//!
//! Failure semantics
//! - Operations are total and report membership changes as `bool`.
//! - A probe sequence over a modulus that is not a power of two, or an even
//!   step, panics. So does an insert or rehash that finds no vacancy over a
//!   full cycle. Neither can happen with the shipped constants; both would
//!   otherwise surface as silent lookup misses.
//!
//! Notes and non-goals
//! - Single-threaded by contract; wrap in a `Mutex` to share.
//! - No iteration beyond [`ProbeTable::dump`], no values, no shrinking.

pub mod command;
pub mod hashing;
mod probe;
mod probe_table;
mod probe_table_proptest;
mod slot;

// Public surface
pub use probe_table::{ProbeTable, INITIAL_CAPACITY, MAX_LOAD_DENOMINATOR, MAX_LOAD_NUMERATOR};
pub use slot::DumpEntry;
