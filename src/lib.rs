//! probe-hashmap: a single-threaded, string-keyed hash map with a fixed
//! bucket array, open addressing, and double-hash probing.
//!
//! Internal Design:
//!
//! Summary
//! - Every entry lives directly in the bucket array; collisions are
//!   resolved by probing alternate slots rather than by chaining.
//! - The probe sequence for a key is derived from two independent
//!   polynomial hashes over distinct prime bases, so keys that collide on
//!   their first slot still diverge on subsequent attempts.
//! - Removal leaves a tombstone in the vacated slot. Tombstones keep probe
//!   sequences started before the removal intact, and are reclaimed by
//!   later inserts.
//!
//! Layers
//! - `hashing`: the two polynomial string hashes and the `ProbeSequence`
//!   iterator that turns them into a bounded stream of bucket indices.
//! - `probe_hash_map`: slot state transitions on the bucket array and the
//!   public map API.
//!
//! Constraints
//! - Single-threaded: shared use requires external serialization (e.g. a
//!   lock around the whole map).
//! - The bucket array never grows or shrinks. Inserting into a table with
//!   no free or reusable slot fails with `InsertError::TableFull` rather
//!   than probing forever; every probe walk visits at most `capacity`
//!   slots.
//! - Keys and values are copied into owned storage on insert. `get`
//!   returns a borrow that the borrow checker invalidates at the next
//!   mutation, since an overwrite or removal may drop the backing string.
//! - Teardown is `Drop`: each owned key and value is released exactly
//!   once, with no manual free bookkeeping to get wrong.
//!
//! Slot states
//! - A slot is `Empty` (never used), `Tombstone` (vacated by a removal),
//!   or `Occupied` with an owned entry. The sum type makes the tombstone
//!   impossible to mistake for entry data.
//! - `Empty` terminates a probe walk: the key was never inserted along
//!   this path. `Tombstone` does not: something may live further along
//!   the original insert path.
//!
//! Non-goals
//! - No generic key or value types; the map is specialized to strings.
//! - No automatic resizing or load-factor tracking.
//! - No persistence and no concurrent access.

mod hashing;
mod probe_hash_map;

// Public surface
pub use probe_hash_map::{InsertError, Iter, IterMut, ProbeHashMap};
