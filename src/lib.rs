//! probing-table: a single-threaded associative container built on open
//! addressing with linear probing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: reimplement the internals of a hash map directly over a boxed
//!   slot array, without a managed associative container underneath.
//! - Pieces:
//!   - `Slot<K, V>`: one cell of the backing array, tagged `Empty`, `Live`
//!     or `Tombstone`.
//!   - `linear_probe`: the walk shared by `put`, `remove` and `get_value`.
//!     It reports whether the key was found, the first reusable tombstone
//!     on its path, or the empty slot that ended the walk.
//!   - Growth: after an insertion takes the last empty slot, the array
//!     doubles and live entries are re-placed; tombstones are discarded.
//!
//! Constraints
//! - Single-threaded; no internal synchronization. Callers serialize access.
//! - Keys are unique among live entries. `put` on a live key updates it in
//!   place and returns the previous value.
//! - For a live key at index `i` with home index `h`, every slot on
//!   `h..i` (wrapping) is live or tombstoned, so the probe cannot stop early.
//! - Growth completes before `put` returns; no partially rehashed state is
//!   ever observable.
//!
//! Why tombstones?
//! - Clearing a slot on removal would cut the probe chain of any key that
//!   was placed past it. A tombstone keeps the chain intact and is reused by
//!   the next insertion whose walk passes it.
//!
//! Fullness
//! - A table counts as full when no empty slot remains. Tombstones count as
//!   taken, so churn without growth in live entries still triggers a resize,
//!   which is what clears them out.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its precomputed `u64` hash and the home index is
//!   `hash % capacity`. Growth uses the stored hash; `K: Hash` is never
//!   invoked after insertion.
//! - The hash function comes from `S: BuildHasher`; the default is
//!   hashbrown's `DefaultHashBuilder`.
//!
//! Notes and non-goals
//! - No ordering guarantees: iteration follows slot order.
//! - No shrinking and no growth policy other than doubling.
//! - Absent arguments cannot be expressed with `put`; `try_put` accepts
//!   optional inputs and rejects `None` with `Error::InvalidArgument`.

mod error;
pub mod probing_table;
mod probing_table_proptest;
mod slot;

// Public surface
pub use error::{Error, Result};
pub use probing_table::{Iter, Keys, ProbingHashTable, Values, DEFAULT_CAPACITY, GROWTH_FACTOR};
