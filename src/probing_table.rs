//! ProbingHashTable: open addressing over a boxed slot array, linear probing,
//! tombstone deletion and grow-by-doubling.

use crate::error::{Error, Result};
use crate::slot::{empty_slots, Entry, Slot};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;

/// Capacity of a table built with [`ProbingHashTable::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Capacity multiplier applied when the table fills up.
pub const GROWTH_FACTOR: usize = 2;

/// Outcome of a probe walk.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// The key is live at this index.
    Found(usize),
    /// Key absent; first tombstone on the path, reusable for insertion.
    Tombstone(usize),
    /// Key absent; the empty slot that ended the walk.
    Empty(usize),
    /// Key absent and every slot was visited without meeting an empty or
    /// tombstoned one.
    Exhausted,
}

/// Open-addressing hash table with linear probing and tombstone deletion.
pub struct ProbingHashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    pub(crate) slots: Box<[Slot<K, V>]>,
    // live entries only
    len: usize,
    // live entries plus tombstones
    pub(crate) occupied: usize,
}

impl<K, V> ProbingHashTable<K, V, DefaultHashBuilder> {
    /// Create an empty table with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with room for `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S: Default> Default for ProbingHashTable<K, V, S> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, S::default())
    }
}

impl<K, V, S> ProbingHashTable<K, V, S> {
    /// Create an empty table with [`DEFAULT_CAPACITY`] slots hashing through `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    /// Create an empty table with `capacity` slots (at least one) hashing through `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            slots: empty_slots(capacity.max(1)),
            len: 0,
            occupied: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Fraction of slots that are live or tombstoned.
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.slots.len() as f64
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.occupied - self.len
    }

    /// A table is full once no empty slot remains; tombstones count as taken.
    fn is_full(&self) -> bool {
        self.occupied == self.slots.len()
    }

    fn home_index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Live `(key, value)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    /// Live keys in slot order. Index-aligned with [`values`](Self::values).
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Live values in slot order. Index-aligned with [`keys`](Self::keys).
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Double the backing array and re-place every live entry by its stored
    /// hash. Tombstones are dropped.
    fn enlarge(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity * GROWTH_FACTOR;
        let discarded = self.tombstones();
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));

        for slot in old.into_vec() {
            if let Slot::Live(entry) = slot {
                let index = self.first_empty(self.home_index(entry.hash));
                self.slots[index] = Slot::Live(entry);
            }
        }
        self.occupied = self.len;

        log::debug!(
            "Grew table from {old_capacity} to {new_capacity} slots ({} live, {discarded} tombstones discarded)",
            self.len
        );
    }

    // Keys are unique and there are no tombstones while rehashing, so the
    // probe only needs the first empty slot. The new array is at least twice
    // the live count, so one exists.
    fn first_empty(&self, start: usize) -> usize {
        let mut index = start;
        while !self.slots[index].is_empty() {
            index = (index + 1) % self.slots.len();
        }
        index
    }
}

impl<K, V, S> ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Walk forward from `start` until the key, an empty slot, or a full lap.
    ///
    /// Remembers only the first tombstone seen; when the key is absent that
    /// tombstone is preferred over the terminating empty slot.
    pub(crate) fn linear_probe<Q>(&self, start: usize, hash: u64, q: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let capacity = self.slots.len();
        let mut index = start;
        let mut first_tombstone = None;

        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => {
                    return match first_tombstone {
                        Some(t) => Probe::Tombstone(t),
                        None => Probe::Empty(index),
                    };
                }
                Slot::Live(e) if e.hash == hash && e.key.borrow() == q => {
                    return Probe::Found(index);
                }
                Slot::Live(_) => {}
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
            }
            index = (index + 1) % capacity;
        }

        match first_tombstone {
            Some(t) => Probe::Tombstone(t),
            None => Probe::Exhausted,
        }
    }

    fn probe<Q>(&self, q: &Q) -> (u64, Probe)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        (hash, self.linear_probe(self.home_index(hash), hash, q))
    }

    /// Insert or update. Returns the previous value when `key` was live.
    ///
    /// A new entry lands in the first tombstone on the key's probe path, or
    /// in the empty slot ending it. If that leaves no empty slot, the table
    /// doubles before returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (hash, probe) = self.probe(&key);
        let index = match probe {
            Probe::Found(i) => {
                return self.slots[i]
                    .live_mut()
                    .map(|e| mem::replace(&mut e.value, value));
            }
            Probe::Tombstone(i) => i,
            Probe::Empty(i) => {
                self.occupied += 1;
                i
            }
            Probe::Exhausted => {
                self.enlarge();
                return self.put(key, value);
            }
        };

        self.slots[index] = Slot::Live(Entry { key, value, hash });
        self.len += 1;

        if self.is_full() {
            self.enlarge();
        }
        None
    }

    /// [`put`](Self::put) for callers holding optional arguments.
    ///
    /// Fails with [`Error::InvalidArgument`] if either is `None`; the table is
    /// not touched in that case.
    pub fn try_put(&mut self, key: Option<K>, value: Option<V>) -> Result<Option<V>> {
        let key = key.ok_or(Error::InvalidArgument("key"))?;
        let value = value.ok_or(Error::InvalidArgument("value"))?;
        Ok(self.put(key, value))
    }

    /// Remove `q`, leaving a tombstone in its slot. Returns the stored value.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Probe::Found(index) = self.probe(q).1 else {
            return None;
        };
        let entry = self.slots[index].tombstone()?;
        self.len -= 1;
        log::trace!("Tombstoned slot {index}");
        Some(entry.value)
    }

    pub fn get_value<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.probe(q).1 {
            Probe::Found(index) => self.slots[index].live().map(|e| &e.value),
            _ => None,
        }
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_value(q).is_some()
    }
}

impl<K, V, S> fmt::Display for ProbingHashTable<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, (k, v)) in self.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, S> fmt::Debug for ProbingHashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingHashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over live entries in slot order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .find_map(|s| s.live().map(|e| (&e.key, &e.value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.it.size_hint().1)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            it: self.it.clone(),
        }
    }
}

/// Iterator over live keys.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over live values.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}
