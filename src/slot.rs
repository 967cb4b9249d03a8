//! Slot model for the backing array.

/// A live key/value pair together with the hash it was placed by.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

/// One cell of the backing array.
///
/// `Tombstone` marks a slot whose entry was removed. It is not the same as
/// `Empty`: a probe walk continues past a tombstone but stops at an empty
/// slot, so keys placed beyond a removed one stay reachable.
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Live(Entry<K, V>),
    Tombstone,
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn live(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn live_mut(&mut self) -> Option<&mut Entry<K, V>> {
        match self {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    /// Take the live entry out, leaving a tombstone behind.
    /// Non-live slots are left untouched.
    pub(crate) fn tombstone(&mut self) -> Option<Entry<K, V>> {
        if !matches!(self, Slot::Live(_)) {
            return None;
        }
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Allocate a backing array of `capacity` empty slots.
pub(crate) fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    let mut v = Vec::with_capacity(capacity);
    v.resize_with(capacity, Slot::default);
    v.into_boxed_slice()
}
