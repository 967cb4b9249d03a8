#![cfg(test)]

// Property tests for ProbingHashTable kept inside the crate so they can
// check slot-level invariants.

use crate::probing_table::tests::ConstBuildHasher;
use crate::probing_table::ProbingHashTable;
use crate::slot::Slot;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking lands on earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Every live key must be reachable from its home index without crossing an
// empty slot, and live keys must be unique.
fn check_structure<S: BuildHasher>(t: &ProbingHashTable<Key, i32, S>) -> Result<(), TestCaseError> {
    let cap = t.capacity();
    let mut seen = BTreeSet::new();
    let mut occupied = 0;
    for (i, slot) in t.slots.iter().enumerate() {
        match slot {
            Slot::Empty => {}
            Slot::Tombstone => occupied += 1,
            Slot::Live(e) => {
                occupied += 1;
                prop_assert!(seen.insert(e.key.clone()), "duplicate live key {:?}", e.key);
                let mut j = (e.hash % cap as u64) as usize;
                while j != i {
                    prop_assert!(!t.slots[j].is_empty(), "gap before {:?} at {}", e.key, j);
                    j = (j + 1) % cap;
                }
            }
        }
    }
    prop_assert_eq!(seen.len(), t.len());
    prop_assert_eq!(occupied, t.occupied);
    prop_assert!(t.occupied < cap, "a table is never left without an empty slot");
    Ok(())
}

fn run_against_model<S: BuildHasher>(
    mut sut: ProbingHashTable<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(&pool, i);
                let before = sut.capacity();
                prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
                prop_assert!(sut.capacity() == before || sut.capacity() == before * 2);
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                prop_assert!(!sut.contains(&k));
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get_value(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
            }
            OpI::Iterate => {
                let keys: Vec<_> = sut.keys().cloned().collect();
                let values: Vec<_> = sut.values().copied().collect();
                prop_assert_eq!(keys.len(), values.len());
                for (k, v) in keys.iter().zip(&values) {
                    prop_assert_eq!(model.get(k), Some(v));
                }
                let s_keys: BTreeSet<_> = keys.into_iter().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        check_structure(&sut)?;
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// - `put` returns the previous value exactly when the model does.
// - `remove`/`get_value`/`contains` agree with the model for present and absent keys.
// - Keys and values iterate index-aligned over exactly the live entries.
// - Structural invariants (unique keys, no gaps on probe paths, occupancy
//   bookkeeping, at least one empty slot) hold after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), cap in 1usize..8) {
        let sut: ProbingHashTable<Key, i32> = ProbingHashTable::with_capacity(cap);
        run_against_model(sut, pool, ops)?;
    }
}

// Property: same invariants with every key on one probe chain, which
// stresses tombstone skipping and reuse.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), cap in 1usize..8) {
        let sut = ProbingHashTable::with_capacity_and_hasher(cap, ConstBuildHasher);
        run_against_model(sut, pool, ops)?;
    }
}
