// ProbingHashTable integration tests, public surface only.
//
// Invariants exercised:
// - Absent keys: get_value is None and contains is false.
// - Update semantics: put on a live key returns the old value; len unchanged.
// - Removal: returns the stored value once; the key is then absent.
// - Growth: capacity doubles when full and every live entry survives.
// - Iteration: keys() and values() are index-aligned over live entries.
// - Boundary: try_put rejects absent arguments before touching the table.
use probing_table::{Error, ProbingHashTable, DEFAULT_CAPACITY, GROWTH_FACTOR};
use std::collections::HashSet;
use test_log::test;

#[test]
fn absent_key_is_not_found() {
    let t: ProbingHashTable<String, u32> = ProbingHashTable::new();
    assert_eq!(t.get_value("nobody"), None);
    assert!(!t.contains("nobody"));
}

#[test]
fn put_get_update_remove_cycle() {
    let mut t = ProbingHashTable::new();
    assert_eq!(t.put("k".to_string(), 1), None);
    assert_eq!(t.get_value("k"), Some(&1));
    assert!(t.contains("k"));

    assert_eq!(t.put("k".to_string(), 2), Some(1));
    assert_eq!(t.get_value("k"), Some(&2));
    assert_eq!(t.len(), 1);

    assert_eq!(t.remove("k"), Some(2));
    assert_eq!(t.len(), 0);
    assert_eq!(t.get_value("k"), None);
    assert!(!t.contains("k"));

    assert_eq!(t.remove("k"), None);
    assert_eq!(t.len(), 0);

    assert_eq!(t.put("k".to_string(), 3), None);
    assert_eq!(t.get_value("k"), Some(&3));
}

#[test]
fn growth_keeps_all_entries() {
    let mut t: ProbingHashTable<u64, u64> = ProbingHashTable::new();
    let mut expected_capacity = DEFAULT_CAPACITY;
    for k in 0..1_000u64 {
        t.put(k, k * 7);
        assert!(t.capacity() > t.len(), "an empty slot always remains");
        if t.capacity() != expected_capacity {
            assert_eq!(t.capacity(), expected_capacity * GROWTH_FACTOR);
            expected_capacity = t.capacity();
        }
    }
    assert_eq!(t.len(), 1_000);
    for k in 0..1_000u64 {
        assert_eq!(t.get_value(&k), Some(&(k * 7)));
    }
}

#[test]
fn churn_without_net_growth_eventually_resizes() {
    // Every remove leaves a tombstone. A fresh key whose home slot is empty
    // takes it, so the table eventually fills and must grow.
    let mut t: ProbingHashTable<u64, u64> = ProbingHashTable::with_capacity(8);
    let mut resized = false;
    for k in 0..10_000u64 {
        t.put(k, k);
        assert_eq!(t.remove(&k), Some(k));
        if t.capacity() > 8 {
            resized = true;
            break;
        }
    }
    assert!(resized);
    assert!(t.is_empty());
    assert!(t.load_factor() < 1.0);
}

#[test]
fn keys_and_values_stay_aligned() {
    let mut t = ProbingHashTable::new();
    for i in 0..40 {
        t.put(format!("key{i}"), i);
    }
    for i in (0..40).filter(|i| i % 4 == 1) {
        t.remove(format!("key{i}").as_str());
    }

    let keys: Vec<&String> = t.keys().collect();
    let values: Vec<&i32> = t.values().collect();
    assert_eq!(keys.len(), values.len());
    assert_eq!(keys.len(), t.len());
    for (k, v) in keys.iter().zip(&values) {
        assert_eq!(t.get_value(k.as_str()), Some(*v));
        assert_eq!(**k, format!("key{v}"));
    }

    let unique: HashSet<_> = keys.into_iter().collect();
    assert_eq!(unique.len(), t.len());
    assert!(!unique.contains(&"key1".to_string()));
}

#[test]
fn iter_matches_keys_and_values() {
    let t: ProbingHashTable<u32, char> = ('a'..='z').enumerate().map(|(i, c)| (i as u32, c)).collect();
    let pairs: Vec<_> = (&t).into_iter().collect();
    let zipped: Vec<_> = t.keys().zip(t.values()).collect();
    assert_eq!(pairs, zipped);
    assert_eq!(pairs.len(), 26);
}

#[test]
fn try_put_validates_before_mutation() {
    let mut t: ProbingHashTable<String, i32> = ProbingHashTable::with_capacity(1);
    let err = t.try_put(None, Some(5)).unwrap_err();
    assert_eq!(err, Error::InvalidArgument("key"));
    assert!(matches!(
        t.try_put(Some("x".to_string()), None),
        Err(Error::InvalidArgument("value"))
    ));
    assert!(t.is_empty());
    assert_eq!(t.capacity(), 1, "rejected put must not grow the table");

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.to_string().contains("key"));
}

#[test]
fn display_shows_live_entries_only() {
    let mut t: ProbingHashTable<&str, i32> = ProbingHashTable::new();
    assert_eq!(t.to_string(), "{}");
    t.put("only", 1);
    t.put("gone", 2);
    t.remove("gone");
    assert_eq!(t.to_string(), "{only: 1}");
}
