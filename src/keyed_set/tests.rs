use crate::{
    keyed_set::{fx_seq_hash, KeyedSeqSet},
    test_workloads::{self, run_set},
};

fn stock() -> KeyedSeqSet {
    KeyedSeqSet::new(Box::new(fx_seq_hash))
}

fn colliding() -> KeyedSeqSet {
    KeyedSeqSet::new(Box::new(|_: &[u64]| 0u64))
}

#[test]
fn basic_set() {
    let mut s = stock();
    assert!(s.insert(&[1]));
    assert!(s.insert(&[1, 2]));
    assert!(s.insert(&[1, 2, 3]));
    assert_eq!(s.len(), 3);

    assert!(s.contains(&[1, 2]));
    assert!(!s.contains(&[2, 1]));
    assert!(!s.insert(&[1, 2]));
    assert_eq!(s.len(), 3);

    assert!(s.remove(&[1, 2]));
    assert!(!s.remove(&[1, 2]));
    assert!(!s.contains(&[1, 2]));
    assert!(s.contains(&[1]));
    assert!(s.contains(&[1, 2, 3]));
    assert_eq!(s.len(), 2);
}

#[test]
fn prefix_is_not_equality() {
    let mut s = stock();
    assert!(s.insert(&[5, 6, 7]));
    assert!(!s.contains(&[5, 6]));
    assert!(!s.contains(&[5, 6, 7, 8]));
    assert!(s.insert(&[5, 6]));
    assert_eq!(s.len(), 2);
    assert!(s.remove(&[5, 6]));
    assert!(s.contains(&[5, 6, 7]));
}

#[test]
fn collisions_do_not_merge_distinct_sequences() {
    let mut s = colliding();
    for i in 0..64u64 {
        assert!(s.insert(&[i, i + 1]));
    }
    assert_eq!(s.len(), 64);
    for i in 0..64u64 {
        assert!(s.contains(&[i, i + 1]));
        assert!(!s.contains(&[i + 1, i]));
    }
    for i in (0..64u64).step_by(2) {
        assert!(s.remove(&[i, i + 1]));
    }
    assert_eq!(s.len(), 32);
    for i in 0..64u64 {
        assert_eq!(s.contains(&[i, i + 1]), i % 2 == 1);
    }
}

#[test]
fn removal_compacts_storage() {
    let mut s = stock();
    for i in 0..128u64 {
        assert!(s.insert(&[i, i, i]));
    }
    for i in 0..96u64 {
        assert!(s.remove(&[i, i, i]));
    }
    assert_eq!(s.len(), 32);
    for i in 96..128u64 {
        assert!(s.contains(&[i, i, i]));
    }
    for i in 0..96u64 {
        assert!(!s.contains(&[i, i, i]));
        assert!(s.insert(&[i, i, i]));
    }
    assert_eq!(s.len(), 128);
}

#[test]
fn clear_empties() {
    let mut s = colliding();
    for i in 0..10u64 {
        assert!(s.insert(&[i]));
    }
    s.clear();
    assert_eq!(s.len(), 0);
    assert!(s.is_empty());
    for i in 0..10u64 {
        assert!(!s.contains(&[i]));
    }
    assert!(s.insert(&[3]));
    assert_eq!(s.len(), 1);
}

#[test]
fn workload_dense() {
    run_set(
        Box::new(fx_seq_hash),
        test_workloads::insert_remove_dense(),
    )
}

#[test]
fn workload_sparse() {
    run_set(
        Box::new(fx_seq_hash),
        test_workloads::insert_remove_sparse(),
    )
}

#[test]
fn workload_dense_collisions() {
    run_set(
        Box::new(|_: &[u64]| 0u64),
        test_workloads::insert_remove_dense(),
    )
}

#[test]
fn workload_sparse_collisions() {
    run_set(
        Box::new(|_: &[u64]| 0u64),
        test_workloads::insert_remove_sparse(),
    )
}
