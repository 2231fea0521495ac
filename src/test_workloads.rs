//! Deterministic operation workloads replayed against a `BTreeSet` oracle.

use std::collections::BTreeSet;

use crate::{
    keyed_set::{KeyedSeqSet, SequenceHasher},
    registry::TableRegistry,
};

#[derive(Debug)]
pub(crate) enum Operation {
    Insert(Vec<u64>),
    Remove(Vec<u64>),
    Test(Vec<u64>),
    Clear,
    Check,
}

fn seq(start: u64, len: usize) -> Vec<u64> {
    (0..len as u64).map(|i| start.wrapping_add(i)).collect()
}

pub(crate) fn insert_remove_dense() -> Vec<Operation> {
    let mut ops = Vec::new();
    for i in 0..48u64 {
        ops.push(Operation::Insert(seq(i, 1 + (i % 4) as usize)));
    }
    for i in 0..48u64 {
        if i % 2 == 0 {
            ops.push(Operation::Remove(seq(i, 1 + (i % 4) as usize)));
        }
        ops.push(Operation::Test(seq(i, 1 + (i % 4) as usize)));
    }
    ops.push(Operation::Check);
    for i in 0..48u64 {
        ops.push(Operation::Insert(seq(i, 2)));
    }
    ops.push(Operation::Check);
    ops.push(Operation::Clear);
    ops.push(Operation::Check);
    ops
}

pub(crate) fn insert_remove_sparse() -> Vec<Operation> {
    let mut ops = Vec::new();
    for i in 0..32u64 {
        let base = i.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        ops.push(Operation::Insert(seq(base, 1 + (i % 5) as usize)));
        ops.push(Operation::Insert(seq(base, 1 + (i % 5) as usize)));
        ops.push(Operation::Test(seq(base, 1 + (i % 5) as usize)));
    }
    for i in 0..32u64 {
        let base = i.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        ops.push(Operation::Remove(seq(base, 1 + (i % 5) as usize)));
        ops.push(Operation::Remove(seq(base, 1 + (i % 5) as usize)));
        ops.push(Operation::Test(seq(base, 1 + (i % 5) as usize)));
    }
    ops.push(Operation::Check);
    ops
}

/// Replay `ops` against a [`KeyedSeqSet`] and an oracle in lockstep.
pub(crate) fn run_set(hasher: Box<dyn SequenceHasher>, ops: Vec<Operation>) {
    let mut oracle = BTreeSet::<Vec<u64>>::new();
    let mut universe = BTreeSet::<Vec<u64>>::new();
    let mut set = KeyedSeqSet::new(hasher);
    for op in ops {
        match op {
            Operation::Insert(s) => {
                universe.insert(s.clone());
                assert_eq!(oracle.insert(s.clone()), set.insert(&s));
                assert!(set.contains(&s));
                assert_eq!(oracle.len(), set.len());
            }
            Operation::Remove(s) => {
                universe.insert(s.clone());
                assert_eq!(oracle.remove(&s), set.remove(&s));
                assert!(!set.contains(&s));
                assert_eq!(oracle.len(), set.len());
            }
            Operation::Test(s) => {
                assert_eq!(oracle.contains(&s), set.contains(&s));
            }
            Operation::Clear => {
                oracle.clear();
                set.clear();
                assert_eq!(set.len(), 0);
            }
            Operation::Check => {
                assert_eq!(oracle.len(), set.len());
                for s in &universe {
                    assert_eq!(
                        oracle.contains(s),
                        set.contains(s),
                        "membership diverged for {s:?}"
                    );
                }
            }
        }
    }
}

/// Replay `ops` against one table of a registry, with a second table kept
/// alongside to catch any bleed-through between identifiers.
pub(crate) fn run_registry(
    hasher_a: Box<dyn SequenceHasher>,
    hasher_b: Box<dyn SequenceHasher>,
    ops: Vec<Operation>,
) {
    let mut oracle = BTreeSet::<Vec<u64>>::new();
    let mut universe = BTreeSet::<Vec<u64>>::new();
    let mut reg = TableRegistry::new();
    let a = reg.create(hasher_a);
    let b = reg.create(hasher_b);
    let witness = vec![7, 7, 7, 7, 7, 7, 7];
    assert!(reg.insert(b, &witness));
    for op in ops {
        match op {
            Operation::Insert(s) => {
                universe.insert(s.clone());
                assert_eq!(oracle.insert(s.clone()), reg.insert(a, &s));
            }
            Operation::Remove(s) => {
                universe.insert(s.clone());
                assert_eq!(oracle.remove(&s), reg.remove(a, &s));
            }
            Operation::Test(s) => {
                assert_eq!(oracle.contains(&s), reg.test(a, &s));
            }
            Operation::Clear => {
                oracle.clear();
                reg.clear(a);
            }
            Operation::Check => {
                assert_eq!(oracle.len(), reg.size(a));
                for s in &universe {
                    assert_eq!(
                        oracle.contains(s),
                        reg.test(a, s),
                        "membership diverged for {s:?}"
                    );
                }
                assert_eq!(reg.size(b), 1);
                assert!(reg.test(b, &witness));
            }
        }
    }
}
