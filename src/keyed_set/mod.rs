//! Per-table storage: caller-supplied bucketing over exact sequence equality.

use std::hash::{Hash, Hasher};

use hashbrown::raw::RawTable;
use rustc_hash::FxHasher;
use static_assertions::assert_obj_safe;

use crate::seq_buffer::{SeqBuffer, SeqId};

#[cfg(test)]
mod tests;

/// A bucketing function for integer sequences.
///
/// Implementations must be deterministic: the same content must map to the
/// same value for as long as a table holds it. Nothing else is assumed; a
/// constant or otherwise degenerate function only costs lookup time.
pub trait SequenceHasher {
    fn hash_seq(&self, seq: &[u64]) -> u64;
}

assert_obj_safe!(SequenceHasher);

impl<F: Fn(&[u64]) -> u64> SequenceHasher for F {
    fn hash_seq(&self, seq: &[u64]) -> u64 {
        self(seq)
    }
}

/// The stock bucketing function: [`FxHasher`] over the elements.
pub fn fx_seq_hash(seq: &[u64]) -> u64 {
    let mut hasher = FxHasher::default();
    seq.hash(&mut hasher);
    hasher.finish()
}

/// A set of distinct sequences belonging to one table.
///
/// The hasher decides only which bucket a sequence lands in; identity is
/// always elementwise equality of the full content, so sequences of different
/// lengths are never equal and hash collisions are never mistaken for
/// matches. Hash values are not stored alongside entries: every lookup,
/// insertion, removal, and rehash recomputes through the hasher.
pub struct KeyedSeqSet {
    hasher: Box<dyn SequenceHasher>,
    seqs: SeqBuffer,
    buckets: RawTable<SeqId>,
}

impl Default for KeyedSeqSet {
    fn default() -> Self {
        KeyedSeqSet::new(Box::new(fx_seq_hash))
    }
}

impl KeyedSeqSet {
    /// Create an empty set bucketed by `hasher`.
    pub fn new(hasher: Box<dyn SequenceHasher>) -> KeyedSeqSet {
        KeyedSeqSet {
            hasher,
            seqs: SeqBuffer::default(),
            buckets: RawTable::new(),
        }
    }

    /// The number of stored sequences.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an elementwise-equal sequence is stored.
    pub fn contains(&self, seq: &[u64]) -> bool {
        let hash = self.hasher.hash_seq(seq);
        self.buckets
            .get(hash, |id| self.seqs.get_seq(*id) == seq)
            .is_some()
    }

    /// Copy `seq` into the set if no elementwise-equal sequence is stored.
    /// Returns whether an insertion occurred.
    ///
    /// # Panics
    /// This method panics if `seq` is empty; empty sequences are rejected
    /// before they reach the set.
    pub fn insert(&mut self, seq: &[u64]) -> bool {
        assert!(!seq.is_empty(), "attempting to store an empty sequence");
        let Self {
            hasher,
            seqs,
            buckets,
        } = self;
        let hash = hasher.hash_seq(seq);
        if buckets.get(hash, |id| seqs.get_seq(*id) == seq).is_some() {
            return false;
        }
        let id = seqs.add_seq(seq);
        buckets.insert(hash, id, |id| hasher.hash_seq(seqs.get_seq(*id)));
        true
    }

    /// Remove the elementwise-equal stored sequence, if present. Returns
    /// whether a removal occurred.
    pub fn remove(&mut self, seq: &[u64]) -> bool {
        let removed = {
            let Self {
                hasher,
                seqs,
                buckets,
            } = self;
            let hash = hasher.hash_seq(seq);
            match buckets.remove_entry(hash, |id| seqs.get_seq(*id) == seq) {
                Some(id) => {
                    seqs.set_stale(id);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.maybe_compact();
        }
        removed
    }

    /// Remove all stored sequences.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.seqs.clear();
    }

    /// Reclaim buffer space once stale slots outnumber live ones. Bucket
    /// entries follow the ids handed out by the compacted buffer.
    fn maybe_compact(&mut self) {
        if self.seqs.stale_len() <= self.seqs.live_len() {
            return;
        }
        let Self {
            hasher,
            seqs,
            buckets,
        } = self;
        seqs.remove_stale(|seq, old, new| {
            let entry = buckets
                .get_mut(hasher.hash_seq(seq), |id| *id == old)
                .expect("every live sequence keeps a bucket entry");
            *entry = new;
        });
    }
}
