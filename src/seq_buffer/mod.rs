//! Flat storage for the variable-length sequences held by one table.

use smallvec::SmallVec;

use crate::{common::NumericId, define_id};

#[cfg(test)]
mod tests;

define_id!(pub(crate) SeqId, u32, "a stored sequence within one table's buffer");

/// Offset and length of one stored sequence within `data`.
///
/// A `len` of zero marks a stale slot: empty sequences are rejected before
/// they reach the buffer, so the encoding is unambiguous.
#[derive(Copy, Clone)]
struct Slot {
    start: usize,
    len: usize,
}

/// A batch of sequences sharing a single allocation.
///
/// Unlike a fixed-arity row store, slots record their own offset and length,
/// so sequences of different lengths can live side by side. Removal marks a
/// slot stale; [`SeqBuffer::remove_stale`] reclaims the space.
#[derive(Default)]
pub(crate) struct SeqBuffer {
    data: Vec<u64>,
    slots: Vec<Slot>,
    stale: usize,
}

impl SeqBuffer {
    /// Copy `seq` into the buffer, returning the id of the new slot.
    ///
    /// # Panics
    /// This method panics if `seq` is empty.
    pub(crate) fn add_seq(&mut self, seq: &[u64]) -> SeqId {
        assert!(!seq.is_empty(), "attempting to store an empty sequence");
        let res = SeqId::from_usize(self.slots.len());
        self.slots.push(Slot {
            start: self.data.len(),
            len: seq.len(),
        });
        self.data.extend_from_slice(seq);
        res
    }

    /// Get the sequence stored under `id`. A stale slot reads back as the
    /// empty sequence, which no live slot can be.
    ///
    /// # Panics
    /// This method panics if `id` is out of bounds.
    pub(crate) fn get_seq(&self, id: SeqId) -> &[u64] {
        let slot = self.slots[id.index()];
        &self.data[slot.start..slot.start + slot.len]
    }

    /// Mark the given slot stale. Returns whether it was already stale.
    ///
    /// # Panics
    /// This method panics if `id` is out of bounds.
    pub(crate) fn set_stale(&mut self, id: SeqId) -> bool {
        let slot = &mut self.slots[id.index()];
        let already = slot.len == 0;
        if !already {
            slot.len = 0;
            self.stale += 1;
        }
        already
    }

    /// The number of live sequences in the buffer.
    pub(crate) fn live_len(&self) -> usize {
        self.slots.len() - self.stale
    }

    /// The number of stale slots awaiting compaction.
    pub(crate) fn stale_len(&self) -> usize {
        self.stale
    }

    /// Clear the contents of the buffer.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.slots.clear();
        self.stale = 0;
    }

    /// Drop stale slots and compact live data to the front of the buffer.
    /// This invalidates existing ids; `remap` is called with the content and
    /// the old and new ids of every sequence whose id changed.
    pub(crate) fn remove_stale(&mut self, mut remap: impl FnMut(&[u64], SeqId, SeqId)) {
        let mut scratch = SmallVec::<[u64; 8]>::new();
        let mut write = 0;
        let mut out = 0;
        for i in 0..self.slots.len() {
            let slot = self.slots[i];
            if slot.len == 0 {
                continue;
            }
            scratch.clear();
            scratch.extend_from_slice(&self.data[slot.start..slot.start + slot.len]);
            self.data.copy_within(slot.start..slot.start + slot.len, write);
            self.slots[out] = Slot {
                start: write,
                len: slot.len,
            };
            write += slot.len;
            if out != i {
                remap(&scratch, SeqId::from_usize(i), SeqId::from_usize(out));
            }
            out += 1;
        }
        self.data.truncate(write);
        self.slots.truncate(out);
        self.stale = 0;
    }
}
