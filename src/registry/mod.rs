//! The table registry: identifier lifecycle and the validation gate in front
//! of every table operation.

use std::cell::RefCell;

use crate::{
    common::DenseIdMap,
    define_id,
    events::{EventSink, RejectReason, SeqDisplay, TableEvent, TableOp},
    keyed_set::{KeyedSeqSet, SequenceHasher},
};


define_id!(pub TableId, u64, "a table owned by a registry");

/// A collection of tables, each holding distinct integer sequences bucketed
/// by its own hash function.
///
/// Registries are plain owned values: create as many as needed, pass them
/// where they are used, and drop them to tear everything down. Identifiers
/// come from a monotonically increasing counter and are never reused, so a
/// stale cached [`TableId`] can never alias a later table.
///
/// Every public operation validates its arguments before touching any state.
/// A failed check leaves the registry untouched and reports through the
/// return value; attached [`EventSink`]s additionally receive the named
/// reason.
#[derive(Default)]
pub struct TableRegistry {
    tables: DenseIdMap<TableId, KeyedSeqSet>,
    sink: RefCell<Option<Box<dyn EventSink>>>,
}

impl TableRegistry {
    /// Create an empty registry.
    pub fn new() -> TableRegistry {
        TableRegistry::default()
    }

    /// Create an empty registry that reports to `sink`.
    pub fn with_sink(sink: Box<dyn EventSink>) -> TableRegistry {
        TableRegistry {
            tables: DenseIdMap::default(),
            sink: RefCell::new(Some(sink)),
        }
    }

    /// Attach `sink`, replacing any previous one.
    pub fn set_sink(&mut self, sink: Box<dyn EventSink>) {
        *self.sink.get_mut() = Some(sink);
    }

    /// Create a table bucketed by `hasher` and return its identifier.
    pub fn create(&mut self, hasher: Box<dyn SequenceHasher>) -> TableId {
        log::trace!("create()");
        self.emit(TableEvent::Call {
            op: TableOp::Create,
            table: None,
            seq: None,
        });
        let id = self.tables.push(KeyedSeqSet::new(hasher));
        log::debug!("table {id:?} created");
        self.emit(TableEvent::TableCreated { table: id });
        id
    }

    /// Remove the table `id` and free its storage. No-op if `id` is not live.
    pub fn delete(&mut self, id: TableId) {
        log::trace!("delete({id:?})");
        self.emit(TableEvent::Call {
            op: TableOp::Delete,
            table: Some(id),
            seq: None,
        });
        match self.tables.remove(id) {
            Some(_) => {
                log::debug!("table {id:?} deleted");
                self.emit(TableEvent::TableDeleted { table: id });
            }
            None => self.reject(TableOp::Delete, RejectReason::UnknownTable(id)),
        }
    }

    /// The number of sequences stored in table `id`, or 0 if `id` is not
    /// live.
    pub fn size(&self, id: TableId) -> usize {
        log::trace!("size({id:?})");
        self.emit(TableEvent::Call {
            op: TableOp::Size,
            table: Some(id),
            seq: None,
        });
        let set = match self.tables.get(id) {
            Some(set) => set,
            None => {
                self.reject(TableOp::Size, RejectReason::UnknownTable(id));
                return 0;
            }
        };
        let len = set.len();
        log::debug!("table {id:?} contains {len} element(s)");
        self.emit(TableEvent::Counted { table: id, len });
        len
    }

    /// Copy `seq` into table `id` if no elementwise-equal sequence is stored
    /// there. Returns true iff an insertion occurred; false if the table is
    /// not live, `seq` is empty, or an equal sequence was already present.
    pub fn insert(&mut self, id: TableId, seq: &[u64]) -> bool {
        log::trace!("insert({:?}, {}, {})", id, SeqDisplay(seq), seq.len());
        self.emit(TableEvent::Call {
            op: TableOp::Insert,
            table: Some(id),
            seq: Some(seq),
        });
        let set = match self.checked_seq(TableOp::Insert, id, seq) {
            Some(set) => set,
            None => return false,
        };
        let newly = set.insert(seq);
        if newly {
            log::debug!("table {:?}: sequence {} inserted", id, SeqDisplay(seq));
        } else {
            log::debug!("table {:?}: sequence {} was present", id, SeqDisplay(seq));
        }
        self.emit(TableEvent::Inserted { table: id, seq, newly });
        newly
    }

    /// Remove the sequence elementwise-equal to `seq` from table `id`.
    /// Returns true iff a removal occurred; false if the table is not live,
    /// `seq` is empty, or no equal sequence was stored.
    pub fn remove(&mut self, id: TableId, seq: &[u64]) -> bool {
        log::trace!("remove({:?}, {}, {})", id, SeqDisplay(seq), seq.len());
        self.emit(TableEvent::Call {
            op: TableOp::Remove,
            table: Some(id),
            seq: Some(seq),
        });
        let set = match self.checked_seq(TableOp::Remove, id, seq) {
            Some(set) => set,
            None => return false,
        };
        let removed = set.remove(seq);
        if removed {
            log::debug!("table {:?}: sequence {} removed", id, SeqDisplay(seq));
        } else {
            log::debug!("table {:?}: sequence {} was not present", id, SeqDisplay(seq));
        }
        self.emit(TableEvent::Removed {
            table: id,
            seq,
            removed,
        });
        removed
    }

    /// Remove every sequence stored in table `id`. No-op if `id` is not live
    /// or the table is already empty; the two cases are indistinguishable
    /// here, though the event stream names them.
    pub fn clear(&mut self, id: TableId) {
        log::trace!("clear({id:?})");
        self.emit(TableEvent::Call {
            op: TableOp::Clear,
            table: Some(id),
            seq: None,
        });
        let set = match self.tables.get_mut(id) {
            Some(set) => set,
            None => {
                self.reject(TableOp::Clear, RejectReason::UnknownTable(id));
                return;
            }
        };
        let emptied = !set.is_empty();
        set.clear();
        if emptied {
            log::debug!("table {id:?} cleared");
        } else {
            log::debug!("table {id:?} was empty");
        }
        self.emit(TableEvent::Cleared { table: id, emptied });
    }

    /// Whether table `id` stores a sequence elementwise-equal to `seq`.
    /// False if the table is not live or `seq` is empty.
    pub fn test(&self, id: TableId, seq: &[u64]) -> bool {
        log::trace!("test({:?}, {}, {})", id, SeqDisplay(seq), seq.len());
        self.emit(TableEvent::Call {
            op: TableOp::Test,
            table: Some(id),
            seq: Some(seq),
        });
        if seq.is_empty() {
            self.reject(TableOp::Test, RejectReason::EmptySequence);
            return false;
        }
        let set = match self.tables.get(id) {
            Some(set) => set,
            None => {
                self.reject(TableOp::Test, RejectReason::UnknownTable(id));
                return false;
            }
        };
        let present = set.contains(seq);
        if present {
            log::debug!("table {:?}: sequence {} is present", id, SeqDisplay(seq));
        } else {
            log::debug!("table {:?}: sequence {} is not present", id, SeqDisplay(seq));
        }
        self.emit(TableEvent::Tested {
            table: id,
            seq,
            present,
        });
        present
    }

    /// The validation gate for sequence-carrying mutations: reject before any
    /// state is touched, reporting the first failing check.
    fn checked_seq(&mut self, op: TableOp, id: TableId, seq: &[u64]) -> Option<&mut KeyedSeqSet> {
        if seq.is_empty() {
            self.reject(op, RejectReason::EmptySequence);
            return None;
        }
        if self.tables.get(id).is_none() {
            self.reject(op, RejectReason::UnknownTable(id));
            return None;
        }
        self.tables.get_mut(id)
    }

    fn reject(&self, op: TableOp, reason: RejectReason) {
        log::debug!("{op:?} rejected: {reason}");
        self.emit(TableEvent::Rejected { op, reason });
    }

    fn emit(&self, event: TableEvent) {
        if let Some(sink) = self.sink.borrow_mut().as_mut() {
            sink.event(&event);
        }
    }
}
