//! Structured diagnostics emitted around every registry operation.
//!
//! A [`TableRegistry`](crate::TableRegistry) announces each call and each
//! outcome to an attached [`EventSink`]. Sinks observe; they never alter an
//! operation's result.

use std::fmt;

use static_assertions::assert_obj_safe;
use thiserror::Error;

use crate::registry::TableId;

/// A receiver for [`TableEvent`]s.
pub trait EventSink {
    fn event(&mut self, event: &TableEvent);
}

assert_obj_safe!(EventSink);

/// The public operations of a registry, as event tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableOp {
    Create,
    Delete,
    Size,
    Insert,
    Remove,
    Clear,
    Test,
}

/// Why a call was rejected by the validation gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("table {0:?} does not exist")]
    UnknownTable(TableId),
    #[error("invalid size (0)")]
    EmptySequence,
}

/// One diagnostic event. `Call` fires once per invocation with the incoming
/// arguments; the remaining variants describe outcomes.
#[derive(Debug, PartialEq, Eq)]
pub enum TableEvent<'a> {
    Call {
        op: TableOp,
        table: Option<TableId>,
        seq: Option<&'a [u64]>,
    },
    TableCreated {
        table: TableId,
    },
    TableDeleted {
        table: TableId,
    },
    Rejected {
        op: TableOp,
        reason: RejectReason,
    },
    Inserted {
        table: TableId,
        seq: &'a [u64],
        newly: bool,
    },
    Removed {
        table: TableId,
        seq: &'a [u64],
        removed: bool,
    },
    Tested {
        table: TableId,
        seq: &'a [u64],
        present: bool,
    },
    Cleared {
        table: TableId,
        emptied: bool,
    },
    Counted {
        table: TableId,
        len: usize,
    },
}

/// Formats a sequence the way the diagnostic stream renders it: quoted,
/// space-separated.
pub struct SeqDisplay<'a>(pub &'a [u64]);

impl fmt::Display for SeqDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_display_quotes_elements() {
        assert_eq!(SeqDisplay(&[1, 2, 3]).to_string(), "\"1 2 3\"");
        assert_eq!(SeqDisplay(&[42]).to_string(), "\"42\"");
    }

    #[test]
    fn reject_reasons_are_named() {
        assert_eq!(
            RejectReason::UnknownTable(TableId::new(3)).to_string(),
            "table TableId(3) does not exist"
        );
        assert_eq!(RejectReason::EmptySequence.to_string(), "invalid size (0)");
    }
}
