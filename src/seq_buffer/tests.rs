use crate::{
    common::NumericId,
    seq_buffer::{SeqBuffer, SeqId},
};

#[test]
fn add_and_get() {
    let mut buf = SeqBuffer::default();
    let a = buf.add_seq(&[1, 2, 3]);
    let b = buf.add_seq(&[4]);
    assert_eq!(buf.get_seq(a), &[1, 2, 3]);
    assert_eq!(buf.get_seq(b), &[4]);
    assert_eq!(buf.live_len(), 2);
    assert_eq!(buf.stale_len(), 0);
}

#[test]
fn stale_slots_read_empty() {
    let mut buf = SeqBuffer::default();
    let a = buf.add_seq(&[1, 2]);
    let b = buf.add_seq(&[3, 4]);
    assert!(!buf.set_stale(a));
    assert!(buf.set_stale(a));
    assert_eq!(buf.get_seq(a), &[] as &[u64]);
    assert_eq!(buf.get_seq(b), &[3, 4]);
    assert_eq!(buf.live_len(), 1);
    assert_eq!(buf.stale_len(), 1);
}

#[test]
fn compaction_remaps_live_sequences() {
    let mut buf = SeqBuffer::default();
    let ids: Vec<SeqId> = (0..6u64).map(|i| buf.add_seq(&[i, i, i])).collect();
    buf.set_stale(ids[0]);
    buf.set_stale(ids[2]);
    buf.set_stale(ids[4]);
    let mut moves = Vec::new();
    buf.remove_stale(|seq, old, new| moves.push((seq.to_vec(), old, new)));
    assert_eq!(buf.live_len(), 3);
    assert_eq!(buf.stale_len(), 0);
    assert_eq!(
        moves,
        vec![
            (vec![1, 1, 1], SeqId::from_usize(1), SeqId::from_usize(0)),
            (vec![3, 3, 3], SeqId::from_usize(3), SeqId::from_usize(1)),
            (vec![5, 5, 5], SeqId::from_usize(5), SeqId::from_usize(2)),
        ]
    );
    assert_eq!(buf.get_seq(SeqId::from_usize(0)), &[1, 1, 1]);
    assert_eq!(buf.get_seq(SeqId::from_usize(1)), &[3, 3, 3]);
    assert_eq!(buf.get_seq(SeqId::from_usize(2)), &[5, 5, 5]);
}

#[test]
fn compaction_without_moves_stays_silent() {
    let mut buf = SeqBuffer::default();
    let a = buf.add_seq(&[1]);
    let b = buf.add_seq(&[2, 2]);
    buf.set_stale(b);
    let mut moves = 0;
    buf.remove_stale(|_, _, _| moves += 1);
    assert_eq!(moves, 0);
    assert_eq!(buf.live_len(), 1);
    assert_eq!(buf.get_seq(a), &[1]);
}

#[test]
fn clear_resets() {
    let mut buf = SeqBuffer::default();
    let a = buf.add_seq(&[1]);
    buf.set_stale(a);
    buf.clear();
    assert_eq!(buf.live_len(), 0);
    assert_eq!(buf.stale_len(), 0);
    let b = buf.add_seq(&[2, 3]);
    assert_eq!(buf.get_seq(b), &[2, 3]);
}
