//! Downlink primitive queues
//!
//! Upper layers hand blocks and traffic frames to the scheduler through a
//! channel, which may be fed from another thread. Once per tick the channel is
//! drained into per-timeslot FIFOs, which the burst producers consume.

use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender};

use gsm_core::chan_nr::chan_nr_tn;
use gsm_core::gsm_time::fn_elapsed;
use gsm_core::{NUM_TIMESLOTS, GSM_HYPERFRAME};
use gsm_saps::ph::{PhDataReq, TchReq};

use super::chan_desc::TrxChan;

/// Primitives further in the future than this are stale leftovers of a wrapped frame number
const MAX_PRIM_AHEAD: u32 = 100;

/// A downlink primitive waiting for its frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DlPrim {
    Data(PhDataReq),
    Tch(TchReq),
}

impl DlPrim {
    pub fn chan_nr(&self) -> u8 {
        match self {
            DlPrim::Data(p) => p.chan_nr,
            DlPrim::Tch(p) => p.chan_nr,
        }
    }

    /// Traffic frames belong to the main link
    pub fn link_id(&self) -> u8 {
        match self {
            DlPrim::Data(p) => p.link_id,
            DlPrim::Tch(_) => 0,
        }
    }

    pub fn fn_num(&self) -> u32 {
        match self {
            DlPrim::Data(p) => p.fn_num,
            DlPrim::Tch(p) => p.fn_num,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            DlPrim::Data(p) => &p.data,
            DlPrim::Tch(p) => &p.data,
        }
    }

    pub fn is_tch(&self) -> bool {
        matches!(self, DlPrim::Tch(_))
    }
}

/// Multi-producer entry point of the downlink queues
#[derive(Debug)]
pub struct PrimQueue {
    tx: Sender<DlPrim>,
    rx: Receiver<DlPrim>,
}

impl Default for PrimQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Handle for producers outside the scheduler
    pub fn sender(&self) -> Sender<DlPrim> {
        self.tx.clone()
    }

    pub fn push(&self, prim: DlPrim) {
        // Both ends are owned here, so the channel cannot be disconnected
        let _ = self.tx.send(prim);
    }

    /// Moves everything received so far into the FIFO of the addressed timeslot
    pub fn drain_into(&self, fifos: &mut [VecDeque<DlPrim>; NUM_TIMESLOTS]) {
        for prim in self.rx.try_iter() {
            let tn = chan_nr_tn(prim.chan_nr()) as usize;
            fifos[tn].push_back(prim);
        }
    }

    /// Discards anything not yet drained
    pub fn clear(&self) {
        for _ in self.rx.try_iter() {}
    }
}

/// Takes the primitive for `fn_num` off a timeslot FIFO.
///
/// Primitives for earlier frames are dropped, primitives for later frames stay
/// queued. A primitive for this frame addressed to another channel than `chan`
/// is dropped and nothing is returned.
pub fn dequeue_prim(fifo: &mut VecDeque<DlPrim>, tn: u8, fn_num: u32, chan: TrxChan) -> Option<DlPrim> {
    let desc = chan.desc();
    let mut idx = 0;
    while idx < fifo.len() {
        let prim_fn = fifo[idx].fn_num() % GSM_HYPERFRAME;
        let ahead = fn_elapsed(prim_fn, fn_num);
        if ahead == 0 {
            let prim = fifo.remove(idx)?;
            if prim.chan_nr() != (desc.chan_nr | tn) || (prim.link_id() & 0xc0) != desc.link_id {
                tracing::error!(
                    "tn {} fn_num {}: prim for chan_nr {:#04x} link_id {:#04x} does not match {}, dropping",
                    tn, fn_num, prim.chan_nr(), prim.link_id(), chan
                );
                return None;
            }
            return Some(prim);
        }
        if ahead > MAX_PRIM_AHEAD {
            let prim = fifo.remove(idx);
            tracing::warn!(
                "tn {} fn_num {}: prim {:?} for fn_num {} is late, increase rts_advance",
                tn, fn_num, prim.as_ref().map(DlPrim::chan_nr), prim_fn
            );
            continue;
        }
        idx += 1;
    }
    None
}

/// Drops queued primitives of a channel that is being released
pub fn flush_chan(fifo: &mut VecDeque<DlPrim>, chan_nr: u8) {
    fifo.retain(|p| p.chan_nr() != chan_nr);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(chan_nr: u8, link_id: u8, fn_num: u32) -> DlPrim {
        DlPrim::Data(PhDataReq { chan_nr, link_id, fn_num, data: vec![0x2b; 23] })
    }

    #[test]
    fn test_drain_by_timeslot() {
        let q = PrimQueue::new();
        let tx = q.sender();
        tx.send(data(0x80, 0, 2)).unwrap();
        tx.send(data(0x21, 0, 6)).unwrap();
        let mut fifos: [VecDeque<DlPrim>; NUM_TIMESLOTS] = Default::default();
        q.drain_into(&mut fifos);
        assert_eq!(fifos[0].len(), 1);
        assert_eq!(fifos[1].len(), 1);
    }

    #[test]
    fn test_dequeue_keeps_future_drops_past() {
        let mut fifo = VecDeque::from(vec![data(0x80, 0, 10), data(0x80, 0, 2), data(0x80, 0, 6)]);
        // fn 10 is still ahead, fn 2 is late and dropped
        let prim = dequeue_prim(&mut fifo, 0, 6, TrxChan::Bcch).unwrap();
        assert_eq!(prim.fn_num(), 6);
        assert_eq!(fifo.len(), 1);
        assert_eq!(fifo[0].fn_num(), 10);
    }

    #[test]
    fn test_dequeue_mismatch_drops() {
        let mut fifo = VecDeque::from(vec![data(0x90, 0, 6)]);
        assert_eq!(dequeue_prim(&mut fifo, 0, 6, TrxChan::Bcch), None);
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_dequeue_across_wrap() {
        let mut fifo = VecDeque::from(vec![data(0x80, 0, 1)]);
        assert_eq!(dequeue_prim(&mut fifo, 0, GSM_HYPERFRAME - 1, TrxChan::Bcch), None);
        assert_eq!(fifo.len(), 1);
    }
}
