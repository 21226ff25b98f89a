use std::collections::VecDeque;

use gsm_core::chan_nr::{chan_nr_ss, chan_nr_tn};
use gsm_core::{GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING};
use gsm_saps::control::amr_conf::AmrMultirateConf;
use gsm_saps::control::enums::chan_mode::{RslCmode, TchMode};
use gsm_saps::control::sched::SchedError;
use gsm_saps::rsl::LchanParams;

use super::ciphering::Ciphering;
use super::handover::Handover;
use super::measurement::MeasCollector;
use super::radio_link::RadioLinkCounter;

/// Downlink L2 frames waiting for their RTS
const MAX_DCCH_QUEUE: usize = 16;

/// Procedure waiting for scheduler confirmations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Activation,
    Release,
    ModeModify,
}

#[derive(Debug, Clone, Copy)]
pub struct Pending {
    pub op: PendingOp,
    /// Confirmations still outstanding
    pub remaining: usize,
    /// First error reported for any of the commands
    pub error: Option<SchedError>,
}

/// State of one active logical channel as seen above the scheduler
#[derive(Debug)]
pub struct Lchan {
    pub chan_nr: u8,
    pub rsl_cmode: RslCmode,
    pub tch_mode: TchMode,
    pub mr_conf: Option<AmrMultirateConf>,
    pub loopback: bool,

    /// Values sent in the downlink SACCH L1 header
    pub ms_power: u8,
    pub ta: u8,
    /// Last L1 header received on the uplink SACCH
    pub ul_l1_hdr: [u8; 2],

    pub dl_dcch: VecDeque<Vec<u8>>,
    /// 21 byte L2 frames, the L1 header is prepended on transmission
    pub dl_sacch: VecDeque<Vec<u8>>,
    pub dl_tch: VecDeque<Vec<u8>>,
    pub sacch_si_cnt: usize,

    pub radio_link: RadioLinkCounter,
    pub meas: MeasCollector,
    pub ho: Handover,
    pub ciph: Ciphering,

    pub pending: Option<Pending>,
}

impl Lchan {
    pub fn new(chan_nr: u8, params: &LchanParams, radio_link_timeout: i32) -> Self {
        Self {
            chan_nr,
            rsl_cmode: params.rsl_cmode,
            tch_mode: params.tch_mode,
            mr_conf: None,
            loopback: params.loopback,
            ms_power: params.ms_power,
            ta: params.ta,
            ul_l1_hdr: [0; 2],
            dl_dcch: VecDeque::new(),
            dl_sacch: VecDeque::new(),
            dl_tch: VecDeque::new(),
            sacch_si_cnt: 0,
            radio_link: RadioLinkCounter::new(radio_link_timeout),
            meas: MeasCollector::default(),
            ho: Handover::default(),
            ciph: Ciphering::default(),
            pending: None,
        }
    }

    pub fn tn(&self) -> u8 {
        chan_nr_tn(self.chan_nr)
    }

    pub fn ss(&self) -> u8 {
        chan_nr_ss(self.chan_nr)
    }

    /// Speech or data frames flow on the TCH, otherwise only FACCH
    pub fn is_tch_active(&self) -> bool {
        self.rsl_cmode != RslCmode::Signalling
    }

    pub fn start_pending(&mut self, op: PendingOp, remaining: usize) {
        self.pending = Some(Pending { op, remaining, error: None });
    }

    /// Accounts one confirmation. Returns the finished procedure and its overall result
    pub fn confirm_pending(&mut self, result: Result<(), SchedError>) -> Option<(PendingOp, Result<(), SchedError>)> {
        let pending = self.pending.as_mut()?;
        if let Err(e) = result {
            pending.error.get_or_insert(e);
        }
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining > 0 {
            return None;
        }
        let done = (pending.op, pending.error.map_or(Ok(()), Err));
        self.pending = None;
        Some(done)
    }

    pub fn enqueue_dcch(&mut self, block: Vec<u8>) {
        if self.dl_dcch.len() >= MAX_DCCH_QUEUE {
            tracing::warn!("chan_nr {:#04x}: DCCH queue full, dropping oldest frame", self.chan_nr);
            self.dl_dcch.pop_front();
        }
        self.dl_dcch.push_back(block);
    }

    pub fn enqueue_sacch(&mut self, l2: Vec<u8>) {
        if self.dl_sacch.len() >= MAX_DCCH_QUEUE {
            tracing::warn!("chan_nr {:#04x}: SACCH queue full, dropping oldest frame", self.chan_nr);
            self.dl_sacch.pop_front();
        }
        self.dl_sacch.push_back(l2);
    }

    /// Traffic frames are never buffered beyond the next one
    pub fn enqueue_tch(&mut self, frame: Vec<u8>) {
        if !self.dl_tch.is_empty() {
            tracing::debug!("chan_nr {:#04x}: dropping {} stale traffic frames", self.chan_nr, self.dl_tch.len());
            self.dl_tch.clear();
        }
        self.dl_tch.push_back(frame);
    }
}

/// LAPDm UI frame without payload, sent when nothing else is queued
pub fn fill_frame() -> [u8; GSM_MACBLOCK_LEN] {
    let mut out = [GSM_MACBLOCK_PADDING; GSM_MACBLOCK_LEN];
    out[0] = 0x03;
    out[1] = 0x03;
    out[2] = 0x01;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_collects_first_error() {
        let mut lchan = Lchan::new(0x0a, &LchanParams::default(), 4);
        assert!(lchan.confirm_pending(Ok(())).is_none());

        lchan.start_pending(PendingOp::Activation, 3);
        assert!(lchan.confirm_pending(Ok(())).is_none());
        assert!(lchan.confirm_pending(Err(SchedError::InvalidChannel)).is_none());
        let done = lchan.confirm_pending(Err(SchedError::InvalidKey));
        assert_eq!(done, Some((PendingOp::Activation, Err(SchedError::InvalidChannel))));
        assert!(lchan.pending.is_none());
    }

    #[test]
    fn test_tch_queue_holds_one() {
        let mut lchan = Lchan::new(0x09, &LchanParams::default(), 4);
        lchan.enqueue_tch(vec![1]);
        lchan.enqueue_tch(vec![2]);
        assert_eq!(lchan.dl_tch.len(), 1);
        assert_eq!(lchan.dl_tch.front(), Some(&vec![2]));
        assert_eq!(lchan.tn(), 1);
    }

    #[test]
    fn test_fill_frame() {
        let f = fill_frame();
        assert_eq!(&f[..4], &[0x03, 0x03, 0x01, 0x2b]);
    }
}
