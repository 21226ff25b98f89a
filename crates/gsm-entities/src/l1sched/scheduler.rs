//! Timeslot scheduler of one transceiver
//!
//! Holds the multiframe selection and channel states of all eight timeslots.
//! Driven by the PHY clock: every tick issues ready-to-send indications ahead
//! of time and produces the downlink burst of each timeslot. Uplink bursts are
//! resolved against the same multiframe and handed to the channel consumers.
//! Everything destined for L1SAP is collected and taken by the owning entity.

use std::collections::VecDeque;

use crossbeam_channel::Sender;

use gsm_core::chan_nr::{chan_nr_cbits, chan_nr_tn, LID_DEDIC};
use gsm_core::gsm_time::{fn_add, fn_elapsed};
use gsm_core::{BurstType, PhysChanConfig, Sbit, Tn, GSM_HYPERFRAME, NUM_TIMESLOTS};
use gsm_config::stack_config::StackConfig;
use gsm_saps::control::sched::{AmrModeSet, SchedError};
use gsm_saps::control::enums::chan_mode::{RslCmode, TchMode};
use gsm_saps::mph::MphInfo;
use gsm_saps::ph::{PhRtsInd, TchRtsInd};
use gsm_saps::trxd::{TrxdDlBurst, TrxdUlBurst};
use gsm_saps::SapMsgInner;

use super::bursts::{decrypt_burst, dummy_burst, encrypt_burst};
use super::chan_desc::{DlKind, RtsKind, TrxChan, UlKind};
use super::chan_state::{new_chan_states, ChanStates};
use super::cipher::{CipherState, Keystream};
use super::codec::ChannelCodec;
use super::loops::{LoopParams, LoopStep};
use super::mframe::{find_mframe, MfDesc};
use super::queue::{flush_chan, DlPrim, PrimQueue};

/// Gaps in the uplink shorter than this are filled with erased bursts
const MAX_UL_CATCHUP: u32 = 10;

/// Scheduler parameters derived from the stack configuration
#[derive(Debug, Clone, Copy)]
pub struct SchedParams {
    pub bsic: u8,
    pub tsc: u8,
    /// Fill unproduced bursts with the dummy burst
    pub c0: bool,
    pub clock_advance: u32,
    pub rts_advance: u32,
    pub loops: LoopParams,
}

impl SchedParams {
    pub fn from_config(cfg: &StackConfig) -> Self {
        Self {
            bsic: cfg.bts.bsic,
            tsc: cfg.bts.tsc(),
            c0: cfg.bts.c0,
            clock_advance: cfg.phy_io.clock_advance,
            rts_advance: cfg.phy_io.rts_advance,
            loops: LoopParams {
                rssi_target: cfg.bts.ms_power_target,
                power_ctrl: cfg.bts.ms_power_ctrl,
                ta_ctrl: cfg.bts.ta_ctrl,
            },
        }
    }
}

/// Scheduling state of one timeslot
pub struct TsState {
    pub pchan: PhysChanConfig,
    /// None while the timeslot is unconfigured
    pub mf: Option<&'static MfDesc>,
    /// Frame number of the last uplink burst processed
    pub mf_last_fn: Option<u32>,
    pub chans: Box<ChanStates>,
}

impl TsState {
    fn new() -> Self {
        Self { pchan: PhysChanConfig::None, mf: None, mf_last_fn: None, chans: Box::new(new_chan_states()) }
    }

    /// True if the channel appears anywhere in the current layout
    pub fn has_chan(&self, chan: TrxChan) -> bool {
        self.mf.is_some_and(|mf| mf.frames.iter().any(|f| f.dl_chan == chan || f.ul_chan == chan))
    }

    fn has_dedicated_active(&self) -> bool {
        TrxChan::all().any(|c| !c.desc().auto_active && self.chans[c.index()].active)
    }
}

/// An uplink burst after deciphering, as handed to the channel consumers
pub(super) struct UlBurst<'a> {
    pub fn_num: u32,
    pub bid: u8,
    pub bits: &'a [Sbit],
    pub burst_type: BurstType,
    pub rssi: i8,
    pub toa256: i16,
}

pub struct L1Scheduler {
    pub(super) params: SchedParams,
    pub(super) ts: [TsState; NUM_TIMESLOTS],
    pub(super) dl_prims: [VecDeque<DlPrim>; NUM_TIMESLOTS],
    queue: PrimQueue,
    pub(super) codec: Box<dyn ChannelCodec>,
    keystream: Box<dyn Keystream>,
    /// Indications for L1SAP, in order of generation
    pub(super) up: Vec<SapMsgInner>,
}

impl L1Scheduler {
    pub fn new(params: SchedParams, codec: Box<dyn ChannelCodec>, keystream: Box<dyn Keystream>) -> Self {
        Self {
            params,
            ts: core::array::from_fn(|_| TsState::new()),
            dl_prims: Default::default(),
            queue: PrimQueue::new(),
            codec,
            keystream,
            up: Vec::new(),
        }
    }

    pub fn params(&self) -> &SchedParams {
        &self.params
    }

    pub fn ts_state(&self, tn: Tn) -> &TsState {
        &self.ts[tn as usize & 7]
    }

    /// Producer handle for downlink primitives
    pub fn prim_sender(&self) -> Sender<DlPrim> {
        self.queue.sender()
    }

    pub fn enqueue(&self, prim: DlPrim) {
        self.queue.push(prim);
    }

    /// Takes all indications generated since the last call
    pub fn take_up(&mut self) -> Vec<SapMsgInner> {
        std::mem::take(&mut self.up)
    }

    /// Selects the multiframe layout of a timeslot. `PhysChanConfig::None` deconfigures it.
    pub fn configure(&mut self, tn: Tn, pchan: PhysChanConfig) -> Result<(), SchedError> {
        let idx = tn as usize;
        if idx >= NUM_TIMESLOTS {
            return Err(SchedError::NotSupported);
        }
        if self.ts[idx].has_dedicated_active() {
            tracing::warn!("tn {}: cannot configure {:?}, channels still active", tn, pchan);
            return Err(SchedError::ChannelsActive);
        }
        let mf = match pchan {
            PhysChanConfig::None => None,
            _ => Some(find_mframe(pchan, tn).ok_or(SchedError::NotSupported)?),
        };

        let ts = &mut self.ts[idx];
        ts.pchan = pchan;
        ts.mf = mf;
        ts.mf_last_fn = None;
        *ts.chans = new_chan_states();
        self.dl_prims[idx].clear();

        if let Some(mf) = mf {
            for chan in TrxChan::all() {
                if chan.desc().auto_active && ts.has_chan(chan) {
                    ts.chans[chan.index()].activate();
                }
            }
            tracing::info!("tn {}: configured {} (period {})", tn, mf.name, mf.period);
        } else {
            tracing::info!("tn {}: unconfigured", tn);
        }
        Ok(())
    }

    /// Activates or deactivates all channels matching `chan_nr` and `link_id`
    pub fn activate_channel(&mut self, chan_nr: u8, link_id: u8, on: bool) -> Result<(), SchedError> {
        let tn = chan_nr_tn(chan_nr);
        let ts = &mut self.ts[tn as usize];
        if ts.mf.is_none() {
            return Err(SchedError::NotConfigured);
        }
        let is_pdch = ts.pchan == PhysChanConfig::Pdch;

        let mut found = false;
        for chan in TrxChan::all() {
            let desc = chan.desc();
            if desc.chan_nr != chan_nr_cbits(chan_nr) || desc.link_id != link_id & 0xc0 {
                continue;
            }
            if desc.pdch != is_pdch || !ts.has_chan(chan) {
                continue;
            }
            found = true;
            let cs = &mut ts.chans[chan.index()];
            if on {
                tracing::info!("tn {}: activating {}", tn, chan);
                cs.activate();
            } else if cs.active {
                tracing::info!("tn {}: deactivating {}", tn, chan);
                cs.deactivate();
            }
        }
        if !found {
            tracing::warn!("tn {}: no channel for chan_nr {:#04x} link_id {:#04x}", tn, chan_nr, link_id);
            return Err(SchedError::InvalidChannel);
        }
        if !on {
            flush_chan(&mut self.dl_prims[tn as usize], chan_nr);
        }
        Ok(())
    }

    /// Sets the channel mode of the main channel of `chan_nr`
    pub fn set_mode(
        &mut self,
        chan_nr: u8,
        rsl_cmode: RslCmode,
        tch_mode: TchMode,
        amr: Option<AmrModeSet>,
        handover: bool,
    ) -> Result<(), SchedError> {
        let tn = chan_nr_tn(chan_nr);
        let ts = &mut self.ts[tn as usize];
        if ts.mf.is_none() {
            return Err(SchedError::NotConfigured);
        }
        // Packet data has no channel mode
        if ts.pchan == PhysChanConfig::Pdch {
            return Ok(());
        }

        let mut found = false;
        for chan in TrxChan::all() {
            let desc = chan.desc();
            if desc.chan_nr != chan_nr_cbits(chan_nr) || desc.link_id != LID_DEDIC || !ts.has_chan(chan) {
                continue;
            }
            found = true;
            let cs = &mut ts.chans[chan.index()];
            cs.rsl_cmode = rsl_cmode;
            cs.tch_mode = tch_mode;
            cs.ho_rach_detect = handover;
            if rsl_cmode == RslCmode::Speech && tch_mode == TchMode::SpeechAmr {
                if let Some(set) = amr {
                    let modes = set.conf.active_modes();
                    cs.amr.codecs = modes.len() as u8;
                    for (i, m) in modes.iter().enumerate() {
                        cs.amr.codec[i] = m.mode;
                    }
                    cs.amr.conf = set.conf;
                    let initial = set.initial_id.min(cs.amr.codecs.saturating_sub(1));
                    cs.amr.ul_ft = initial;
                    cs.amr.dl_ft = initial;
                    cs.amr.ul_cmr = initial;
                    cs.amr.dl_cmr = initial;
                    cs.amr.ber_sum = 0.0;
                    cs.amr.ber_num = 0;
                }
            }
            tracing::info!(
                "tn {}: {} mode {:?}/{:?}{}",
                tn, chan, rsl_cmode, tch_mode, if handover { " awaiting handover access" } else { "" }
            );
        }
        if found { Ok(()) } else { Err(SchedError::InvalidChannel) }
    }

    /// Sets the cipher of one direction of all channels of `chan_nr`
    pub fn set_cipher(&mut self, chan_nr: u8, downlink: bool, algo: u8, key: &[u8]) -> Result<(), SchedError> {
        let tn = chan_nr_tn(chan_nr);
        let ts = &mut self.ts[tn as usize];
        if ts.mf.is_none() {
            return Err(SchedError::NotConfigured);
        }
        if ts.pchan == PhysChanConfig::Pdch {
            return Ok(());
        }
        let cipher = if algo == 0 {
            CipherState::default()
        } else {
            let key: [u8; 8] = key.try_into().map_err(|_| SchedError::InvalidKey)?;
            CipherState { algo, key }
        };

        let mut found = false;
        for chan in TrxChan::all() {
            let desc = chan.desc();
            if desc.pdch || desc.chan_nr != chan_nr_cbits(chan_nr) || !ts.has_chan(chan) {
                continue;
            }
            found = true;
            let cs = &mut ts.chans[chan.index()];
            if downlink {
                cs.dl_cipher = cipher;
            } else {
                cs.ul_cipher = cipher;
            }
        }
        if !found {
            return Err(SchedError::InvalidChannel);
        }
        tracing::info!("tn {}: chan_nr {:#04x} {} cipher A5/{}", tn, chan_nr, if downlink { "dl" } else { "ul" }, algo);
        Ok(())
    }

    /// Arms or disarms handover access burst detection on the main channel of `chan_nr`
    pub fn set_rach_detect(&mut self, chan_nr: u8, on: bool) -> Result<(), SchedError> {
        let tn = chan_nr_tn(chan_nr);
        let ts = &mut self.ts[tn as usize];
        if ts.mf.is_none() {
            return Err(SchedError::NotConfigured);
        }
        let mut found = false;
        for chan in TrxChan::all() {
            let desc = chan.desc();
            if desc.pdch || desc.chan_nr != chan_nr_cbits(chan_nr) || desc.link_id != LID_DEDIC || !ts.has_chan(chan) {
                continue;
            }
            found = true;
            ts.chans[chan.index()].ho_rach_detect = on;
        }
        tracing::debug!("tn {}: chan_nr {:#04x} handover rach detection {}", tn, chan_nr, on);
        if found { Ok(()) } else { Err(SchedError::InvalidChannel) }
    }

    /// Returns every timeslot to the unconfigured state and drops all queued primitives
    pub fn reset(&mut self) {
        self.queue.clear();
        for (ts, prims) in self.ts.iter_mut().zip(self.dl_prims.iter_mut()) {
            *ts = TsState::new();
            prims.clear();
        }
        tracing::info!("scheduler reset");
    }

    /// Runs one frame. `fn_phy` is the frame number indicated by the PHY clock.
    /// Returns the downlink bursts of all timeslots for the advanced frame number.
    pub fn on_clock_tick(&mut self, fn_phy: u32) -> Vec<TrxdDlBurst> {
        let fn_num = fn_add(fn_phy % GSM_HYPERFRAME, self.params.clock_advance as i32);
        self.up.push(SapMsgInner::MphInfo(MphInfo::TimeInd { fn_num }));

        self.queue.drain_into(&mut self.dl_prims);

        let rts_fn = fn_add(fn_num, self.params.rts_advance as i32);
        let mut out = Vec::with_capacity(NUM_TIMESLOTS);
        for tn in 0..NUM_TIMESLOTS as Tn {
            self.rts(tn, rts_fn);
            if let Some(burst) = self.dl_burst(tn, fn_num) {
                out.push(burst);
            }
        }
        out
    }

    fn rts(&mut self, tn: Tn, fn_num: u32) {
        let ts = &self.ts[tn as usize];
        let Some(mf) = ts.mf else {
            return;
        };
        let frame = mf.frame(fn_num);
        if frame.dl_bid != 0 {
            return;
        }
        let chan = frame.dl_chan;
        let desc = chan.desc();
        let cs = &ts.chans[chan.index()];
        if desc.rts == RtsKind::None || !cs.active {
            return;
        }

        let chan_nr = desc.chan_nr | tn;
        let ph_rts = SapMsgInner::PhRtsInd(PhRtsInd { chan_nr, link_id: desc.link_id, fn_num });
        let tch_rts = cs.rsl_cmode != RslCmode::Signalling;
        tracing::trace!("tn {} fn_num {}: rts {}", tn, fn_num, chan);
        match desc.rts {
            RtsKind::None => {}
            RtsKind::Data => self.up.push(ph_rts),
            RtsKind::TchF | RtsKind::TchH => {
                // FACCH/H may only start on every other block
                if desc.rts == RtsKind::TchF || ((fn_num % 26) >> 2) & 1 == 1 {
                    self.up.push(ph_rts);
                }
                if tch_rts {
                    self.up.push(SapMsgInner::TchRtsInd(TchRtsInd { chan_nr, fn_num }));
                }
            }
        }
    }

    fn dl_burst(&mut self, tn: Tn, fn_num: u32) -> Option<TrxdDlBurst> {
        let mut produced = None;
        let mut cipher = CipherState::default();

        if let Some(mf) = self.ts[tn as usize].mf {
            let frame = *mf.frame(fn_num);
            let chan = frame.dl_chan;
            let cs = &self.ts[tn as usize].chans[chan.index()];
            if cs.active {
                cipher = cs.dl_cipher;
                let bid = frame.dl_bid;
                produced = match chan.desc().dl {
                    DlKind::None | DlKind::Idle => None,
                    DlKind::Fcch => self.tx_fcch(),
                    DlKind::Sch => self.tx_sch(fn_num),
                    DlKind::Data => self.tx_data(tn, fn_num, chan, bid),
                    DlKind::Pdtch => self.tx_pdtch(tn, fn_num, chan, bid),
                    DlKind::TchF => self.tx_tchf(tn, fn_num, chan, bid),
                    DlKind::TchH => self.tx_tchh(tn, fn_num, chan, bid),
                };
            }
        }

        let (burst_type, mut bits) = match produced {
            Some(p) => p,
            None if self.params.c0 => return Some(TrxdDlBurst {
                tn,
                fn_num,
                burst_type: BurstType::Gmsk,
                bits: dummy_burst(),
            }),
            None => return None,
        };
        if cipher.is_active() && burst_type == BurstType::Gmsk {
            let ks = self.keystream.generate(cipher.algo, &cipher.key, fn_num);
            encrypt_burst(&mut bits, &ks);
        }
        Some(TrxdDlBurst { tn, fn_num, burst_type, bits })
    }

    /// Processes a received burst, catching up on frames the PHY did not deliver
    pub fn on_uplink_burst(&mut self, burst: TrxdUlBurst) {
        let tn = burst.tn;
        let idx = tn as usize;
        if idx >= NUM_TIMESLOTS || self.ts[idx].mf.is_none() {
            return;
        }
        let Some(burst_type) = BurstType::from_len(burst.bits.len()) else {
            tracing::warn!("tn {}: uplink burst of invalid length {}", tn, burst.bits.len());
            return;
        };
        let fn_num = burst.fn_num % GSM_HYPERFRAME;

        if let Some(last) = self.ts[idx].mf_last_fn {
            let elapsed = fn_elapsed(fn_num, last);
            if elapsed == 0 || elapsed > GSM_HYPERFRAME / 2 {
                tracing::debug!("tn {} fn_num {}: late or duplicate uplink burst, last {}", tn, fn_num, last);
                return;
            }
            if elapsed < MAX_UL_CATCHUP {
                let erased = vec![0 as Sbit; burst_type.len()];
                for n in 1..elapsed {
                    self.ul_dispatch(tn, fn_add(last, n as i32), &erased, burst_type, i8::MIN, 0, true);
                }
            } else {
                tracing::warn!("tn {} fn_num {}: uplink gap of {} frames, skipping", tn, fn_num, elapsed - 1);
            }
        }
        self.ts[idx].mf_last_fn = Some(fn_num);
        self.ul_dispatch(tn, fn_num, &burst.bits, burst_type, burst.rssi, burst.toa256, false);
    }

    #[allow(clippy::too_many_arguments)]
    fn ul_dispatch(
        &mut self,
        tn: Tn,
        fn_num: u32,
        bits: &[Sbit],
        burst_type: BurstType,
        rssi: i8,
        toa256: i16,
        substituted: bool,
    ) {
        let Some(mf) = self.ts[tn as usize].mf else {
            return;
        };
        let frame = *mf.frame(fn_num);
        let chan = frame.ul_chan;
        let desc = chan.desc();
        let cs = &self.ts[tn as usize].chans[chan.index()];
        if desc.ul == UlKind::None || !cs.active {
            return;
        }
        // Access bursts are never substituted
        if substituted && (desc.ul == UlKind::Rach || cs.ho_rach_detect) {
            return;
        }

        let mut deciphered;
        let mut bits = bits;
        if cs.ul_cipher.is_active() && desc.ul != UlKind::Rach && burst_type == BurstType::Gmsk && !substituted {
            let ks = self.keystream.generate(cs.ul_cipher.algo, &cs.ul_cipher.key, fn_num);
            deciphered = bits.to_vec();
            decrypt_burst(&mut deciphered, &ks);
            bits = &deciphered;
        }

        let burst = UlBurst { fn_num, bid: frame.ul_bid, bits, burst_type, rssi, toa256 };
        match desc.ul {
            UlKind::None => {}
            UlKind::Rach => self.rx_rach(tn, chan, &burst),
            UlKind::Data => self.rx_data(tn, chan, &burst),
            UlKind::Pdtch => self.rx_pdtch(tn, chan, &burst),
            UlKind::TchF => self.rx_tchf(tn, chan, &burst),
            UlKind::TchH => self.rx_tchh(tn, chan, &burst),
        }
    }

    /// Forwards a loop decision of a SACCH
    pub(super) fn report_loop(&mut self, chan_nr: u8, step: LoopStep) {
        if step.is_zero() {
            return;
        }
        self.up.push(SapMsgInner::MphInfo(MphInfo::LoopUpdate {
            chan_nr,
            power_step: step.power,
            ta_step: step.ta,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l1sched::cipher::PseudoKeystream;
    use std::collections::HashMap;

    use crate::l1sched::codec::LoopbackCodec;
    use crate::l1sched::tx::{FR_BYTES, HR_BYTES};
    use crate::phy::components::rxtx_dev::{hard_to_soft, LOOPBACK_RSSI};
    use gsm_saps::ph::{PhDataInd, PhDataReq, PresenceInfo, TchReq};

    fn params(c0: bool) -> SchedParams {
        SchedParams {
            bsic: 63,
            tsc: 7,
            c0,
            clock_advance: 0,
            rts_advance: 5,
            loops: LoopParams { rssi_target: -75, power_ctrl: true, ta_ctrl: true },
        }
    }

    fn sched(c0: bool) -> L1Scheduler {
        L1Scheduler::new(params(c0), Box::new(LoopbackCodec::new()), Box::new(PseudoKeystream))
    }

    fn rts_fns(up: &[SapMsgInner], chan_nr: u8) -> Vec<u32> {
        up.iter()
            .filter_map(|m| match m {
                SapMsgInner::PhRtsInd(r) if r.chan_nr == chan_nr => Some(r.fn_num),
                _ => None,
            })
            .collect()
    }

    /// Plays the downlink of one timeslot back on its uplink. A burst sent on a
    /// watched channel comes back at the next uplink position of that channel,
    /// so the SDCCH/8 lag and the aligned TCH layouts both work.
    struct AirLoop {
        tn: Tn,
        watched: Vec<TrxChan>,
        pending: HashMap<TrxChan, VecDeque<Vec<Sbit>>>,
    }

    impl AirLoop {
        fn new(tn: Tn, watched: &[TrxChan]) -> Self {
            Self { tn, watched: watched.to_vec(), pending: HashMap::new() }
        }

        /// Runs one frame and returns everything sent upwards during it
        fn run(&mut self, s: &mut L1Scheduler, fn_num: u32) -> Vec<SapMsgInner> {
            let frame = *s.ts_state(self.tn).mf.unwrap().frame(fn_num);
            for burst in s.on_clock_tick(fn_num) {
                if burst.tn == self.tn && self.watched.contains(&frame.dl_chan) {
                    let soft: Vec<Sbit> = burst.bits.iter().map(|b| hard_to_soft(*b)).collect();
                    self.pending.entry(frame.dl_chan).or_default().push_back(soft);
                }
            }
            if let Some(bits) = self.pending.get_mut(&frame.ul_chan).and_then(|q| q.pop_front()) {
                s.on_uplink_burst(TrxdUlBurst { tn: self.tn, fn_num, rssi: LOOPBACK_RSSI, toa256: 0, bits });
            }
            s.take_up()
        }
    }

    fn speech_sched(tn: Tn, pchan: PhysChanConfig, chan_nr: u8) -> L1Scheduler {
        let mut s = sched(false);
        s.configure(tn, pchan).unwrap();
        s.activate_channel(chan_nr, 0, true).unwrap();
        s.set_mode(chan_nr, RslCmode::Speech, TchMode::SpeechV1, None, false).unwrap();
        s
    }

    fn assert_single_block(inds: &[PhDataInd], chan_nr: u8, data: &[u8]) {
        assert_eq!(inds.len(), 1, "{:?}", inds);
        assert_eq!(inds[0].chan_nr, chan_nr);
        assert_eq!(inds[0].link_id, 0);
        assert_eq!(inds[0].presence, PresenceInfo::Valid);
        assert_eq!(inds[0].ber10k, 0);
        assert_eq!(inds[0].data, data);
    }

    #[test]
    fn test_configure_errors() {
        let mut s = sched(true);
        assert_eq!(s.configure(1, PhysChanConfig::Ccch), Err(SchedError::NotSupported));
        assert_eq!(s.configure(2, PhysChanConfig::TchF), Ok(()));
        assert_eq!(s.activate_channel(0x0a, 0, true), Ok(()));
        assert_eq!(s.configure(2, PhysChanConfig::Pdch), Err(SchedError::ChannelsActive));
        assert_eq!(s.activate_channel(0x0a, 0, false), Ok(()));
        assert_eq!(s.configure(2, PhysChanConfig::Pdch), Ok(()));
    }

    #[test]
    fn test_activation_checks_layout() {
        let mut s = sched(true);
        assert_eq!(s.activate_channel(0x21, 0, true), Err(SchedError::NotConfigured));
        s.configure(1, PhysChanConfig::TchF).unwrap();
        assert_eq!(s.activate_channel(0x21, 0, true), Err(SchedError::InvalidChannel));
        assert_eq!(s.activate_channel(0x09, 0x40, true), Ok(()));
        assert!(s.ts_state(1).chans[TrxChan::SacchTf.index()].active);
        assert!(!s.ts_state(1).chans[TrxChan::TchF.index()].active);
        assert_eq!(s.set_cipher(0x09, true, 1, &[0; 7]), Err(SchedError::InvalidKey));
        assert_eq!(s.set_cipher(0x09, true, 1, &[0; 8]), Ok(()));
        assert!(s.ts_state(1).chans[TrxChan::TchF.index()].dl_cipher.is_active());
    }

    #[test]
    fn test_bcch_rts_and_fixed_bursts() {
        let mut s = sched(true);
        s.configure(0, PhysChanConfig::Ccch).unwrap();

        let mut up = Vec::new();
        let mut bursts = Vec::new();
        for fn_num in 0..=51 {
            bursts.extend(s.on_clock_tick(fn_num));
            up.extend(s.take_up());
        }
        assert_eq!(rts_fns(&up, 0x80), vec![53]);
        assert!(matches!(up[0], SapMsgInner::MphInfo(MphInfo::TimeInd { fn_num: 0 })));

        // One burst per timeslot and frame on C0
        assert_eq!(bursts.len(), 52 * NUM_TIMESLOTS);
        let ts0: Vec<&TrxdDlBurst> = bursts.iter().filter(|b| b.tn == 0).collect();
        assert!(ts0[0].bits.iter().all(|b| *b == 0));
        assert_ne!(ts0[1].bits, dummy_burst());
        // Nothing queued for the BCCH
        assert_eq!(ts0[2].bits, dummy_burst());
        assert_eq!(bursts.iter().find(|b| b.tn == 3).map(|b| b.bits.clone()), Some(dummy_burst()));
    }

    #[test]
    fn test_queued_block_transmitted() {
        let mut s = sched(true);
        s.configure(0, PhysChanConfig::Ccch).unwrap();
        s.enqueue(DlPrim::Data(PhDataReq { chan_nr: 0x80, link_id: 0, fn_num: 2, data: vec![0x55; 23] }));
        for fn_num in 0..2 {
            s.on_clock_tick(fn_num);
        }
        for fn_num in 2..6 {
            let bursts = s.on_clock_tick(fn_num);
            assert_ne!(bursts[0].bits, dummy_burst(), "fn {}", fn_num);
        }
        assert!(s.dl_prims[0].is_empty());
    }

    #[test]
    fn test_prims_from_other_thread() {
        let mut s = sched(true);
        s.configure(0, PhysChanConfig::Ccch).unwrap();
        let tx = s.prim_sender();
        std::thread::spawn(move || {
            tx.send(DlPrim::Data(PhDataReq { chan_nr: 0x80, link_id: 0, fn_num: 2, data: vec![0x55; 23] })).unwrap();
        })
        .join()
        .unwrap();

        s.on_clock_tick(0);
        assert_eq!(s.dl_prims[0].len(), 1);
        s.on_clock_tick(1);
        assert_ne!(s.on_clock_tick(2)[0].bits, dummy_burst());
    }

    #[test]
    fn test_silent_off_c0() {
        let mut s = sched(false);
        s.configure(3, PhysChanConfig::TchF).unwrap();
        assert!(s.on_clock_tick(0).is_empty());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut s = sched(true);
        s.configure(0, PhysChanConfig::CcchSdcch4).unwrap();
        s.configure(1, PhysChanConfig::TchF).unwrap();
        s.activate_channel(0x09, 0, true).unwrap();
        s.enqueue(DlPrim::Data(PhDataReq { chan_nr: 0x09, link_id: 0, fn_num: 40, data: vec![0; 23] }));
        s.reset();
        s.reset();
        for tn in 0..NUM_TIMESLOTS as Tn {
            assert!(s.ts_state(tn).mf.is_none());
            assert!(s.ts_state(tn).chans.iter().all(|c| !c.active));
        }
        s.on_clock_tick(0);
        assert!(s.dl_prims.iter().all(|q| q.is_empty()));
    }

    #[test]
    fn test_late_uplink_discarded() {
        let mut s = sched(true);
        s.configure(1, PhysChanConfig::TchF).unwrap();
        let burst = |fn_num| TrxdUlBurst { tn: 1, fn_num, rssi: -60, toa256: 0, bits: vec![0; 148] };
        s.on_uplink_burst(burst(10));
        s.on_uplink_burst(burst(9));
        assert_eq!(s.ts_state(1).mf_last_fn, Some(10));
        s.on_uplink_burst(burst(10));
        assert_eq!(s.ts_state(1).mf_last_fn, Some(10));
        s.on_uplink_burst(burst(40));
        assert_eq!(s.ts_state(1).mf_last_fn, Some(40));
    }

    #[test]
    fn test_sdcch8_block_round_trip() {
        let mut s = sched(false);
        s.configure(1, PhysChanConfig::Sdcch8).unwrap();
        s.activate_channel(0x41, 0, true).unwrap();
        let mut air = AirLoop::new(1, &[TrxChan::Sdcch8(0)]);

        let block: Vec<u8> = (0..23u8).map(|b| b.wrapping_mul(37) ^ 0x5c).collect();
        let mut answered = None;
        let mut inds = Vec::new();
        for fn_num in 0..120 {
            for msg in air.run(&mut s, fn_num) {
                match msg {
                    SapMsgInner::PhRtsInd(r) if r.chan_nr == 0x41 && answered.is_none() => {
                        answered = Some(r.fn_num);
                        s.enqueue(DlPrim::Data(PhDataReq { chan_nr: 0x41, link_id: 0, fn_num: r.fn_num, data: block.clone() }));
                    }
                    SapMsgInner::PhDataInd(ind) => inds.push(ind),
                    _ => {}
                }
            }
        }
        // Sent on frames 51..54, received 15 frames later
        assert_eq!(answered, Some(51));
        assert_single_block(&inds, 0x41, &block);
        assert_eq!(inds[0].fn_num, 66);
    }

    #[test]
    fn test_tchf_speech_and_facch_round_trip() {
        let mut s = speech_sched(1, PhysChanConfig::TchF, 0x09);
        let mut air = AirLoop::new(1, &[TrxChan::TchF]);

        let facch: Vec<u8> = (0..23u8).map(|b| 0x80 | b).collect();
        let mut facch_fn = None;
        let mut sent = Vec::new();
        let mut received = Vec::new();
        let mut inds = Vec::new();
        for fn_num in 0..208 {
            for msg in air.run(&mut s, fn_num) {
                match msg {
                    SapMsgInner::PhRtsInd(r) if r.fn_num >= 50 && facch_fn.is_none() => {
                        facch_fn = Some(r.fn_num);
                        s.enqueue(DlPrim::Data(PhDataReq { chan_nr: 0x09, link_id: 0, fn_num: r.fn_num, data: facch.clone() }));
                    }
                    SapMsgInner::TchRtsInd(r) if r.fn_num < 180 && Some(r.fn_num) != facch_fn => {
                        let frame = vec![0x20 + sent.len() as u8; FR_BYTES];
                        sent.push(frame.clone());
                        s.enqueue(DlPrim::Tch(TchReq { chan_nr: 0x09, fn_num: r.fn_num, data: frame }));
                    }
                    SapMsgInner::TchInd(ind) => {
                        assert_eq!(ind.chan_nr, 0x09);
                        received.push(ind.data);
                    }
                    SapMsgInner::PhDataInd(ind) => inds.push(ind),
                    _ => {}
                }
            }
        }

        assert_single_block(&inds, 0x09, &facch);
        // Blocks without a frame, and the stolen one, come up as bad frames
        let (bad, speech): (Vec<_>, Vec<_>) = received.into_iter().partition(|d| d[0] == 0xd0);
        assert_eq!(speech, sent);
        assert!(bad.iter().all(|d| d.len() == FR_BYTES && d[1..].iter().all(|b| *b == 0)));
        assert!(bad.len() >= 3);
    }

    #[test]
    fn test_tchh_speech_and_facch_round_trip() {
        let mut s = speech_sched(1, PhysChanConfig::TchH, 0x11);
        let mut air = AirLoop::new(1, &[TrxChan::TchH(0)]);

        let facch: Vec<u8> = (0..23u8).map(|b| 0x80 | b).collect();
        let mut facch_fn = None;
        let mut skip_tch = 0;
        let mut sent = Vec::new();
        let mut received = Vec::new();
        let mut inds = Vec::new();
        for fn_num in 0..208 {
            for msg in air.run(&mut s, fn_num) {
                match msg {
                    SapMsgInner::PhRtsInd(r) => {
                        assert_eq!(((r.fn_num % 26) >> 2) & 1, 1, "FACCH/H offered on fn {}", r.fn_num);
                        if r.fn_num >= 50 && facch_fn.is_none() {
                            facch_fn = Some(r.fn_num);
                            // The FACCH takes this block and the next one
                            skip_tch = 2;
                            s.enqueue(DlPrim::Data(PhDataReq { chan_nr: 0x11, link_id: 0, fn_num: r.fn_num, data: facch.clone() }));
                        }
                    }
                    SapMsgInner::TchRtsInd(r) if r.fn_num < 180 => {
                        if skip_tch > 0 {
                            skip_tch -= 1;
                            continue;
                        }
                        let frame = vec![0x20 + sent.len() as u8; HR_BYTES];
                        sent.push(frame.clone());
                        s.enqueue(DlPrim::Tch(TchReq { chan_nr: 0x11, fn_num: r.fn_num, data: frame }));
                    }
                    SapMsgInner::TchInd(ind) => {
                        assert_eq!(ind.chan_nr, 0x11);
                        received.push(ind.data);
                    }
                    SapMsgInner::PhDataInd(ind) => inds.push(ind),
                    _ => {}
                }
            }
        }

        assert!(facch_fn.is_some());
        assert_eq!(skip_tch, 0);
        assert_single_block(&inds, 0x11, &facch);
        let (bad, speech): (Vec<_>, Vec<_>) = received.into_iter().partition(|d| d[0] == 0x70);
        assert_eq!(speech, sent);
        // Both halves of the FACCH replace a speech frame
        assert!(bad.len() >= 4);
        assert!(bad.iter().all(|d| d.len() == HR_BYTES));
    }

    #[test]
    fn test_missing_uplink_sends_bfi() {
        let mut s = speech_sched(1, PhysChanConfig::TchF, 0x09);
        let mut inds = Vec::new();
        for fn_num in 0..40 {
            s.on_clock_tick(fn_num);
            for msg in s.take_up() {
                if let SapMsgInner::TchInd(ind) = msg {
                    inds.push(ind);
                }
            }
        }
        // Blocks start on 0, 4, 8, 13, 17, 21, ... the sixth one without uplink triggers
        let fns: Vec<u32> = inds.iter().map(|i| i.fn_num).collect();
        assert_eq!(fns, vec![21, 26, 30, 34, 39]);
        assert!(inds.iter().all(|i| i.chan_nr == 0x09 && i.data == vec![0; FR_BYTES]));
        assert_eq!(s.ts_state(1).chans[TrxChan::TchF.index()].lost_frames, 5);
    }
}
