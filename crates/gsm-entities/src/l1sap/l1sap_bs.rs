use std::collections::{HashMap, VecDeque};

use gsm_config::SharedConfig;
use gsm_core::chan_nr::*;
use gsm_core::{GsmEntity, GsmTime, PhysChanConfig, Sap, GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING, NUM_TIMESLOTS};
use gsm_saps::control::amr_conf::{AmrMultirateConf, AmrParseErr};
use gsm_saps::control::enums::chan_mode::{ConnFailCause, RslCmode, TchMode};
use gsm_saps::control::sched::{AmrModeSet, SchedCmd, SchedCmdConf};
use gsm_saps::mph::{MeasInd, MphInfo};
use gsm_saps::ph::{PhDataInd, PhDataReq, PhRachInd, PhRtsInd, PresenceInfo, TchInd, TchReq, TchRtsInd};
use gsm_saps::rsl::{LchanParams, NackCause, RslMsg};
use gsm_saps::{SapMsg, SapMsgInner};

use crate::l1sched::chan_desc::TrxChan;
use crate::l1sched::mframe::resolve;
use crate::{GsmEntityTrait, MessageQueue};

use super::components::amr::parse_mr_conf;
use super::components::cbch::CbchSegmenter;
use super::components::ciphering::CiphState;
use super::components::handover::{phys_info_block, HoState, HoTimeout};
use super::components::lchan::{fill_frame, Lchan, PendingOp};
use super::components::measurement::{expected_samples, is_period_end, is_sub, MeasSample};
use super::components::sysinfo::SiSelector;
use super::components::timer::{ms_to_frames, TimerQueue};

/// Earliest accepted access burst, in 1/256 symbol periods
const RACH_MIN_TOA256: i16 = -2 * 256;

/// Immediate assignments waiting for a CCCH block
const MAX_AGCH_QUEUE: usize = 32;

/// L2 part of a SACCH block, after the two byte L1 header
const SACCH_L2_LEN: usize = GSM_MACBLOCK_LEN - 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LchanTimer {
    T3105(u8),
}

/// Upper edge of layer 1: answers ready-to-send indications, supervises the
/// dedicated channels and talks to the control plane via RSL primitives.
pub struct L1sapBs {
    config: SharedConfig,
    dltime: GsmTime,
    /// Frame number of the last time indication
    fn_num: u32,
    pchans: [PhysChanConfig; NUM_TIMESLOTS],

    pub si: SiSelector,
    pub cbch: CbchSegmenter,
    agch: VecDeque<Vec<u8>>,
    pub lchans: HashMap<u8, Lchan>,
    timers: TimerQueue<LchanTimer>,
}

fn new_msg(sap: Sap, dest: GsmEntity, dltime: GsmTime, msg: SapMsgInner) -> SapMsg {
    SapMsg::new(sap, GsmEntity::L1sap, dest, dltime, msg)
}

fn to_sched(dltime: GsmTime, cmd: SchedCmd) -> SapMsg {
    new_msg(Sap::Control, GsmEntity::L1sched, dltime, SapMsgInner::SchedCmd(cmd))
}

fn to_rsl(dltime: GsmTime, msg: RslMsg) -> SapMsg {
    new_msg(Sap::RslSap, GsmEntity::Rsl, dltime, SapMsgInner::Rsl(msg))
}

/// Channel number a scheduler command refers to
fn cmd_chan_nr(cmd: &SchedCmd) -> Option<u8> {
    match cmd {
        SchedCmd::SetLchan { chan_nr, .. }
        | SchedCmd::SetMode { chan_nr, .. }
        | SchedCmd::SetCipher { chan_nr, .. }
        | SchedCmd::SetRachDetect { chan_nr, .. } => Some(*chan_nr),
        SchedCmd::SetPchan { .. } | SchedCmd::Reset => None,
    }
}

fn is_ptcch(tn: u8, fn_num: u32) -> bool {
    resolve(PhysChanConfig::Pdch, tn, fn_num).is_some_and(|((dl, _), _)| dl == TrxChan::Ptcch)
}

/// Parses the MultiRate configuration when the mode requires one
fn amr_conf_for(
    rsl_cmode: RslCmode,
    tch_mode: TchMode,
    mr_conf: Option<&[u8]>,
) -> Result<Option<AmrMultirateConf>, AmrParseErr> {
    if rsl_cmode != RslCmode::Speech || tch_mode != TchMode::SpeechAmr {
        return Ok(None);
    }
    let bytes = mr_conf.unwrap_or_default();
    parse_mr_conf(bytes).map(Some)
}

fn set_mode_cmd(lchan: &Lchan, handover: bool) -> SchedCmd {
    SchedCmd::SetMode {
        chan_nr: lchan.chan_nr,
        rsl_cmode: lchan.rsl_cmode,
        tch_mode: lchan.tch_mode,
        amr: lchan.mr_conf.map(|conf| AmrModeSet { initial_id: conf.initial_index(), conf }),
        handover,
    }
}

impl L1sapBs {
    pub fn new(config: SharedConfig) -> Self {
        let c = config.config();
        let si = SiSelector::from_config(&c.sysinfo);
        let pchans = c.timeslots;
        Self {
            config,
            dltime: GsmTime::default(),
            fn_num: 0,
            pchans,
            si,
            cbch: CbchSegmenter::new(),
            agch: VecDeque::new(),
            lchans: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    fn has_cbch(&self) -> bool {
        self.pchans.iter().any(|p| p.has_cbch())
    }

    // ---------------------------------------------------------------
    // PH-SAP
    // ---------------------------------------------------------------

    fn rx_ph_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::PhRtsInd(rts) => self.rx_ph_rts_ind(queue, rts),
            SapMsgInner::TchRtsInd(rts) => self.rx_tch_rts_ind(queue, rts),
            SapMsgInner::PhDataInd(ind) => self.rx_ph_data_ind(queue, ind),
            SapMsgInner::TchInd(ind) => self.rx_tch_ind(queue, ind),
            SapMsgInner::PhRachInd(ind) => self.rx_ph_rach_ind(queue, ind),
            other => {
                tracing::warn!("rx_ph_prim: unexpected {}", other);
            }
        }
    }

    fn rx_ph_rts_ind(&mut self, queue: &mut MessageQueue, rts: PhRtsInd) {
        let chan_nr = rts.chan_nr;
        let data = if chan_is_pdch(chan_nr) {
            self.rts_pdch(&rts)
        } else if chan_is_bcch(chan_nr) {
            let block = self.si.bcch_block(rts.fn_num).map(|b| b.to_vec());
            Some(block.unwrap_or_else(|| fill_frame().to_vec()))
        } else if chan_is_cbch(chan_nr) {
            Some(self.cbch.next_block(rts.fn_num).to_vec())
        } else if chan_is_pch_agch(chan_nr) {
            Some(self.agch.pop_front().unwrap_or_else(|| fill_frame().to_vec()))
        } else if chan_is_dedicated(chan_nr) {
            self.rts_dedicated(queue, &rts)
        } else {
            tracing::warn!(fn_num = rts.fn_num, "PH-RTS.ind for unknown chan_nr {:#04x}", chan_nr);
            None
        };

        let Some(data) = data else {
            return;
        };
        tracing::trace!(fn_num = rts.fn_num, "-> PH-DATA.req chan_nr {:#04x} link_id {:#04x}", chan_nr, rts.link_id);
        let req = PhDataReq { chan_nr, link_id: rts.link_id, fn_num: rts.fn_num, data };
        queue.push_back(new_msg(Sap::PhSap, GsmEntity::L1sched, self.dltime, SapMsgInner::PhDataReq(req)));
    }

    /// Packet data is only served in loopback mode, there is no packet control unit
    fn rts_pdch(&mut self, rts: &PhRtsInd) -> Option<Vec<u8>> {
        let lchan = self.lchans.get_mut(&rts.chan_nr)?;
        if !lchan.loopback || is_ptcch(chan_nr_tn(rts.chan_nr), rts.fn_num) {
            return None;
        }
        match lchan.dl_tch.pop_front() {
            Some(block) => Some(block),
            None => {
                tracing::debug!(fn_num = rts.fn_num, "chan_nr {:#04x}: no looped PDTCH block, sending empty", rts.chan_nr);
                Some(vec![0; GSM_MACBLOCK_LEN])
            }
        }
    }

    fn rts_dedicated(&mut self, queue: &mut MessageQueue, rts: &PhRtsInd) -> Option<Vec<u8>> {
        let Some(lchan) = self.lchans.get_mut(&rts.chan_nr) else {
            tracing::debug!(fn_num = rts.fn_num, "PH-RTS.ind for inactive chan_nr {:#04x}", rts.chan_nr);
            return None;
        };

        if link_is_sacch(rts.link_id) {
            let mut block = Vec::with_capacity(GSM_MACBLOCK_LEN);
            block.push(lchan.ms_power);
            block.push(lchan.ta);
            if let Some(l2) = lchan.dl_sacch.pop_front() {
                block.extend_from_slice(&l2);
            } else if let Some(si) = self.si.sacch_type(&mut lchan.sacch_si_cnt).and_then(|t| self.si.get(t)) {
                // SACCH filling is stored as an L2 frame
                block.extend_from_slice(&si[..SACCH_L2_LEN]);
            } else {
                block.extend_from_slice(&fill_frame()[2..]);
            }
            block.resize(GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING);
            return Some(block);
        }

        match lchan.dl_dcch.pop_front() {
            Some(block) => {
                if lchan.ciph.check_dl(&block) {
                    tracing::info!("chan_nr {:#04x}: CIPHERING MODE COMMAND sent, enabling uplink deciphering", lchan.chan_nr);
                    queue.push_back(to_sched(self.dltime, SchedCmd::SetCipher {
                        chan_nr: lchan.chan_nr,
                        downlink: false,
                        algo: lchan.ciph.algo,
                        key: lchan.ciph.key.clone(),
                    }));
                }
                Some(block)
            }
            // FACCH is only sent when there is something to steal for
            None if lchan.is_tch_active() => None,
            None => Some(fill_frame().to_vec()),
        }
    }

    fn rx_tch_rts_ind(&mut self, queue: &mut MessageQueue, rts: TchRtsInd) {
        let Some(lchan) = self.lchans.get_mut(&rts.chan_nr) else {
            tracing::debug!(fn_num = rts.fn_num, "TCH-RTS.ind for inactive chan_nr {:#04x}", rts.chan_nr);
            return;
        };
        let Some(data) = lchan.dl_tch.pop_front() else {
            return;
        };
        let req = TchReq { chan_nr: rts.chan_nr, fn_num: rts.fn_num, data };
        queue.push_back(new_msg(Sap::PhSap, GsmEntity::L1sched, self.dltime, SapMsgInner::TchReq(req)));
    }

    fn rx_ph_data_ind(&mut self, queue: &mut MessageQueue, ind: PhDataInd) {
        let chan_nr = ind.chan_nr;
        tracing::trace!(fn_num = ind.fn_num, "<- PH-DATA.ind chan_nr {:#04x} link_id {:#04x} len {}", chan_nr, ind.link_id, ind.data.len());

        if chan_is_pdch(chan_nr) {
            let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
                return;
            };
            let tn = chan_nr_tn(chan_nr);
            if lchan.loopback && !is_ptcch(tn, ind.fn_num) && ind.presence == PresenceInfo::Valid && !ind.data.is_empty() {
                lchan.enqueue_tch(ind.data);
            }
            return;
        }

        if !chan_is_dedicated(chan_nr) {
            tracing::warn!("PH-DATA.ind on non-dedicated chan_nr {:#04x}", chan_nr);
            return;
        }
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            tracing::debug!("PH-DATA.ind for inactive chan_nr {:#04x}", chan_nr);
            return;
        };
        let sacch = link_is_sacch(ind.link_id);

        if ind.data.is_empty() {
            if sacch && lchan.radio_link.input(true) {
                tracing::error!("chan_nr {:#04x}: radio link timeout", chan_nr);
                queue.push_back(to_rsl(self.dltime, RslMsg::ConnFailInd { chan_nr, cause: ConnFailCause::RadioLinkFail }));
            }
            return;
        }

        if lchan.ho.on_frame() {
            tracing::info!("chan_nr {:#04x}: first frame after handover access, stopping T3105", chan_nr);
            self.timers.cancel(LchanTimer::T3105(chan_nr));
        }

        let data = if sacch {
            lchan.radio_link.input(false);
            if ind.data.len() < 2 {
                return;
            }
            lchan.ul_l1_hdr = [ind.data[0], ind.data[1]];
            ind.data[2..].to_vec()
        } else {
            if lchan.ciph.check_ul(&ind.data) {
                tracing::info!("chan_nr {:#04x}: first ciphered uplink frame, enabling downlink enciphering", chan_nr);
                queue.push_back(to_sched(self.dltime, SchedCmd::SetCipher {
                    chan_nr,
                    downlink: true,
                    algo: lchan.ciph.algo,
                    key: lchan.ciph.key.clone(),
                }));
            }
            ind.data
        };
        queue.push_back(to_rsl(self.dltime, RslMsg::DataInd { chan_nr, link_id: ind.link_id, data }));
    }

    fn rx_tch_ind(&mut self, queue: &mut MessageQueue, ind: TchInd) {
        let Some(lchan) = self.lchans.get_mut(&ind.chan_nr) else {
            tracing::debug!(fn_num = ind.fn_num, "TCH.ind for inactive chan_nr {:#04x}", ind.chan_nr);
            return;
        };
        if ind.data.is_empty() {
            return;
        }
        if lchan.loopback {
            lchan.enqueue_tch(ind.data);
            return;
        }
        queue.push_back(to_rsl(self.dltime, RslMsg::TchInd { chan_nr: ind.chan_nr, data: ind.data }));
    }

    fn rach_passes_filter(&self, ind: &PhRachInd) -> bool {
        let c = self.config.config();
        if ind.ber10k as u32 > c.bts.max_ber10k_rach {
            tracing::debug!(fn_num = ind.fn_num, "ignoring access burst, ber10k {} above {}", ind.ber10k, c.bts.max_ber10k_rach);
            return false;
        }
        let max_toa256 = c.bts.max_ta as i16 * 256;
        if ind.toa256 < RACH_MIN_TOA256 || ind.toa256 > max_toa256 {
            tracing::debug!(fn_num = ind.fn_num, "ignoring access burst, toa256 {} outside {}..={}", ind.toa256, RACH_MIN_TOA256, max_toa256);
            return false;
        }
        true
    }

    fn rx_ph_rach_ind(&mut self, queue: &mut MessageQueue, ind: PhRachInd) {
        if chan_is_dedicated(ind.chan_nr) {
            return self.rx_ho_rach(queue, ind);
        }

        let busy_threshold = self.config.config().bts.rach_busy_threshold;
        if ind.rssi >= busy_threshold {
            self.config.state_write().rach_busy += 1;
        }
        if !self.rach_passes_filter(&ind) {
            return;
        }
        self.config.state_write().rach_access += 1;

        tracing::info!(fn_num = ind.fn_num, "RACH ra {:#04x} acc_delay {}", ind.ra, ind.acc_delay);
        queue.push_back(to_rsl(self.dltime, RslMsg::ChanRqd { ra: ind.ra, fn_num: ind.fn_num, acc_delay: ind.acc_delay }));
    }

    fn rx_ho_rach(&mut self, queue: &mut MessageQueue, ind: PhRachInd) {
        if !self.rach_passes_filter(&ind) {
            return;
        }
        let chan_nr = ind.chan_nr;
        let c = self.config.config();
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            tracing::debug!("handover access burst on inactive chan_nr {:#04x}", chan_nr);
            return;
        };
        if !lchan.ho.on_rach(ind.ra) {
            return;
        }
        tracing::info!(fn_num = ind.fn_num, "chan_nr {:#04x}: handover access, acc_delay {}", chan_nr, ind.acc_delay);

        lchan.ta = ind.acc_delay.min(c.bts.max_ta);
        queue.push_back(to_sched(self.dltime, SchedCmd::SetRachDetect { chan_nr, on: false }));
        queue.push_back(to_rsl(self.dltime, RslMsg::HandoverDetect { chan_nr, acc_delay: ind.acc_delay }));

        lchan.enqueue_dcch(phys_info_block(lchan.ta).to_vec());
        self.timers.start(LchanTimer::T3105(chan_nr), self.fn_num, ms_to_frames(c.bts.t3105_ms));
    }

    // ---------------------------------------------------------------
    // MPH-SAP
    // ---------------------------------------------------------------

    fn rx_mph_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::MphInfo(info) = message.msg else {
            tracing::warn!("rx_mph_prim: unexpected {}", message.msg);
            return;
        };
        match info {
            MphInfo::TimeInd { fn_num } => self.rx_time_ind(queue, fn_num),
            MphInfo::MeasInd(meas) => self.rx_meas_ind(queue, meas),
            MphInfo::LoopUpdate { chan_nr, power_step, ta_step } => {
                let max_ta = self.config.config().bts.max_ta;
                let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
                    return;
                };
                lchan.ms_power = (lchan.ms_power as i16 + power_step as i16).clamp(0, 31) as u8;
                lchan.ta = (lchan.ta as i16 + ta_step as i16).clamp(0, max_ta as i16) as u8;
                tracing::debug!("chan_nr {:#04x}: ms_power {} ta {}", chan_nr, lchan.ms_power, lchan.ta);
            }
        }
    }

    fn rx_time_ind(&mut self, queue: &mut MessageQueue, fn_num: u32) {
        self.fn_num = fn_num;

        let rach_slot = resolve(self.pchans[0], 0, fn_num).is_some_and(|(_, (ul, _))| ul == TrxChan::Rach);
        if rach_slot {
            self.config.state_write().rach_total += 1;
        }

        for timer in self.timers.expire(fn_num) {
            self.on_timer(queue, timer);
        }
    }

    fn on_timer(&mut self, queue: &mut MessageQueue, timer: LchanTimer) {
        match timer {
            LchanTimer::T3105(chan_nr) => {
                let c = self.config.config();
                let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
                    return;
                };
                if lchan.ho.state != HoState::WaitFrame {
                    return;
                }
                match lchan.ho.on_t3105(c.bts.ny1) {
                    HoTimeout::Repeat => {
                        tracing::debug!("chan_nr {:#04x}: T3105 expired, PHYS INFO #{}", chan_nr, lchan.ho.phys_info_count);
                        lchan.enqueue_dcch(phys_info_block(lchan.ta).to_vec());
                        self.timers.start(timer, self.fn_num, ms_to_frames(c.bts.t3105_ms));
                    }
                    HoTimeout::Fail => {
                        tracing::error!("chan_nr {:#04x}: no frame after {} PHYS INFO, handover failed", chan_nr, c.bts.ny1);
                        queue.push_back(to_rsl(self.dltime, RslMsg::ConnFailInd { chan_nr, cause: ConnFailCause::HandoverAccFail }));
                    }
                }
            }
        }
    }

    fn rx_meas_ind(&mut self, queue: &mut MessageQueue, meas: MeasInd) {
        let chan_nr = meas.chan_nr;
        if !chan_is_dedicated(chan_nr) {
            return;
        }
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            return;
        };
        let (tn, ss) = (lchan.tn(), lchan.ss());
        let pchan = self.pchans[tn as usize];

        lchan.meas.add(MeasSample {
            ber10k: meas.ber10k,
            inv_rssi: meas.inv_rssi,
            toa256: meas.ta_offs_256bits,
            is_sub: is_sub(pchan, tn, ss, lchan.tch_mode, meas.fn_num),
        });
        if !is_period_end(pchan, tn, ss, meas.fn_num) {
            return;
        }
        let Some(mut result) = lchan.meas.compute(expected_samples(pchan)) else {
            return;
        };
        result.ms_power = lchan.ms_power;
        result.ta = lchan.ta;
        tracing::debug!(fn_num = meas.fn_num, "chan_nr {:#04x}: {:?}", chan_nr, result);
        queue.push_back(to_rsl(self.dltime, RslMsg::MeasResult { chan_nr, meas: result }));
    }

    // ---------------------------------------------------------------
    // Control: scheduler confirmations
    // ---------------------------------------------------------------

    fn rx_control_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::SchedCmdConf(SchedCmdConf { cmd, result }) = message.msg else {
            tracing::warn!("rx_control_prim: unexpected {}", message.msg);
            return;
        };
        let Some(chan_nr) = cmd_chan_nr(&cmd) else {
            tracing::debug!("{:?}: {:?}", cmd, result);
            return;
        };
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            tracing::trace!("confirmation for released chan_nr {:#04x}: {:?}", chan_nr, result);
            return;
        };

        if let (SchedCmd::SetCipher { downlink, .. }, Ok(())) = (&cmd, &result) {
            lchan.ciph.confirm(*downlink);
        }
        let Some((op, result)) = lchan.confirm_pending(result) else {
            return;
        };

        match (op, result) {
            (PendingOp::Activation, Ok(())) => {
                tracing::info!("chan_nr {:#04x}: activated", chan_nr);
                queue.push_back(to_rsl(self.dltime, RslMsg::ChanActivAck { chan_nr }));
            }
            (PendingOp::Activation, Err(e)) => {
                tracing::warn!("chan_nr {:#04x}: activation failed: {}", chan_nr, e);
                let lchan = self.lchans.remove(&chan_nr);
                self.timers.cancel(LchanTimer::T3105(chan_nr));
                if let Some(lchan) = lchan {
                    for cmd in Self::release_cmds(&lchan) {
                        queue.push_back(to_sched(self.dltime, cmd));
                    }
                }
                queue.push_back(to_rsl(self.dltime, RslMsg::ChanActivNack { chan_nr, cause: NackCause::Sched(e) }));
            }
            (PendingOp::Release, result) => {
                if let Err(e) = result {
                    tracing::warn!("chan_nr {:#04x}: release: {}", chan_nr, e);
                }
                self.lchans.remove(&chan_nr);
                tracing::info!("chan_nr {:#04x}: released", chan_nr);
                queue.push_back(to_rsl(self.dltime, RslMsg::RfChanRelAck { chan_nr }));
            }
            (PendingOp::ModeModify, Ok(())) => {
                queue.push_back(to_rsl(self.dltime, RslMsg::ModeModifyAck { chan_nr }));
            }
            (PendingOp::ModeModify, Err(e)) => {
                tracing::warn!("chan_nr {:#04x}: mode modify failed: {}", chan_nr, e);
                queue.push_back(to_rsl(self.dltime, RslMsg::ModeModifyNack { chan_nr, cause: NackCause::Sched(e) }));
            }
        }
    }

    fn release_cmds(lchan: &Lchan) -> Vec<SchedCmd> {
        let chan_nr = lchan.chan_nr;
        let mut cmds = vec![SchedCmd::SetLchan { chan_nr, link_id: LID_DEDIC, active: false }];
        if !chan_is_pdch(chan_nr) {
            cmds.push(SchedCmd::SetLchan { chan_nr, link_id: LID_SACCH, active: false });
        }
        cmds
    }

    // ---------------------------------------------------------------
    // RSL
    // ---------------------------------------------------------------

    fn rx_rsl_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::Rsl(msg) = message.msg else {
            tracing::warn!("rx_rsl_prim: unexpected {}", message.msg);
            return;
        };
        tracing::debug!("<- RSL {}", msg.name());
        match msg {
            RslMsg::ChanActiv { chan_nr, params } => self.rx_chan_activ(queue, chan_nr, params),
            RslMsg::RfChanRel { chan_nr } => self.rx_rf_chan_rel(queue, chan_nr),
            RslMsg::ModeModify { chan_nr, rsl_cmode, tch_mode, mr_conf } => {
                self.rx_mode_modify(queue, chan_nr, rsl_cmode, tch_mode, mr_conf)
            }
            RslMsg::EncrCmd { chan_nr, algo, key } => {
                let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
                    tracing::warn!("ENCRYPTION COMMAND for inactive chan_nr {:#04x}", chan_nr);
                    return;
                };
                tracing::info!("chan_nr {:#04x}: key for A5/{} stored", chan_nr, algo);
                lchan.ciph.set_key(algo, key);
            }
            RslMsg::DataReq { chan_nr, link_id, data } => self.rx_data_req(chan_nr, link_id, data),
            RslMsg::TchReq { chan_nr, data } => {
                let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
                    tracing::debug!("traffic frame for inactive chan_nr {:#04x}", chan_nr);
                    return;
                };
                // Looped channels only transmit what they receive
                if !lchan.loopback {
                    lchan.enqueue_tch(data);
                }
            }
            RslMsg::SmsBcCmd { last_block, data } => {
                let reason = if !self.has_cbch() {
                    Some("no CBCH configured".to_string())
                } else {
                    self.cbch.enqueue(last_block, &data).err().map(|e| e.to_string())
                };
                if let Some(reason) = reason {
                    tracing::warn!("SMS BROADCAST COMMAND rejected: {}", reason);
                    queue.push_back(to_rsl(self.dltime, RslMsg::SmsBcReject { reason }));
                }
            }
            RslMsg::AgchEnqueue { data } => {
                if data.len() != GSM_MACBLOCK_LEN {
                    tracing::warn!("dropping AGCH block of {} bytes", data.len());
                    return;
                }
                if self.agch.len() >= MAX_AGCH_QUEUE {
                    tracing::warn!("AGCH queue full, dropping oldest block");
                    self.agch.pop_front();
                }
                self.agch.push_back(data);
            }
            RslMsg::SetSysinfo { si, data } => {
                let len = data.as_ref().map(|d| d.len());
                if !self.si.set(si, data) {
                    tracing::warn!("{:?}: ignoring buffer of {:?} bytes", si, len);
                } else {
                    tracing::info!("{:?} {}", si, if len.is_some() { "updated" } else { "removed" });
                }
            }
            other => {
                tracing::warn!("rx_rsl_prim: {} not handled in this direction", other.name());
            }
        }
    }

    fn rx_chan_activ(&mut self, queue: &mut MessageQueue, chan_nr: u8, params: LchanParams) {
        if self.lchans.contains_key(&chan_nr) {
            tracing::warn!("chan_nr {:#04x}: already active", chan_nr);
            queue.push_back(to_rsl(self.dltime, RslMsg::ChanActivNack { chan_nr, cause: NackCause::AlreadyActive }));
            return;
        }
        let mr_conf = match amr_conf_for(params.rsl_cmode, params.tch_mode, params.mr_conf.as_deref()) {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!("chan_nr {:#04x}: bad MultiRate configuration: {}", chan_nr, e);
                queue.push_back(to_rsl(self.dltime, RslMsg::ChanActivNack { chan_nr, cause: NackCause::MrConf(e) }));
                return;
            }
        };

        let c = self.config.config();
        let mut lchan = Lchan::new(chan_nr, &params, c.bts.radio_link_timeout);
        lchan.mr_conf = mr_conf;
        lchan.ms_power = params.ms_power.min(31);
        lchan.ta = params.ta.min(c.bts.max_ta);

        let mut cmds = vec![SchedCmd::SetLchan { chan_nr, link_id: LID_DEDIC, active: true }];
        if !chan_is_pdch(chan_nr) {
            cmds.push(SchedCmd::SetLchan { chan_nr, link_id: LID_SACCH, active: true });
            if let Some((algo, key)) = params.encr {
                lchan.ciph.set_key(algo, key.clone());
                if algo != 0 {
                    lchan.ciph.state = CiphState::RxTxReq;
                    cmds.push(SchedCmd::SetCipher { chan_nr, downlink: false, algo, key: key.clone() });
                    cmds.push(SchedCmd::SetCipher { chan_nr, downlink: true, algo, key });
                }
            }
            if let Some(ho_ref) = params.ho_ref {
                lchan.ho.enable(ho_ref);
            }
            cmds.push(set_mode_cmd(&lchan, params.ho_ref.is_some()));
        }
        tracing::info!("chan_nr {:#04x}: activating {:?}/{:?}", chan_nr, lchan.rsl_cmode, lchan.tch_mode);

        lchan.start_pending(PendingOp::Activation, cmds.len());
        self.lchans.insert(chan_nr, lchan);
        for cmd in cmds {
            queue.push_back(to_sched(self.dltime, cmd));
        }
    }

    fn rx_rf_chan_rel(&mut self, queue: &mut MessageQueue, chan_nr: u8) {
        self.timers.cancel(LchanTimer::T3105(chan_nr));
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            tracing::info!("chan_nr {:#04x}: release of inactive channel", chan_nr);
            queue.push_back(to_rsl(self.dltime, RslMsg::RfChanRelAck { chan_nr }));
            return;
        };
        if let Some(pending) = lchan.pending {
            tracing::warn!("chan_nr {:#04x}: release interrupts {:?}", chan_nr, pending.op);
        }
        lchan.dl_dcch.clear();
        lchan.dl_sacch.clear();
        lchan.dl_tch.clear();
        lchan.ho.reset();

        let cmds = Self::release_cmds(lchan);
        lchan.start_pending(PendingOp::Release, cmds.len());
        for cmd in cmds {
            queue.push_back(to_sched(self.dltime, cmd));
        }
    }

    fn rx_mode_modify(
        &mut self,
        queue: &mut MessageQueue,
        chan_nr: u8,
        rsl_cmode: RslCmode,
        tch_mode: TchMode,
        mr_conf: Option<Vec<u8>>,
    ) {
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            queue.push_back(to_rsl(self.dltime, RslMsg::ModeModifyNack { chan_nr, cause: NackCause::NotActive }));
            return;
        };
        let mr_conf = match amr_conf_for(rsl_cmode, tch_mode, mr_conf.as_deref()) {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!("chan_nr {:#04x}: bad MultiRate configuration: {}", chan_nr, e);
                queue.push_back(to_rsl(self.dltime, RslMsg::ModeModifyNack { chan_nr, cause: NackCause::MrConf(e) }));
                return;
            }
        };
        lchan.rsl_cmode = rsl_cmode;
        lchan.tch_mode = tch_mode;
        lchan.mr_conf = mr_conf;
        if !lchan.is_tch_active() {
            lchan.dl_tch.clear();
        }

        let cmd = set_mode_cmd(lchan, lchan.ho.state == HoState::Enabled);
        lchan.start_pending(PendingOp::ModeModify, 1);
        queue.push_back(to_sched(self.dltime, cmd));
    }

    fn rx_data_req(&mut self, chan_nr: u8, link_id: u8, mut data: Vec<u8>) {
        let Some(lchan) = self.lchans.get_mut(&chan_nr) else {
            tracing::warn!("DATA REQUEST for inactive chan_nr {:#04x}", chan_nr);
            return;
        };
        if link_is_sacch(link_id) {
            if data.len() > SACCH_L2_LEN {
                tracing::warn!("chan_nr {:#04x}: dropping SACCH frame of {} bytes", chan_nr, data.len());
                return;
            }
            data.resize(SACCH_L2_LEN, GSM_MACBLOCK_PADDING);
            lchan.enqueue_sacch(data);
        } else {
            if data.len() > GSM_MACBLOCK_LEN {
                tracing::warn!("chan_nr {:#04x}: dropping DCCH frame of {} bytes", chan_nr, data.len());
                return;
            }
            data.resize(GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING);
            lchan.enqueue_dcch(data);
        }
    }
}

impl GsmEntityTrait for L1sapBs {
    fn entity(&self) -> GsmEntity {
        GsmEntity::L1sap
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::trace!("rx_prim: {} from {:?}", message.msg, message.src);

        match message.sap {
            Sap::PhSap => self.rx_ph_prim(queue, message),
            Sap::MphSap => self.rx_mph_prim(queue, message),
            Sap::Control => self.rx_control_prim(queue, message),
            Sap::RslSap => self.rx_rsl_prim(queue, message),
            _ => {
                tracing::warn!("rx_prim: unexpected sap {:?}", message.sap);
            }
        }
    }

    fn tick_start(&mut self, _queue: &mut MessageQueue, ts: GsmTime) {
        self.dltime = ts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsm_config::{PhyBackend, StackConfig};
    use gsm_core::SysinfoType;
    use gsm_saps::control::sched::SchedError;

    fn test_config() -> SharedConfig {
        let mut cfg = StackConfig::new(7);
        cfg.phy_io.backend = PhyBackend::None;
        cfg.bts.radio_link_timeout = 2;
        cfg.bts.ny1 = 2;
        cfg.timeslots[1] = PhysChanConfig::TchF;
        cfg.timeslots[2] = PhysChanConfig::Pdch;
        SharedConfig::from_config(cfg)
    }

    fn drain(queue: &mut MessageQueue) -> Vec<SapMsg> {
        let mut out = Vec::new();
        while let Some(m) = queue.pop_front() {
            out.push(m);
        }
        out
    }

    fn rsl(msg: RslMsg) -> SapMsg {
        SapMsg::new(Sap::RslSap, GsmEntity::Rsl, GsmEntity::L1sap, GsmTime::default(), SapMsgInner::Rsl(msg))
    }

    fn ph(msg: SapMsgInner) -> SapMsg {
        SapMsg::new(Sap::PhSap, GsmEntity::L1sched, GsmEntity::L1sap, GsmTime::default(), msg)
    }

    fn mph(info: MphInfo) -> SapMsg {
        SapMsg::new(Sap::MphSap, GsmEntity::L1sched, GsmEntity::L1sap, GsmTime::default(), SapMsgInner::MphInfo(info))
    }

    /// Confirms every scheduler command in `msgs` with `result`, returns everything else
    fn confirm_all(l1sap: &mut L1sapBs, queue: &mut MessageQueue, msgs: Vec<SapMsg>, result: Result<(), SchedError>) -> Vec<RslMsg> {
        let mut rsl_out = Vec::new();
        for m in msgs {
            match m.msg {
                SapMsgInner::SchedCmd(cmd) => {
                    let conf = SapMsg::new(Sap::Control, GsmEntity::L1sched, GsmEntity::L1sap, GsmTime::default(),
                        SapMsgInner::SchedCmdConf(SchedCmdConf { cmd, result }));
                    l1sap.rx_prim(queue, conf);
                }
                SapMsgInner::Rsl(r) => rsl_out.push(r),
                _ => {}
            }
        }
        for m in drain(queue) {
            if let SapMsgInner::Rsl(r) = m.msg {
                rsl_out.push(r);
            }
        }
        rsl_out
    }

    fn activate(l1sap: &mut L1sapBs, chan_nr: u8, params: LchanParams) -> Vec<RslMsg> {
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::ChanActiv { chan_nr, params }));
        let msgs = drain(&mut queue);
        confirm_all(l1sap, &mut queue, msgs, Ok(()))
    }

    fn rts(l1sap: &mut L1sapBs, chan_nr: u8, link_id: u8, fn_num: u32) -> Option<Vec<u8>> {
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRtsInd(PhRtsInd { chan_nr, link_id, fn_num })));
        drain(&mut queue).into_iter().find_map(|m| match m.msg {
            SapMsgInner::PhDataReq(req) => Some(req.data),
            _ => None,
        })
    }

    #[test]
    fn test_activation_ack_and_release() {
        let mut l1sap = L1sapBs::new(test_config());
        let out = activate(&mut l1sap, 0x09, LchanParams::default());
        assert_eq!(out, vec![RslMsg::ChanActivAck { chan_nr: 0x09 }]);

        let out = activate(&mut l1sap, 0x09, LchanParams::default());
        assert_eq!(out, vec![RslMsg::ChanActivNack { chan_nr: 0x09, cause: NackCause::AlreadyActive }]);

        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::RfChanRel { chan_nr: 0x09 }));
        let msgs = drain(&mut queue);
        assert_eq!(msgs.len(), 2);
        let out = confirm_all(&mut l1sap, &mut queue, msgs, Ok(()));
        assert_eq!(out, vec![RslMsg::RfChanRelAck { chan_nr: 0x09 }]);
        assert!(l1sap.lchans.is_empty());
    }

    #[test]
    fn test_activation_nack_from_scheduler() {
        let mut l1sap = L1sapBs::new(test_config());
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::ChanActiv { chan_nr: 0x0b, params: LchanParams::default() }));
        let msgs = drain(&mut queue);
        let out = confirm_all(&mut l1sap, &mut queue, msgs, Err(SchedError::NotConfigured));
        assert_eq!(out, vec![RslMsg::ChanActivNack { chan_nr: 0x0b, cause: NackCause::Sched(SchedError::NotConfigured) }]);
        assert!(l1sap.lchans.is_empty());
    }

    #[test]
    fn test_amr_activation_needs_mr_conf() {
        let mut l1sap = L1sapBs::new(test_config());
        let params = LchanParams { rsl_cmode: RslCmode::Speech, tch_mode: TchMode::SpeechAmr, ..Default::default() };
        let out = activate(&mut l1sap, 0x09, params);
        assert!(matches!(out[..], [RslMsg::ChanActivNack { cause: NackCause::MrConf(_), .. }]));

        let params = LchanParams {
            rsl_cmode: RslCmode::Speech,
            tch_mode: TchMode::SpeechAmr,
            mr_conf: Some(vec![0x30, 0x80]),
            ..Default::default()
        };
        let out = activate(&mut l1sap, 0x09, params);
        assert_eq!(out, vec![RslMsg::ChanActivAck { chan_nr: 0x09 }]);
        assert_eq!(l1sap.lchans[&0x09].mr_conf.map(|c| c.num_modes), Some(1));
    }

    #[test]
    fn test_common_channel_rts() {
        let mut l1sap = L1sapBs::new(test_config());
        let mut si3 = vec![0x49, 0x06, 0x1b];
        si3.resize(GSM_MACBLOCK_LEN, 0x2b);
        l1sap.si.set(SysinfoType::Si3, Some(si3.clone()));

        // TC 2 carries SI3, TC 0 has no SI1 configured
        assert_eq!(rts(&mut l1sap, RSL_CHAN_BCCH, LID_DEDIC, 51 * 2 + 2), Some(si3));
        assert_eq!(rts(&mut l1sap, RSL_CHAN_BCCH, LID_DEDIC, 2), Some(fill_frame().to_vec()));

        let mut queue = MessageQueue::new();
        let agch = vec![0x2d; GSM_MACBLOCK_LEN];
        l1sap.rx_prim(&mut queue, rsl(RslMsg::AgchEnqueue { data: agch.clone() }));
        assert_eq!(rts(&mut l1sap, RSL_CHAN_PCH_AGCH, LID_DEDIC, 6), Some(agch));
        assert_eq!(rts(&mut l1sap, RSL_CHAN_PCH_AGCH, LID_DEDIC, 12), Some(fill_frame().to_vec()));
    }

    #[test]
    fn test_dedicated_rts() {
        let mut l1sap = L1sapBs::new(test_config());
        let params = LchanParams { ms_power: 5, ta: 3, ..Default::default() };
        activate(&mut l1sap, 0x09, params);

        // SACCH: L1 header, then fill frame
        let sacch = rts(&mut l1sap, 0x09, LID_SACCH, 12).unwrap();
        assert_eq!(&sacch[..5], &[5, 3, 0x01, 0x2b, 0x2b]);

        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::DataReq { chan_nr: 0x09, link_id: LID_SACCH, data: vec![0x03, 0x03, 0x05] }));
        let sacch = rts(&mut l1sap, 0x09, LID_SACCH, 38).unwrap();
        assert_eq!(&sacch[..6], &[5, 3, 0x03, 0x03, 0x05, 0x2b]);
        assert_eq!(sacch.len(), GSM_MACBLOCK_LEN);

        // Signalling mode TCH sends fill frames on FACCH
        assert_eq!(rts(&mut l1sap, 0x09, LID_DEDIC, 0), Some(fill_frame().to_vec()));

        // Speech mode sends nothing without a queued frame
        l1sap.lchans.get_mut(&0x09).unwrap().rsl_cmode = RslCmode::Speech;
        assert_eq!(rts(&mut l1sap, 0x09, LID_DEDIC, 4), None);
    }

    #[test]
    fn test_rach_filter_and_counters() {
        let config = test_config();
        let mut l1sap = L1sapBs::new(config.clone());
        let mut queue = MessageQueue::new();
        let good = PhRachInd { chan_nr: RSL_CHAN_RACH, fn_num: 10, ra: 0x23, acc_delay: 1, rssi: -60, ber10k: 0, toa256: 256 };

        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(good)));
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(PhRachInd { ber10k: 5000, ..good })));
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(PhRachInd { toa256: -600, rssi: -100, ..good })));
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(PhRachInd { toa256: 64 * 256, ..good })));

        let rqd: Vec<RslMsg> = drain(&mut queue).into_iter().filter_map(|m| match m.msg {
            SapMsgInner::Rsl(r) => Some(r),
            _ => None,
        }).collect();
        assert_eq!(rqd, vec![RslMsg::ChanRqd { ra: 0x23, fn_num: 10, acc_delay: 1 }]);
        let state = config.state_read();
        assert_eq!(state.rach_access, 1);
        assert_eq!(state.rach_busy, 3);
    }

    #[test]
    fn test_rach_total_counts_ccch_slots() {
        let config = test_config();
        let mut l1sap = L1sapBs::new(config.clone());
        let mut queue = MessageQueue::new();
        for fn_num in 0..51 {
            l1sap.rx_prim(&mut queue, mph(MphInfo::TimeInd { fn_num }));
        }
        // BCCH+SDCCH/4 has 27 RACH slots per 51-multiframe
        assert_eq!(config.state_read().rach_total, 27);
    }

    #[test]
    fn test_radio_link_failure() {
        let mut l1sap = L1sapBs::new(test_config());
        activate(&mut l1sap, 0x09, LchanParams::default());
        let mut queue = MessageQueue::new();
        let lost = PhDataInd {
            chan_nr: 0x09,
            link_id: LID_SACCH,
            fn_num: 12,
            rssi: -110,
            ber10k: 10000,
            ta_offs_256bits: 0,
            lqual_cb: 0,
            presence: PresenceInfo::Invalid,
            data: Vec::new(),
        };
        for _ in 0..3 {
            l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhDataInd(lost.clone())));
        }
        let out: Vec<SapMsg> = drain(&mut queue);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            &out[0].msg,
            SapMsgInner::Rsl(RslMsg::ConnFailInd { chan_nr: 0x09, cause: ConnFailCause::RadioLinkFail })
        ));
    }

    #[test]
    fn test_loop_update_clamps() {
        let mut l1sap = L1sapBs::new(test_config());
        activate(&mut l1sap, 0x09, LchanParams { ms_power: 30, ta: 1, ..Default::default() });
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, mph(MphInfo::LoopUpdate { chan_nr: 0x09, power_step: 1, ta_step: -1 }));
        l1sap.rx_prim(&mut queue, mph(MphInfo::LoopUpdate { chan_nr: 0x09, power_step: 1, ta_step: -1 }));
        let lchan = &l1sap.lchans[&0x09];
        assert_eq!(lchan.ms_power, 31);
        assert_eq!(lchan.ta, 0);
    }

    #[test]
    fn test_handover_timeout() {
        let mut l1sap = L1sapBs::new(test_config());
        activate(&mut l1sap, 0x09, LchanParams { ho_ref: Some(42), ..Default::default() });

        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, mph(MphInfo::TimeInd { fn_num: 100 }));
        let ho_rach = PhRachInd { chan_nr: 0x09, fn_num: 100, ra: 42, acc_delay: 2, rssi: -60, ber10k: 0, toa256: 512 };
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(ho_rach)));
        let out = drain(&mut queue);
        assert!(out.iter().any(|m| matches!(m.msg, SapMsgInner::SchedCmd(SchedCmd::SetRachDetect { on: false, .. }))));
        assert!(out.iter().any(|m| matches!(m.msg, SapMsgInner::Rsl(RslMsg::HandoverDetect { chan_nr: 0x09, acc_delay: 2 }))));
        assert_eq!(l1sap.lchans[&0x09].dl_dcch.len(), 1);

        // ny1 = 2: one repetition, then failure
        let t3105 = ms_to_frames(300);
        l1sap.rx_prim(&mut queue, mph(MphInfo::TimeInd { fn_num: 100 + t3105 }));
        assert!(drain(&mut queue).is_empty());
        assert_eq!(l1sap.lchans[&0x09].dl_dcch.len(), 2);
        l1sap.rx_prim(&mut queue, mph(MphInfo::TimeInd { fn_num: 100 + 2 * t3105 }));
        let out = drain(&mut queue);
        assert!(matches!(
            &out[..],
            [SapMsg { msg: SapMsgInner::Rsl(RslMsg::ConnFailInd { cause: ConnFailCause::HandoverAccFail, .. }), .. }]
        ));
    }

    #[test]
    fn test_handover_ghost_rach_filtered() {
        let mut l1sap = L1sapBs::new(test_config());
        activate(&mut l1sap, 0x09, LchanParams { ho_ref: Some(42), ..Default::default() });

        let mut queue = MessageQueue::new();
        let noise = PhRachInd { chan_nr: 0x09, fn_num: 100, ra: 42, acc_delay: 63, rssi: -60, ber10k: 10000, toa256: -10000 };
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(noise)));
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(PhRachInd { ber10k: 0, ..noise })));
        assert!(drain(&mut queue).is_empty());
        let lchan = &l1sap.lchans[&0x09];
        assert_eq!(lchan.ho.state, HoState::Enabled);
        assert!(lchan.dl_dcch.is_empty());
        assert_eq!(lchan.ta, 0);

        // Same burst with a plausible quality and timing starts the handover
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhRachInd(PhRachInd { ber10k: 0, toa256: 512, acc_delay: 2, ..noise })));
        assert_eq!(l1sap.lchans[&0x09].ho.state, HoState::WaitFrame);
    }

    #[test]
    fn test_tch_loopback() {
        let mut l1sap = L1sapBs::new(test_config());
        let params = LchanParams { rsl_cmode: RslCmode::Speech, tch_mode: TchMode::SpeechV1, loopback: true, ..Default::default() };
        activate(&mut l1sap, 0x09, params);

        let mut queue = MessageQueue::new();
        let frame = vec![0xd5; 33];
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::TchInd(TchInd { chan_nr: 0x09, fn_num: 7, data: frame.clone() })));
        assert!(drain(&mut queue).is_empty());

        l1sap.rx_prim(&mut queue, ph(SapMsgInner::TchRtsInd(TchRtsInd { chan_nr: 0x09, fn_num: 30 })));
        let out = drain(&mut queue);
        assert!(matches!(&out[..], [SapMsg { msg: SapMsgInner::TchReq(TchReq { data, .. }), .. }] if *data == frame));
    }

    #[test]
    fn test_smscb_rejected_without_cbch() {
        let mut l1sap = L1sapBs::new(test_config());
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::SmsBcCmd { last_block: 1, data: vec![1; 22] }));
        let out = drain(&mut queue);
        assert!(matches!(&out[..], [SapMsg { msg: SapMsgInner::Rsl(RslMsg::SmsBcReject { .. }), .. }]));
    }

    #[test]
    fn test_ciphering_start() {
        let mut l1sap = L1sapBs::new(test_config());
        activate(&mut l1sap, 0x20, LchanParams::default());
        let mut queue = MessageQueue::new();
        l1sap.rx_prim(&mut queue, rsl(RslMsg::EncrCmd { chan_nr: 0x20, algo: 1, key: vec![1; 8] }));
        let cmd = vec![0x03, 0x02, 0x0d, 0x06, 0x35, 0x01];
        l1sap.rx_prim(&mut queue, rsl(RslMsg::DataReq { chan_nr: 0x20, link_id: LID_DEDIC, data: cmd }));

        let _ = rts(&mut l1sap, 0x20, LID_DEDIC, 22);
        assert_eq!(l1sap.lchans[&0x20].ciph.state, CiphState::RxReq);
        let conf = SapMsg::new(Sap::Control, GsmEntity::L1sched, GsmEntity::L1sap, GsmTime::default(),
            SapMsgInner::SchedCmdConf(SchedCmdConf {
                cmd: SchedCmd::SetCipher { chan_nr: 0x20, downlink: false, algo: 1, key: vec![1; 8] },
                result: Ok(()),
            }));
        l1sap.rx_prim(&mut queue, conf);
        assert_eq!(l1sap.lchans[&0x20].ciph.state, CiphState::RxConf);

        // I frame with N(R) = N(S) + 1 of the command
        let ind = PhDataInd {
            chan_nr: 0x20,
            link_id: LID_DEDIC,
            fn_num: 37,
            rssi: -60,
            ber10k: 0,
            ta_offs_256bits: 0,
            lqual_cb: 0,
            presence: PresenceInfo::Valid,
            data: vec![0x01, 2 << 5, 0x01],
        };
        l1sap.rx_prim(&mut queue, ph(SapMsgInner::PhDataInd(ind)));
        let out = drain(&mut queue);
        assert!(out.iter().any(|m| matches!(m.msg, SapMsgInner::SchedCmd(SchedCmd::SetCipher { downlink: true, .. }))));
        assert!(out.iter().any(|m| matches!(m.msg, SapMsgInner::Rsl(RslMsg::DataInd { chan_nr: 0x20, .. }))));
    }
}
