use gsm_config::SharedConfig;
use gsm_core::{GsmEntity, GsmTime, PhysChanConfig, Sap, Tn};
use gsm_saps::control::sched::{SchedCmd, SchedCmdConf, SchedError};
use gsm_saps::{SapMsg, SapMsgInner};

use crate::{GsmEntityTrait, MessagePrio, MessageQueue};

use super::cipher::{Keystream, PseudoKeystream};
use super::codec::{ChannelCodec, LoopbackCodec};
use super::queue::DlPrim;
use super::scheduler::{L1Scheduler, SchedParams};

/// Scheduler entity of one transceiver. Sits between the PHY (TRXD SAP) and L1SAP (PH/MPH SAP).
pub struct L1schedBs {
    config: SharedConfig,
    dltime: GsmTime,
    pub sched: L1Scheduler,
}

impl L1schedBs {
    pub fn new(config: SharedConfig) -> Self {
        Self::with_codec(config, Box::new(LoopbackCodec::new()), Box::new(PseudoKeystream))
    }

    pub fn with_codec(config: SharedConfig, codec: Box<dyn ChannelCodec>, keystream: Box<dyn Keystream>) -> Self {
        let c = config.config();
        let params = SchedParams::from_config(&c);
        tracing::info!(
            "l1sched: bsic {} tsc {} c0 {} clock_advance {} rts_advance {}",
            params.bsic, params.tsc, params.c0, params.clock_advance, params.rts_advance
        );

        let mut sched = L1Scheduler::new(params, codec, keystream);
        for (tn, pchan) in c.timeslots.iter().enumerate() {
            if *pchan == PhysChanConfig::None {
                continue;
            }
            if let Err(e) = sched.configure(tn as Tn, *pchan) {
                tracing::error!("tn {}: cannot configure {:?}: {}", tn, pchan, e);
            }
        }

        Self {
            config,
            dltime: GsmTime::default(),
            sched,
        }
    }

    /// Passes everything the scheduler generated on to L1sap
    fn send_up(&mut self, queue: &mut MessageQueue) {
        for msg in self.sched.take_up() {
            let sap = match msg {
                SapMsgInner::MphInfo(_) => Sap::MphSap,
                _ => Sap::PhSap,
            };
            queue.push_back(SapMsg::new(sap, GsmEntity::L1sched, GsmEntity::L1sap, self.dltime, msg));
        }
    }

    fn rx_trxd_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::TrxdClockInd(prim) => {
                gsm_core::assert_warn!(
                    prim.fn_num == self.dltime.fn_num,
                    "clock indication for fn {} during tick {}", prim.fn_num, self.dltime.fn_num
                );
                let bursts = self.sched.on_clock_tick(prim.fn_num);
                self.send_up(queue);
                for burst in bursts {
                    queue.push_back(SapMsg::new(
                        Sap::TrxdSap,
                        GsmEntity::L1sched,
                        GsmEntity::Phy,
                        self.dltime,
                        SapMsgInner::TrxdDlBurst(burst),
                    ));
                }
            }
            SapMsgInner::TrxdUlBurst(prim) => {
                self.sched.on_uplink_burst(prim);
                self.send_up(queue);
            }
            other => {
                tracing::warn!("rx_trxd_prim: unexpected {}", other);
            }
        }
    }

    fn rx_ph_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::PhDataReq(prim) => {
                tracing::trace!(fn_num = prim.fn_num, "<- PH-DATA.req chan_nr {:#04x} link_id {:#04x}", prim.chan_nr, prim.link_id);
                self.sched.enqueue(DlPrim::Data(prim));
            }
            SapMsgInner::TchReq(prim) => {
                tracing::trace!(fn_num = prim.fn_num, "<- TCH.req chan_nr {:#04x} len {}", prim.chan_nr, prim.data.len());
                self.sched.enqueue(DlPrim::Tch(prim));
            }
            other => {
                tracing::warn!("rx_ph_prim: unexpected {}", other);
            }
        }
    }

    fn rx_control_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::SchedCmd(cmd) = message.msg else {
            tracing::warn!("rx_control_prim: unexpected {}", message.msg);
            return;
        };
        let result = self.apply_cmd(&cmd);
        if let Err(e) = result {
            tracing::warn!("{:?} failed: {}", cmd, e);
        }
        let conf = SapMsg::new(
            Sap::Control,
            GsmEntity::L1sched,
            message.src,
            self.dltime,
            SapMsgInner::SchedCmdConf(SchedCmdConf { cmd, result }),
        );
        queue.push_prio(conf, MessagePrio::Immediate);
    }

    pub fn apply_cmd(&mut self, cmd: &SchedCmd) -> Result<(), SchedError> {
        match cmd {
            SchedCmd::SetPchan { tn, pchan } => self.sched.configure(*tn, *pchan),
            SchedCmd::SetLchan { chan_nr, link_id, active } => self.sched.activate_channel(*chan_nr, *link_id, *active),
            SchedCmd::SetMode { chan_nr, rsl_cmode, tch_mode, amr, handover } => {
                self.sched.set_mode(*chan_nr, *rsl_cmode, *tch_mode, *amr, *handover)
            }
            SchedCmd::SetCipher { chan_nr, downlink, algo, key } => self.sched.set_cipher(*chan_nr, *downlink, *algo, key),
            SchedCmd::SetRachDetect { chan_nr, on } => self.sched.set_rach_detect(*chan_nr, *on),
            SchedCmd::Reset => {
                self.sched.reset();
                Ok(())
            }
        }
    }
}

impl GsmEntityTrait for L1schedBs {
    fn entity(&self) -> GsmEntity {
        GsmEntity::L1sched
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, queue: &mut MessageQueue, message: SapMsg) {
        tracing::trace!("rx_prim: {} from {:?}", message.msg, message.src);

        match message.sap {
            Sap::TrxdSap => self.rx_trxd_prim(queue, message),
            Sap::PhSap => self.rx_ph_prim(queue, message),
            Sap::Control => self.rx_control_prim(queue, message),
            _ => {
                tracing::warn!("rx_prim: unexpected sap {:?}", message.sap);
            }
        }
    }

    fn tick_start(&mut self, _queue: &mut MessageQueue, ts: GsmTime) {
        self.dltime = ts;
    }
}
