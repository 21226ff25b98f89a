use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use gsm_config::SharedConfig;
use gsm_core::{GsmEntity, GsmTime, Sap};
use gsm_saps::rsl::RslMsg;
use gsm_saps::{SapMsg, SapMsgInner};

use crate::{GsmEntityTrait, MessageQueue};

/// Indications kept for inspection
const MAX_HISTORY: usize = 256;

/// Channel pair towards an external control plane
struct RslLink {
    cmd_rx: Receiver<RslMsg>,
    ind_tx: Sender<RslMsg>,
}

/// Boundary between layer 1 and the control plane.
/// Commands are taken from the link (or submitted directly) at the start of each frame,
/// indications from L1SAP are logged and passed out over the link.
pub struct RslBs {
    config: SharedConfig,
    dltime: GsmTime,

    link: Option<RslLink>,
    /// Commands submitted in-process, sent with the next tick
    pending: VecDeque<RslMsg>,
    history: VecDeque<RslMsg>,
}

impl RslBs {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            dltime: GsmTime::default(),
            link: None,
            pending: VecDeque::new(),
            history: VecDeque::new(),
        }
    }

    /// Creates the entity together with the command sender and indication receiver of its link
    pub fn with_link(config: SharedConfig) -> (Self, Sender<RslMsg>, Receiver<RslMsg>) {
        let (cmd_tx, cmd_rx) = unbounded::<RslMsg>();
        let (ind_tx, ind_rx) = unbounded::<RslMsg>();
        let mut rsl = Self::new(config);
        rsl.link = Some(RslLink { cmd_rx, ind_tx });
        (rsl, cmd_tx, ind_rx)
    }

    pub fn submit(&mut self, msg: RslMsg) {
        self.pending.push_back(msg);
    }

    /// Indications received so far, oldest first
    pub fn history(&self) -> impl Iterator<Item = &RslMsg> {
        self.history.iter()
    }

    pub fn take_history(&mut self) -> Vec<RslMsg> {
        self.history.drain(..).collect()
    }

    fn send_down(&self, queue: &mut MessageQueue, msg: RslMsg) {
        tracing::debug!("-> {}", msg.name());
        queue.push_back(SapMsg::new(Sap::RslSap, GsmEntity::Rsl, GsmEntity::L1sap, self.dltime, SapMsgInner::Rsl(msg)));
    }

    fn log_indication(&self, msg: &RslMsg) {
        let fn_num = self.dltime.fn_num;
        match msg {
            RslMsg::ConnFailInd { chan_nr, cause } => {
                tracing::error!(fn_num, "chan_nr {:#04x}: connection failure {:?}", chan_nr, cause);
            }
            RslMsg::ChanActivNack { chan_nr, cause } | RslMsg::ModeModifyNack { chan_nr, cause } => {
                tracing::warn!(fn_num, "chan_nr {:#04x}: {} {:?}", chan_nr, msg.name(), cause);
            }
            RslMsg::SmsBcReject { reason } => {
                tracing::warn!(fn_num, "SMSCB rejected: {}", reason);
            }
            RslMsg::ChanRqd { ra, fn_num: req_fn, acc_delay } => {
                tracing::info!(fn_num, "channel required ra {:#04x} at {} delay {}", ra, req_fn, acc_delay);
            }
            RslMsg::ChanActivAck { chan_nr }
            | RslMsg::RfChanRelAck { chan_nr }
            | RslMsg::ModeModifyAck { chan_nr }
            | RslMsg::HandoverDetect { chan_nr, .. } => {
                tracing::info!(fn_num, "chan_nr {:#04x}: {}", chan_nr, msg.name());
            }
            RslMsg::MeasResult { chan_nr, meas } => {
                tracing::debug!(fn_num, "chan_nr {:#04x}: {:?}", chan_nr, meas);
            }
            RslMsg::DataInd { chan_nr, link_id, data } => {
                tracing::debug!(fn_num, "chan_nr {:#04x} link_id {:#04x}: {} bytes", chan_nr, link_id, data.len());
            }
            RslMsg::TchInd { chan_nr, data } => {
                tracing::trace!(fn_num, "chan_nr {:#04x}: traffic frame of {} bytes", chan_nr, data.len());
            }
            other => {
                tracing::warn!(fn_num, "unexpected downlink message {} from L1SAP", other.name());
            }
        }
    }

    fn rx_rsl_prim(&mut self, message: SapMsg) {
        let SapMsgInner::Rsl(msg) = message.msg else {
            tracing::warn!("rx_rsl_prim: unexpected {}", message.msg);
            return;
        };
        self.log_indication(&msg);

        if let Some(link) = &self.link {
            if link.ind_tx.send(msg.clone()).is_err() {
                tracing::warn!("control plane went away, closing link");
                self.link = None;
            }
        }

        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(msg);
    }
}

impl GsmEntityTrait for RslBs {
    fn entity(&self) -> GsmEntity {
        GsmEntity::Rsl
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        match message.sap {
            Sap::RslSap => self.rx_rsl_prim(message),
            _ => {
                tracing::warn!("rx_prim: unexpected sap {:?}", message.sap);
            }
        }
    }

    fn tick_start(&mut self, queue: &mut MessageQueue, ts: GsmTime) {
        self.dltime = ts;

        while let Some(msg) = self.pending.pop_front() {
            self.send_down(queue, msg);
        }

        let mut closed = false;
        if let Some(link) = &self.link {
            loop {
                match link.cmd_rx.try_recv() {
                    Ok(msg) => self.send_down(queue, msg),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        closed = true;
                        break;
                    }
                }
            }
        }
        if closed {
            tracing::info!("control plane closed the command channel");
            self.link = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsm_saps::control::enums::chan_mode::ConnFailCause;

    fn ind(msg: RslMsg) -> SapMsg {
        SapMsg::new(Sap::RslSap, GsmEntity::L1sap, GsmEntity::Rsl, GsmTime::default(), SapMsgInner::Rsl(msg))
    }

    #[test]
    fn test_commands_sent_on_tick() {
        let (mut rsl, cmd_tx, _ind_rx) = RslBs::with_link(SharedConfig::new(1));
        let mut queue = MessageQueue::new();

        rsl.submit(RslMsg::RfChanRel { chan_nr: 0x08 });
        cmd_tx.send(RslMsg::AgchEnqueue { data: vec![0x2b; 23] }).unwrap();
        rsl.tick_start(&mut queue, GsmTime::new(5));

        assert_eq!(queue.len(), 2);
        let first = queue.pop_front().unwrap();
        assert_eq!((first.sap, first.dest), (Sap::RslSap, GsmEntity::L1sap));
        assert!(matches!(first.msg, SapMsgInner::Rsl(RslMsg::RfChanRel { chan_nr: 0x08 })));
        assert!(matches!(queue.pop_front().unwrap().msg, SapMsgInner::Rsl(RslMsg::AgchEnqueue { .. })));
    }

    #[test]
    fn test_indications_forwarded_and_kept() {
        let (mut rsl, _cmd_tx, ind_rx) = RslBs::with_link(SharedConfig::new(1));
        let mut queue = MessageQueue::new();

        let fail = RslMsg::ConnFailInd { chan_nr: 0x20, cause: ConnFailCause::RadioLinkFail };
        rsl.rx_prim(&mut queue, ind(fail.clone()));
        assert_eq!(ind_rx.try_recv().unwrap(), fail);
        assert_eq!(rsl.take_history(), vec![fail]);
        assert_eq!(rsl.history().count(), 0);
    }

    #[test]
    fn test_closed_link_is_dropped() {
        let (mut rsl, cmd_tx, ind_rx) = RslBs::with_link(SharedConfig::new(1));
        let mut queue = MessageQueue::new();
        drop(cmd_tx);
        drop(ind_rx);

        rsl.tick_start(&mut queue, GsmTime::new(0));
        rsl.rx_prim(&mut queue, ind(RslMsg::ChanActivAck { chan_nr: 0x08 }));
        assert!(rsl.link.is_none());
        assert_eq!(rsl.history().count(), 1);
    }
}
