use crossbeam_channel::Sender;

use gsm_config::SharedConfig;
use gsm_core::{GsmEntity, GsmTime, Sap};
use gsm_saps::trxd::{TrxdClockInd, TrxdDlBurst};
use gsm_saps::{SapMsg, SapMsgInner};

use crate::{GsmEntityTrait, MessageQueue};

use super::components::frame_clock::FrameClock;
use super::components::phy_io_file::{FileWriteMsg, PhyIoFile};
use super::components::rxtx_dev::RxTxDev;

/// Transceiver entity. Provides the frame clock and moves bursts between the scheduler and a device
pub struct PhyBs<D: RxTxDev> {
    config: SharedConfig,
    dltime: GsmTime,

    /// Present when running paced to the air interface
    clock: Option<FrameClock>,

    /// Channel for asynchronous downlink burst logging
    dl_tx_sender: Option<Sender<FileWriteMsg>>,

    /// Downlink bursts of the current frame, handed to the device at the end of the tick
    dl_bursts: Vec<TrxdDlBurst>,

    rxtxdev: D,
}

impl<D: RxTxDev> PhyBs<D> {
    pub fn new(config: SharedConfig, rxtxdev: D) -> Self {
        let c = &config.config().phy_io;

        let dl_tx_sender = c.dl_tx_file.as_ref().and_then(|f| {
            match PhyIoFile::create_async_writer(f, "dl_tx_logger".to_string()) {
                Ok(sender) => Some(sender),
                Err(e) => {
                    tracing::warn!("cannot capture downlink bursts to {}: {}", f, e);
                    None
                }
            }
        });
        let clock = c.realtime.then(FrameClock::new);
        tracing::info!("phy: backend {:?} realtime {}", c.backend, c.realtime);

        Self {
            config,
            dltime: GsmTime::default(),
            clock,
            dl_tx_sender,
            dl_bursts: Vec::new(),
            rxtxdev,
        }
    }

    fn rx_trxd_prim(&mut self, message: SapMsg) {
        let SapMsgInner::TrxdDlBurst(burst) = message.msg else {
            tracing::warn!("rx_trxd_prim: unexpected {}", message.msg);
            return;
        };

        if let Some(sender) = &self.dl_tx_sender {
            let _ = sender.try_send(FileWriteMsg::WriteBurst {
                tn: burst.tn,
                fn_num: burst.fn_num,
                bits: burst.bits.clone(),
            });
        }
        self.dl_bursts.push(burst);
    }
}

impl<D: RxTxDev> Drop for PhyBs<D> {
    fn drop(&mut self) {
        if let Some(sender) = &self.dl_tx_sender {
            let _ = sender.send(FileWriteMsg::Shutdown);
        }
    }
}

impl<D: RxTxDev + Send + 'static> GsmEntityTrait for PhyBs<D> {
    fn entity(&self) -> GsmEntity {
        GsmEntity::Phy
    }

    fn set_config(&mut self, config: SharedConfig) {
        self.config = config;
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::trace!("rx_prim: {} from {:?}", message.msg, message.src);

        match message.sap {
            Sap::TrxdSap => self.rx_trxd_prim(message),
            _ => {
                tracing::warn!("rx_prim: unexpected sap {:?}", message.sap);
            }
        }
    }

    /// Emits the clock indication for this frame, after waiting for it in realtime mode
    fn tick_start(&mut self, queue: &mut MessageQueue, ts: GsmTime) {
        if let Some(clock) = &mut self.clock {
            clock.wait();
        }
        self.dltime = ts;
        self.config.state_write().frames += 1;

        queue.push_back(SapMsg::new(
            Sap::TrxdSap,
            GsmEntity::Phy,
            GsmEntity::L1sched,
            ts,
            SapMsgInner::TrxdClockInd(TrxdClockInd { fn_num: ts.fn_num }),
        ));
    }

    /// Transmits the collected bursts and passes the received ones to the scheduler
    fn tick_end(&mut self, queue: &mut MessageQueue, ts: GsmTime) -> bool {
        let tx = std::mem::take(&mut self.dl_bursts);
        self.config.state_write().dl_bursts += tx.len() as u64;

        let rx = match self.rxtxdev.rxtx_frame(ts.fn_num, &tx) {
            Ok(rx) => rx,
            Err(e) => {
                tracing::warn!(fn_num = ts.fn_num, "rxtx_frame failed: {}", e);
                return false;
            }
        };

        let got_any = !rx.is_empty();
        for burst in rx {
            queue.push_back(SapMsg::new(
                Sap::TrxdSap,
                GsmEntity::Phy,
                GsmEntity::L1sched,
                self.dltime,
                SapMsgInner::TrxdUlBurst(burst),
            ));
        }
        got_any
    }
}
