use std::collections::BTreeMap;

use gsm_config::{PhyBackend, SharedConfig, StackConfig, StackState};
use gsm_core::{GsmEntity, GsmTime, PhysChanConfig, Sap, Sbit, Tn, Ubit};
use gsm_entities::l1sched::bursts::{normal_burst_coded, BURST_CODED_BITS};
use gsm_entities::l1sched::codec::{ChannelCodec, LoopbackCodec, XCCH_CODED_BITS};
use gsm_entities::l1sap::l1sap_bs::L1sapBs;
use gsm_entities::l1sched::l1sched_bs::L1schedBs;
use gsm_entities::phy::components::rxtx_dev::{hard_to_soft, LoopbackDev, NoneDev};
use gsm_entities::phy::phy_bs::PhyBs;
use gsm_entities::rsl::rsl_bs::RslBs;
use gsm_entities::{GsmEntityTrait, MessageRouter};
use gsm_saps::rsl::RslMsg;
use gsm_saps::trxd::TrxdClockInd;
use gsm_saps::{SapMsg, SapMsgInner};

use super::sink::Sink;

/// Creates a default config for testing. It can still be modified as needed
/// before passing it to the ComponentTest constructor.
/// TS0 combined CCCH+SDCCH/4, TS1 TCH/F, TS2 TCH/H, TS3 PDCH
pub fn default_test_config() -> StackConfig {
    let mut cfg = StackConfig::new(7);

    // Without a PHY component in the test, the backend still needs a value
    cfg.phy_io.backend = PhyBackend::None;

    cfg.timeslots[1] = PhysChanConfig::TchF;
    cfg.timeslots[2] = PhysChanConfig::TchH;
    cfg.timeslots[3] = PhysChanConfig::Pdch;
    cfg
}

/// Downlink bursts of one timeslot collected by a PHY sink, keyed by frame number
#[allow(dead_code)]
pub fn dl_bursts_of(msgs: &[SapMsg], tn: Tn) -> BTreeMap<u32, Vec<Ubit>> {
    msgs.iter()
        .filter_map(|m| match &m.msg {
            SapMsgInner::TrxdDlBurst(b) if b.tn == tn => Some((b.fn_num, b.bits.clone())),
            _ => None,
        })
        .collect()
}

/// Decodes the signalling block sent in the four bursts starting at `first_fn`
#[allow(dead_code)]
pub fn decode_dl_block(bursts: &BTreeMap<u32, Vec<Ubit>>, first_fn: u32) -> Option<Vec<u8>> {
    let mut coded = vec![0 as Sbit; XCCH_CODED_BITS];
    for bid in 0..4u32 {
        let bits = bursts.get(&(first_fn + bid))?;
        let soft: Vec<Sbit> = bits.iter().map(|&b| hard_to_soft(b)).collect();
        let off = bid as usize * BURST_CODED_BITS;
        normal_burst_coded(&soft, &mut coded[off..off + BURST_CODED_BITS]);
    }
    LoopbackCodec::new().xcch_decode(&coded).ok().map(|(data, _)| data)
}

/// Infrastructure for testing stack entities
/// Quick setup of the requested entities for end-to-end testing
/// Supports optional sinks for collecting messages for later inspection
pub struct ComponentTest {
    pub config: SharedConfig,
    pub router: MessageRouter,
    pub sinks: Vec<GsmEntity>,
}

#[allow(dead_code)]
impl ComponentTest {
    pub fn new(config: StackConfig, start_dl_time: Option<GsmTime>) -> Self {
        let shared_config = SharedConfig::from_parts(config, StackState::default());
        let mut router = MessageRouter::new(shared_config.clone());
        router.set_dl_time(start_dl_time.unwrap_or_default());

        Self {
            config: shared_config,
            router,
            sinks: vec![],
        }
    }

    pub fn get_shared_config(&self) -> SharedConfig {
        self.config.clone()
    }

    pub fn populate_entities(&mut self, entities: Vec<GsmEntity>, sinks: Vec<GsmEntity>) {
        for entity in entities.iter() {
            match entity {
                GsmEntity::Phy => match self.config.config().phy_io.backend {
                    PhyBackend::Loopback => self.register_entity(PhyBs::new(self.config.clone(), LoopbackDev::new())),
                    _ => self.register_entity(PhyBs::new(self.config.clone(), NoneDev)),
                },
                GsmEntity::L1sched => self.register_entity(L1schedBs::new(self.config.clone())),
                GsmEntity::L1sap => self.register_entity(L1sapBs::new(self.config.clone())),
                GsmEntity::Rsl => self.register_entity(RslBs::new(self.config.clone())),
            }
        }

        // Create sinks for debugging / message collection
        for sink in sinks.iter() {
            assert!(!self.sinks.contains(sink), "Sink already exists: {:?}", sink);
            assert!(self.router.get_entity(*sink).is_none(), "Sink already registered as entity: {:?}", sink);
            self.sinks.push(*sink);
            self.register_entity(Sink::new(*sink));
        }
    }

    /// Full stack: PHY, scheduler, L1SAP and the RSL boundary
    pub fn full_stack(config: StackConfig) -> Self {
        let mut test = Self::new(config, None);
        test.populate_entities(
            vec![GsmEntity::Phy, GsmEntity::L1sched, GsmEntity::L1sap, GsmEntity::Rsl],
            vec![],
        );
        test
    }

    pub fn register_entity<T: 'static + GsmEntityTrait>(&mut self, entity: T) {
        self.router.register_entity(Box::new(entity));
    }

    pub fn run_stack(&mut self, num_ticks: usize) {
        self.router.run_stack(Some(num_ticks), None);
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        self.router.submit_message(message);
    }

    pub fn deliver_all_messages(&mut self) {
        self.router.deliver_all_messages();
    }

    /// Queues a control plane command as if sent by the RSL boundary
    pub fn submit_rsl(&mut self, msg: RslMsg) {
        let dltime = self.router.dl_time();
        self.submit_message(SapMsg::new(Sap::RslSap, GsmEntity::Rsl, GsmEntity::L1sap, dltime, SapMsgInner::Rsl(msg)));
    }

    /// Without a PHY entity, emulates its clock indication for the current frame
    /// and runs the tick to completion
    pub fn clock_tick(&mut self) {
        let ts = self.router.dl_time();
        self.router.tick_start();
        self.submit_message(SapMsg::new(
            Sap::TrxdSap,
            GsmEntity::Phy,
            GsmEntity::L1sched,
            ts,
            SapMsgInner::TrxdClockInd(TrxdClockInd { fn_num: ts.fn_num }),
        ));
        self.deliver_all_messages();
        self.router.tick_end();
    }

    pub fn l1sap(&mut self) -> &mut L1sapBs {
        self.router
            .get_entity(GsmEntity::L1sap)
            .and_then(|e| e.as_any_mut().downcast_mut::<L1sapBs>())
            .expect("L1sap not registered")
    }

    pub fn l1sched(&mut self) -> &mut L1schedBs {
        self.router
            .get_entity(GsmEntity::L1sched)
            .and_then(|e| e.as_any_mut().downcast_mut::<L1schedBs>())
            .expect("L1sched not registered")
    }

    /// Takes the indications collected by the RSL boundary entity
    pub fn take_rsl(&mut self) -> Vec<RslMsg> {
        self.router
            .get_entity(GsmEntity::Rsl)
            .and_then(|e| e.as_any_mut().downcast_mut::<RslBs>())
            .map(|rsl| rsl.take_history())
            .unwrap_or_default()
    }

    pub fn dump_sinks(&mut self) -> Vec<SapMsg> {
        let mut msgs = vec![];
        for sink in self.sinks.iter() {
            if let Some(entity) = self.router.get_entity(*sink) {
                if let Some(sink) = entity.as_any_mut().downcast_mut::<Sink>() {
                    msgs.append(&mut sink.take_msgqueue());
                }
            }
        }
        msgs
    }
}
