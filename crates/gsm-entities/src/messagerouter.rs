use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gsm_config::SharedConfig;
use gsm_core::{GsmEntity, GsmTime};
use gsm_saps::SapMsg;

use crate::GsmEntityTrait;

/// Delivery class of a queued primitive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessagePrio {
    /// Delivered before anything of normal priority, still FIFO among themselves
    Immediate,
    #[default]
    Normal,
}

/// Primitives waiting for delivery within the current frame
#[derive(Default)]
pub struct MessageQueue {
    urgent: VecDeque<SapMsg>,
    normal: VecDeque<SapMsg>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, message: SapMsg) {
        self.normal.push_back(message);
    }

    pub fn push_prio(&mut self, message: SapMsg, prio: MessagePrio) {
        match prio {
            MessagePrio::Immediate => self.urgent.push_back(message),
            MessagePrio::Normal => self.normal.push_back(message),
        }
    }

    pub fn pop_front(&mut self) -> Option<SapMsg> {
        self.urgent.pop_front().or_else(|| self.normal.pop_front())
    }

    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.normal.is_empty()
    }
}

/// Delivery counters since the router was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub delivered: u64,
    /// Primitives addressed to an entity that is not registered
    pub undeliverable: u64,
    pub ticks: u64,
}

/// Owns the entities of one transceiver and moves primitives between them.
/// All entities run on the thread driving the router, one frame at a time.
pub struct MessageRouter {
    config: SharedConfig,
    entities: HashMap<GsmEntity, Box<dyn GsmEntityTrait>>,
    queue: MessageQueue,
    stats: RouterStats,

    /// Frame number of the current tick, as seen by the PHY
    ts: GsmTime,
}

impl MessageRouter {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            entities: HashMap::new(),
            queue: MessageQueue::new(),
            stats: RouterStats::default(),
            ts: GsmTime::default(),
        }
    }

    /// Sets the frame number of the next tick
    pub fn set_dl_time(&mut self, ts: GsmTime) {
        self.ts = ts;
    }

    pub fn dl_time(&self) -> GsmTime {
        self.ts
    }

    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// Registers an entity, replacing one of the same kind
    pub fn register_entity(&mut self, mut entity: Box<dyn GsmEntityTrait>) {
        let kind = entity.entity();
        entity.set_config(self.config.clone());
        if self.entities.insert(kind, entity).is_some() {
            tracing::warn!("register_entity: replaced existing {:?}", kind);
        } else {
            tracing::debug!("register_entity: {:?}", kind);
        }
    }

    pub fn get_entity(&mut self, kind: GsmEntity) -> Option<&mut dyn GsmEntityTrait> {
        self.entities.get_mut(&kind).map(|e| e.as_mut())
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        tracing::debug!("submit {} on {:?}: {:?} -> {:?}", message.msg, message.sap, message.src, message.dest);
        self.queue.push_back(message);
    }

    /// Delivers the next queued primitive. Returns false if the queue was empty.
    pub fn deliver_message(&mut self) -> bool {
        let Some(message) = self.queue.pop_front() else {
            return false;
        };
        tracing::trace!("deliver {} on {:?}: {:?} -> {:?}", message.msg, message.sap, message.src, message.dest);

        match self.entities.get_mut(&message.dest) {
            Some(entity) => {
                self.stats.delivered += 1;
                entity.rx_prim(&mut self.queue, message);
            }
            None => {
                self.stats.undeliverable += 1;
                tracing::warn!("no entity {:?} for {} from {:?}", message.dest, message.msg, message.src);
            }
        }
        true
    }

    pub fn deliver_all_messages(&mut self) {
        while self.deliver_message() {}
    }

    pub fn get_msgqueue_len(&self) -> usize {
        self.queue.len()
    }

    /// Starts a frame. The PHY goes first so its clock indication leads the queue.
    pub fn tick_start(&mut self) {
        tracing::trace!("--- fn {} ---", self.ts);

        if let Some(phy) = self.entities.get_mut(&GsmEntity::Phy) {
            phy.tick_start(&mut self.queue, self.ts);
        }
        for (kind, entity) in self.entities.iter_mut() {
            if *kind != GsmEntity::Phy {
                entity.tick_start(&mut self.queue, self.ts);
            }
        }
    }

    /// Ends a frame. L1sap is flushed before the PHY transmits, then the
    /// uplink the PHY returned is processed and the frame number advances.
    pub fn tick_end(&mut self) {
        tracing::trace!("--- end of fn {} ---", self.ts);

        if let Some(l1sap) = self.entities.get_mut(&GsmEntity::L1sap) {
            l1sap.tick_end(&mut self.queue, self.ts);
        }
        self.deliver_all_messages();

        for (kind, entity) in self.entities.iter_mut() {
            if *kind != GsmEntity::L1sap {
                entity.tick_end(&mut self.queue, self.ts);
            }
        }
        self.deliver_all_messages();

        self.stats.ticks += 1;
        self.ts = self.ts.add_frames(1);
    }

    /// Runs the stack forever, for `num_ticks` frames, or until `running` is cleared
    pub fn run_stack(&mut self, num_ticks: Option<usize>, running: Option<Arc<AtomicBool>>) {
        let mut ticks: usize = 0;

        loop {
            if running.as_ref().is_some_and(|r| !r.load(Ordering::SeqCst)) {
                tracing::info!("stopping stack after {} frames, {:?}", ticks, self.stats);
                break;
            }

            self.tick_start();
            self.deliver_all_messages();
            self.tick_end();

            ticks += 1;
            if num_ticks.is_some_and(|n| ticks >= n) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsm_core::Sap;
    use gsm_saps::trxd::TrxdClockInd;
    use gsm_saps::SapMsgInner;

    fn clock(fn_num: u32) -> SapMsg {
        SapMsg::new(
            Sap::TrxdSap,
            GsmEntity::Phy,
            GsmEntity::L1sched,
            GsmTime::new(fn_num),
            SapMsgInner::TrxdClockInd(TrxdClockInd { fn_num }),
        )
    }

    fn fn_of(msg: &SapMsg) -> u32 {
        match msg.msg {
            SapMsgInner::TrxdClockInd(TrxdClockInd { fn_num }) => fn_num,
            _ => u32::MAX,
        }
    }

    #[test]
    fn test_immediate_overtakes_normal() {
        let mut queue = MessageQueue::new();
        queue.push_back(clock(1));
        queue.push_prio(clock(2), MessagePrio::Immediate);
        queue.push_back(clock(3));
        queue.push_prio(clock(4), MessagePrio::Immediate);
        assert_eq!(queue.len(), 4);

        let order: Vec<u32> = std::iter::from_fn(|| queue.pop_front()).map(|m| fn_of(&m)).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_undeliverable_counted() {
        let mut router = MessageRouter::new(SharedConfig::new(1));
        router.submit_message(clock(0));
        assert_eq!(router.get_msgqueue_len(), 1);
        router.deliver_all_messages();
        assert_eq!(router.get_msgqueue_len(), 0);
        assert_eq!(router.stats(), RouterStats { delivered: 0, undeliverable: 1, ticks: 0 });

        router.run_stack(Some(3), None);
        assert_eq!(router.stats().ticks, 3);
        assert_eq!(router.dl_time(), GsmTime::new(3));
    }
}
