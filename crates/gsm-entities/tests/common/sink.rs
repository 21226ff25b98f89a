use gsm_core::GsmEntity;
use gsm_entities::{GsmEntityTrait, MessageQueue};
use gsm_saps::SapMsg;

/// A stack entity sink for testing purposes
/// Collects all received SapMsg messages for later inspection
pub struct Sink {
    entity: GsmEntity,
    msgqueue: Vec<SapMsg>,
}

impl Sink {
    pub fn new(entity: GsmEntity) -> Self {
        Self {
            entity,
            msgqueue: vec![],
        }
    }

    pub fn take_msgqueue(&mut self) -> Vec<SapMsg> {
        std::mem::take(&mut self.msgqueue)
    }
}

impl GsmEntityTrait for Sink {
    fn entity(&self) -> GsmEntity {
        self.entity
    }

    fn rx_prim(&mut self, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::trace!("sink {:?} rx_prim: {}", self.entity, message.msg);
        self.msgqueue.push(message);
    }
}
