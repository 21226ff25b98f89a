#![allow(dead_code)]

pub mod entity_trait;
pub mod l1sap;
pub mod l1sched;
pub mod messagerouter;
pub mod phy;
pub mod rsl;

// Re-export commonly used items from router
pub use entity_trait::GsmEntityTrait;
pub use messagerouter::{MessagePrio, MessageQueue, MessageRouter, RouterStats};
