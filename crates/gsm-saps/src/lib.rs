/// Custom definitions for stack control
pub mod control;

pub mod mph;
pub mod ph;
pub mod rsl;
pub mod sapmsg;
pub mod trxd;

pub use sapmsg::*;
