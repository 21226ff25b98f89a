pub mod bursts;
pub mod chan_desc;
pub mod chan_state;
pub mod cipher;
pub mod codec;
pub mod l1sched_bs;
pub mod loops;
pub mod mframe;
pub mod queue;
pub mod scheduler;

mod rx;
mod tx;
