pub mod amr_conf;
pub mod enums;
pub mod sched;
