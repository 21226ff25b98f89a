pub mod amr;
pub mod cbch;
pub mod ciphering;
pub mod handover;
pub mod lchan;
pub mod measurement;
pub mod radio_link;
pub mod sysinfo;
pub mod timer;
