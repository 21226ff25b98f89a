//! Core utilities for the GSM BTS stack
//!
//! This crate provides fundamental types and utilities used across the stack:
//! - GsmTime for TDMA frame numbering and hyperframe arithmetic
//! - PHY types (BurstType, PhysChanConfig, burst length constants)
//! - Entity and SAP identifiers used by the message router
//! - Common macros and debug utilities

pub mod amr_rtp;
pub mod chan_nr;
pub mod debug;
pub mod gsm_common;
pub mod gsm_entities;
pub mod gsm_time;
pub mod parse_error;
pub mod phy_types;
pub mod sysinfo_type;

// Re-export commonly used items
pub use gsm_common::*;
pub use gsm_entities::GsmEntity;
pub use gsm_time::{GsmTime, GSM_FRAME_DURATION_NS, GSM_HYPERFRAME};
pub use parse_error::ParseErr;
pub use phy_types::*;
pub use sysinfo_type::SysinfoType;

/// Timeslot number on a TRX, 0..=7
pub type Tn = u8;

/// Number of timeslots per TDMA frame
pub const NUM_TIMESLOTS: usize = 8;
