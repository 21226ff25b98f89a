//! PHY-layer types that are used across multiple layers
//!
//! These types originate from the PHY layer but are referenced by the scheduler,
//! L1SAP and SAP primitives, so they live in gsm-core to avoid circular dependencies.

use serde::Deserialize;

/// Length of a GMSK burst in bits (normal, dummy, FCCH, SCH and access bursts)
pub const GSM_BURST_LEN: usize = 148;
/// Length of an 8PSK burst in bits (3 bits per symbol)
pub const EGPRS_BURST_LEN: usize = 444;
/// Length of a MAC block (one xCCH L2 frame) in bytes
pub const GSM_MACBLOCK_LEN: usize = 23;
/// Padding octet for unused MAC block positions
pub const GSM_MACBLOCK_PADDING: u8 = 0x2b;

/// Unpacked hard bit, 0 or 1
pub type Ubit = u8;
/// Soft bit, -127 (certain 1) to 127 (certain 0), 0 is an erasure
pub type Sbit = i8;

/// Modulation of a burst
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum BurstType {
    /// Ordinary GMSK burst, 148 bits
    #[default]
    Gmsk,
    /// EGPRS 8PSK burst, 444 bits
    Psk8,
}

impl BurstType {
    pub fn len(self) -> usize {
        match self {
            BurstType::Gmsk => GSM_BURST_LEN,
            BurstType::Psk8 => EGPRS_BURST_LEN,
        }
    }

    /// Selects the burst type from the length of a received burst
    pub fn from_len(len: usize) -> Option<BurstType> {
        match len {
            GSM_BURST_LEN => Some(BurstType::Gmsk),
            EGPRS_BURST_LEN => Some(BurstType::Psk8),
            _ => None,
        }
    }
}

/// Physical channel configuration of a timeslot (TS 05.02 clause 6.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum PhysChanConfig {
    /// Timeslot not in use
    #[default]
    None,
    /// FCCH + SCH + BCCH + CCCH, non-combined
    Ccch,
    /// FCCH + SCH + BCCH + CCCH combined with SDCCH/4
    CcchSdcch4,
    /// Combined CCCH with SDCCH/4, sub-slot 2 carrying the CBCH
    CcchSdcch4Cbch,
    /// SDCCH/8
    Sdcch8,
    /// SDCCH/8, sub-slot 2 carrying the CBCH
    Sdcch8Cbch,
    /// TCH/F + FACCH/F + SACCH/TF
    TchF,
    /// 2 x TCH/H + FACCH/H + SACCH/TH
    TchH,
    /// Packet data channel
    Pdch,
}

impl PhysChanConfig {
    /// True for configurations that carry the cell broadcast channel
    pub fn has_cbch(self) -> bool {
        matches!(self, PhysChanConfig::CcchSdcch4Cbch | PhysChanConfig::Sdcch8Cbch)
    }
}
