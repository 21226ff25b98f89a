//! MPH-SAP indications from the scheduler to L1SAP

/// Measurement of one received block or burst group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasInd {
    pub chan_nr: u8,
    /// Frame number of the first burst of the measured unit
    pub fn_num: u32,
    pub ta_offs_256bits: i16,
    pub ber10k: u16,
    /// Inverted RSSI, dBm below 0
    pub inv_rssi: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MphInfo {
    /// Start of a new frame, sent once per tick
    TimeInd { fn_num: u32 },
    MeasInd(MeasInd),
    /// Closed loop request to step the MS power level and timing advance
    /// signalled in the SACCH L1 header. A positive power step lowers the MS power.
    LoopUpdate {
        chan_nr: u8,
        power_step: i8,
        ta_step: i8,
    },
}

impl MphInfo {
    pub fn name(&self) -> &'static str {
        match self {
            MphInfo::TimeInd { .. } => "TimeInd",
            MphInfo::MeasInd(_) => "MeasInd",
            MphInfo::LoopUpdate { .. } => "LoopUpdate",
        }
    }
}
