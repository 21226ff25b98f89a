//! PH-SAP primitives between the scheduler and L1SAP

/// Ready-to-send indication for a signalling or packet data block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhRtsInd {
    pub chan_nr: u8,
    pub link_id: u8,
    pub fn_num: u32,
}

/// A block to transmit, answering a PhRtsInd with the same frame number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhDataReq {
    pub chan_nr: u8,
    pub link_id: u8,
    pub fn_num: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceInfo {
    /// Block decoded
    Valid,
    /// Block lost or failed to decode
    Invalid,
}

/// A received signalling or packet data block
#[derive(Debug, Clone, PartialEq)]
pub struct PhDataInd {
    pub chan_nr: u8,
    pub link_id: u8,
    pub fn_num: u32,
    pub rssi: i8,
    pub ber10k: u16,
    /// Timing offset in 1/256 bit periods
    pub ta_offs_256bits: i16,
    /// Link quality in centibel
    pub lqual_cb: i16,
    pub presence: PresenceInfo,
    /// Empty if the block is not present
    pub data: Vec<u8>,
}

/// A received access burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhRachInd {
    pub chan_nr: u8,
    pub fn_num: u32,
    /// Random access reference or handover reference
    pub ra: u16,
    /// Access delay in symbols
    pub acc_delay: u8,
    pub rssi: i8,
    pub ber10k: u16,
    pub toa256: i16,
}

/// Ready-to-send indication for a traffic frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TchRtsInd {
    pub chan_nr: u8,
    pub fn_num: u32,
}

/// A traffic frame to transmit (FR/HR/EFR payload or AMR in RTP octet-aligned format)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TchReq {
    pub chan_nr: u8,
    pub fn_num: u32,
    pub data: Vec<u8>,
}

/// A received traffic frame. Bad frames carry a codec specific BFI payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TchInd {
    pub chan_nr: u8,
    pub fn_num: u32,
    pub data: Vec<u8>,
}
