//! Primitives between L1SAP and the control plane (RSL boundary).
//! Only the information content is modelled, not the Abis wire encoding.

use gsm_core::SysinfoType;

use crate::control::amr_conf::AmrParseErr;
use crate::control::enums::chan_mode::{ConnFailCause, RslCmode, TchMode};
use crate::control::sched::SchedError;

/// Parameters of a CHANNEL ACTIVATION
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LchanParams {
    pub rsl_cmode: RslCmode,
    pub tch_mode: TchMode,
    /// MultiRate configuration IE contents, AMR only
    pub mr_conf: Option<Vec<u8>>,
    /// (algorithm, key) applied in both directions
    pub encr: Option<(u8, Vec<u8>)>,
    /// Handover reference, present for an asynchronous handover activation
    pub ho_ref: Option<u8>,
    /// Initial MS power control level
    pub ms_power: u8,
    /// Initial timing advance
    pub ta: u8,
    /// Echo received traffic frames back on the downlink
    pub loopback: bool,
}

/// Reasons for refusing an activation or mode change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NackCause {
    Sched(SchedError),
    MrConf(AmrParseErr),
    AlreadyActive,
    NotActive,
}

/// Uplink measurement result of one reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UlMeasResult {
    pub rxlev_full: u8,
    pub rxlev_sub: u8,
    pub rxqual_full: u8,
    pub rxqual_sub: u8,
    pub toa256_avg: i16,
    pub num_ul_meas: u8,
    /// Current MS power level and timing advance, as sent in the SACCH L1 header
    pub ms_power: u8,
    pub ta: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RslMsg {
    // Control plane -> L1SAP
    ChanActiv { chan_nr: u8, params: LchanParams },
    RfChanRel { chan_nr: u8 },
    ModeModify { chan_nr: u8, rsl_cmode: RslCmode, tch_mode: TchMode, mr_conf: Option<Vec<u8>> },
    EncrCmd { chan_nr: u8, algo: u8, key: Vec<u8> },
    DataReq { chan_nr: u8, link_id: u8, data: Vec<u8> },
    TchReq { chan_nr: u8, data: Vec<u8> },
    /// Cell broadcast message, `last_block` is the number of segments (1..=4)
    SmsBcCmd { last_block: u8, data: Vec<u8> },
    AgchEnqueue { data: Vec<u8> },
    SetSysinfo { si: SysinfoType, data: Option<Vec<u8>> },

    // L1SAP -> control plane
    ChanActivAck { chan_nr: u8 },
    ChanActivNack { chan_nr: u8, cause: NackCause },
    RfChanRelAck { chan_nr: u8 },
    ModeModifyAck { chan_nr: u8 },
    ModeModifyNack { chan_nr: u8, cause: NackCause },
    ChanRqd { ra: u16, fn_num: u32, acc_delay: u8 },
    ConnFailInd { chan_nr: u8, cause: ConnFailCause },
    HandoverDetect { chan_nr: u8, acc_delay: u8 },
    MeasResult { chan_nr: u8, meas: UlMeasResult },
    DataInd { chan_nr: u8, link_id: u8, data: Vec<u8> },
    TchInd { chan_nr: u8, data: Vec<u8> },
    SmsBcReject { reason: String },
}

impl RslMsg {
    pub fn name(&self) -> &'static str {
        match self {
            RslMsg::ChanActiv { .. } => "ChanActiv",
            RslMsg::RfChanRel { .. } => "RfChanRel",
            RslMsg::ModeModify { .. } => "ModeModify",
            RslMsg::EncrCmd { .. } => "EncrCmd",
            RslMsg::DataReq { .. } => "DataReq",
            RslMsg::TchReq { .. } => "TchReq",
            RslMsg::SmsBcCmd { .. } => "SmsBcCmd",
            RslMsg::AgchEnqueue { .. } => "AgchEnqueue",
            RslMsg::SetSysinfo { .. } => "SetSysinfo",
            RslMsg::ChanActivAck { .. } => "ChanActivAck",
            RslMsg::ChanActivNack { .. } => "ChanActivNack",
            RslMsg::RfChanRelAck { .. } => "RfChanRelAck",
            RslMsg::ModeModifyAck { .. } => "ModeModifyAck",
            RslMsg::ModeModifyNack { .. } => "ModeModifyNack",
            RslMsg::ChanRqd { .. } => "ChanRqd",
            RslMsg::ConnFailInd { .. } => "ConnFailInd",
            RslMsg::HandoverDetect { .. } => "HandoverDetect",
            RslMsg::MeasResult { .. } => "MeasResult",
            RslMsg::DataInd { .. } => "DataInd",
            RslMsg::TchInd { .. } => "TchInd",
            RslMsg::SmsBcReject { .. } => "SmsBcReject",
        }
    }
}
