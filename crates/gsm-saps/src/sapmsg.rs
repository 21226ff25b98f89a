use core::fmt::Display;

use gsm_core::{GsmEntity, GsmTime, Sap};

use crate::control::sched::{SchedCmd, SchedCmdConf};
use crate::mph::MphInfo;
use crate::ph::*;
use crate::rsl::RslMsg;
use crate::trxd::*;

/// Exhaustive list of primitives carried between entities
#[derive(Debug)]
pub enum SapMsgInner {
    // TRXD-SAP (Phy <-> L1sched)
    TrxdClockInd(TrxdClockInd),
    TrxdDlBurst(TrxdDlBurst),
    TrxdUlBurst(TrxdUlBurst),

    // PH-SAP (L1sched <-> L1sap)
    PhRtsInd(PhRtsInd),
    PhDataReq(PhDataReq),
    PhDataInd(PhDataInd),
    PhRachInd(PhRachInd),
    TchRtsInd(TchRtsInd),
    TchReq(TchReq),
    TchInd(TchInd),

    // MPH-SAP (L1sched -> L1sap)
    MphInfo(MphInfo),

    // Control (L1sap -> L1sched and back)
    SchedCmd(SchedCmd),
    SchedCmdConf(SchedCmdConf),

    // RSL (L1sap <-> Rsl)
    Rsl(RslMsg),
}

impl Display for SapMsgInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SapMsgInner::TrxdClockInd(_) => write!(f, "TrxdClockInd"),
            SapMsgInner::TrxdDlBurst(_) => write!(f, "TrxdDlBurst"),
            SapMsgInner::TrxdUlBurst(_) => write!(f, "TrxdUlBurst"),
            SapMsgInner::PhRtsInd(_) => write!(f, "PhRtsInd"),
            SapMsgInner::PhDataReq(_) => write!(f, "PhDataReq"),
            SapMsgInner::PhDataInd(_) => write!(f, "PhDataInd"),
            SapMsgInner::PhRachInd(_) => write!(f, "PhRachInd"),
            SapMsgInner::TchRtsInd(_) => write!(f, "TchRtsInd"),
            SapMsgInner::TchReq(_) => write!(f, "TchReq"),
            SapMsgInner::TchInd(_) => write!(f, "TchInd"),
            SapMsgInner::MphInfo(m) => write!(f, "MphInfo::{}", m.name()),
            SapMsgInner::SchedCmd(_) => write!(f, "SchedCmd"),
            SapMsgInner::SchedCmdConf(_) => write!(f, "SchedCmdConf"),
            SapMsgInner::Rsl(m) => write!(f, "Rsl::{}", m.name()),
        }
    }
}

#[derive(Debug)]
pub struct SapMsg {
    pub sap: Sap,
    pub src: GsmEntity,
    pub dest: GsmEntity,
    /// Downlink time at the time the message was created
    pub dltime: GsmTime,

    pub msg: SapMsgInner
}

impl SapMsg {
    pub fn new(
        sap: Sap,
        src: GsmEntity,
        dest: GsmEntity,
        t_submit: GsmTime,
        msg: SapMsgInner
    ) -> Self {
        Self {
            sap,
            src,
            dest,
            dltime: t_submit,
            msg
        }
    }
}
