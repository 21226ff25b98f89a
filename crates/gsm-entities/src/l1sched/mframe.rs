//! Multiframe layouts per physical channel configuration (3GPP TS 05.02 clause 7).
//!
//! Every layout is a literal table with one entry per frame of its period. The
//! frame number modulo the period indexes the table; each entry names the
//! downlink and uplink logical channel and the burst id within its block.

use gsm_core::{PhysChanConfig, Tn};

use super::chan_desc::TrxChan;
use super::chan_desc::TrxChan::*;

/// One frame position of a multiframe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MfFrame {
    pub dl_chan: TrxChan,
    pub dl_bid: u8,
    pub ul_chan: TrxChan,
    pub ul_bid: u8,
}

const fn f(dl_chan: TrxChan, dl_bid: u8, ul_chan: TrxChan, ul_bid: u8) -> MfFrame {
    MfFrame { dl_chan, dl_bid, ul_chan, ul_bid }
}

/// Multiframe descriptor, selecting a layout for a configuration and set of timeslots
#[derive(Debug)]
pub struct MfDesc {
    pub pchan: PhysChanConfig,
    pub name: &'static str,
    /// Bit n set if the layout applies to timeslot n
    pub slotmask: u8,
    pub period: u32,
    pub frames: &'static [MfFrame],
}

impl MfDesc {
    /// Resolves the layout entry for a frame number
    #[inline]
    pub fn frame(&self, fn_num: u32) -> &MfFrame {
        &self.frames[(fn_num % self.period) as usize]
    }
}

/// All layouts. The first descriptor matching configuration and timeslot wins.
pub static MULTIFRAMES: &[MfDesc] = &[
    MfDesc { pchan: PhysChanConfig::Ccch, name: "BCCH", slotmask: 0x01, period: 51, frames: &FRAME_BCCH },
    MfDesc { pchan: PhysChanConfig::CcchSdcch4, name: "BCCH+SDCCH/4", slotmask: 0x01, period: 102, frames: &FRAME_BCCH_SDCCH4 },
    MfDesc { pchan: PhysChanConfig::CcchSdcch4Cbch, name: "BCCH+SDCCH/4+CBCH", slotmask: 0x01, period: 102, frames: &FRAME_BCCH_SDCCH4_CBCH },
    MfDesc { pchan: PhysChanConfig::Sdcch8, name: "SDCCH/8", slotmask: 0xff, period: 102, frames: &FRAME_SDCCH8 },
    MfDesc { pchan: PhysChanConfig::Sdcch8Cbch, name: "SDCCH/8+CBCH", slotmask: 0xff, period: 102, frames: &FRAME_SDCCH8_CBCH },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x01, period: 104, frames: &FRAME_TCHF_TS0 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x02, period: 104, frames: &FRAME_TCHF_TS1 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x04, period: 104, frames: &FRAME_TCHF_TS2 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x08, period: 104, frames: &FRAME_TCHF_TS3 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x10, period: 104, frames: &FRAME_TCHF_TS4 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x20, period: 104, frames: &FRAME_TCHF_TS5 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x40, period: 104, frames: &FRAME_TCHF_TS6 },
    MfDesc { pchan: PhysChanConfig::TchF, name: "TCH/F", slotmask: 0x80, period: 104, frames: &FRAME_TCHF_TS7 },
    MfDesc { pchan: PhysChanConfig::TchH, name: "TCH/H", slotmask: 0x03, period: 104, frames: &FRAME_TCHH_TS01 },
    MfDesc { pchan: PhysChanConfig::TchH, name: "TCH/H", slotmask: 0x0c, period: 104, frames: &FRAME_TCHH_TS23 },
    MfDesc { pchan: PhysChanConfig::TchH, name: "TCH/H", slotmask: 0x30, period: 104, frames: &FRAME_TCHH_TS45 },
    MfDesc { pchan: PhysChanConfig::TchH, name: "TCH/H", slotmask: 0xc0, period: 104, frames: &FRAME_TCHH_TS67 },
    MfDesc { pchan: PhysChanConfig::Pdch, name: "PDCH", slotmask: 0xff, period: 104, frames: &FRAME_PDCH },
];

/// Finds the multiframe descriptor for a configuration on a timeslot.
/// Returns None if the combination is not supported.
pub fn find_mframe(pchan: PhysChanConfig, tn: Tn) -> Option<&'static MfDesc> {
    if tn > 7 {
        return None;
    }
    MULTIFRAMES
        .iter()
        .find(|mf| mf.pchan == pchan && mf.slotmask & (1 << tn) != 0)
}

/// Resolves the (downlink, uplink) channels for a frame. Pure lookup.
pub fn resolve(pchan: PhysChanConfig, tn: Tn, fn_num: u32) -> Option<((TrxChan, u8), (TrxChan, u8))> {
    let mf = find_mframe(pchan, tn)?;
    let fr = mf.frame(fn_num);
    Some(((fr.dl_chan, fr.dl_bid), (fr.ul_chan, fr.ul_bid)))
}

/// FCCH + SCH + BCCH + CCCH (TS 05.02 clause 7 table 5, 51-multiframe)
static FRAME_BCCH: [MfFrame; 51] = [
    f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Bcch, 0, Rach, 0), f(Bcch, 1, Rach, 0), // 0
    f(Bcch, 2, Rach, 0), f(Bcch, 3, Rach, 0), f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), // 4
    f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), // 8
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 12
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 16
    f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), // 20
    f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), // 24
    f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), // 28
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 32
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 36
    f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), // 40
    f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), // 44
    f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Idle, 0, Rach, 0), // 48
];

/// Combined CCCH + SDCCH/4, two 51-multiframes for the SACCH/4 cycle
static FRAME_BCCH_SDCCH4: [MfFrame; 102] = [
    f(Fcch, 0, Sdcch4(3), 0), f(Sch, 0, Sdcch4(3), 1), f(Bcch, 0, Sdcch4(3), 2), f(Bcch, 1, Sdcch4(3), 3), // 0
    f(Bcch, 2, Rach, 0), f(Bcch, 3, Rach, 0), f(Ccch, 0, Sacch4(2), 0), f(Ccch, 1, Sacch4(2), 1), // 4
    f(Ccch, 2, Sacch4(2), 2), f(Ccch, 3, Sacch4(2), 3), f(Fcch, 0, Sacch4(3), 0), f(Sch, 0, Sacch4(3), 1), // 8
    f(Ccch, 0, Sacch4(3), 2), f(Ccch, 1, Sacch4(3), 3), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 12
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 16
    f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Sdcch4(0), 0, Rach, 0), f(Sdcch4(0), 1, Rach, 0), // 20
    f(Sdcch4(0), 2, Rach, 0), f(Sdcch4(0), 3, Rach, 0), f(Sdcch4(1), 0, Rach, 0), f(Sdcch4(1), 1, Rach, 0), // 24
    f(Sdcch4(1), 2, Rach, 0), f(Sdcch4(1), 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), // 28
    f(Sdcch4(2), 0, Rach, 0), f(Sdcch4(2), 1, Rach, 0), f(Sdcch4(2), 2, Rach, 0), f(Sdcch4(2), 3, Rach, 0), // 32
    f(Sdcch4(3), 0, Rach, 0), f(Sdcch4(3), 1, Sdcch4(0), 0), f(Sdcch4(3), 2, Sdcch4(0), 1), f(Sdcch4(3), 3, Sdcch4(0), 2), // 36
    f(Fcch, 0, Sdcch4(0), 3), f(Sch, 0, Sdcch4(1), 0), f(Sacch4(0), 0, Sdcch4(1), 1), f(Sacch4(0), 1, Sdcch4(1), 2), // 40
    f(Sacch4(0), 2, Sdcch4(1), 3), f(Sacch4(0), 3, Rach, 0), f(Sacch4(1), 0, Rach, 0), f(Sacch4(1), 1, Sdcch4(2), 0), // 44
    f(Sacch4(1), 2, Sdcch4(2), 1), f(Sacch4(1), 3, Sdcch4(2), 2), f(Idle, 0, Sdcch4(2), 3), f(Fcch, 0, Sdcch4(3), 0), // 48
    f(Sch, 0, Sdcch4(3), 1), f(Bcch, 0, Sdcch4(3), 2), f(Bcch, 1, Sdcch4(3), 3), f(Bcch, 2, Rach, 0), // 52
    f(Bcch, 3, Rach, 0), f(Ccch, 0, Sacch4(0), 0), f(Ccch, 1, Sacch4(0), 1), f(Ccch, 2, Sacch4(0), 2), // 56
    f(Ccch, 3, Sacch4(0), 3), f(Fcch, 0, Sacch4(1), 0), f(Sch, 0, Sacch4(1), 1), f(Ccch, 0, Sacch4(1), 2), // 60
    f(Ccch, 1, Sacch4(1), 3), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Ccch, 0, Rach, 0), // 64
    f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Fcch, 0, Rach, 0), // 68
    f(Sch, 0, Rach, 0), f(Sdcch4(0), 0, Rach, 0), f(Sdcch4(0), 1, Rach, 0), f(Sdcch4(0), 2, Rach, 0), // 72
    f(Sdcch4(0), 3, Rach, 0), f(Sdcch4(1), 0, Rach, 0), f(Sdcch4(1), 1, Rach, 0), f(Sdcch4(1), 2, Rach, 0), // 76
    f(Sdcch4(1), 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Sdcch4(2), 0, Rach, 0), // 80
    f(Sdcch4(2), 1, Rach, 0), f(Sdcch4(2), 2, Rach, 0), f(Sdcch4(2), 3, Rach, 0), f(Sdcch4(3), 0, Rach, 0), // 84
    f(Sdcch4(3), 1, Sdcch4(0), 0), f(Sdcch4(3), 2, Sdcch4(0), 1), f(Sdcch4(3), 3, Sdcch4(0), 2), f(Fcch, 0, Sdcch4(0), 3), // 88
    f(Sch, 0, Sdcch4(1), 0), f(Sacch4(2), 0, Sdcch4(1), 1), f(Sacch4(2), 1, Sdcch4(1), 2), f(Sacch4(2), 2, Sdcch4(1), 3), // 92
    f(Sacch4(2), 3, Rach, 0), f(Sacch4(3), 0, Rach, 0), f(Sacch4(3), 1, Sdcch4(2), 0), f(Sacch4(3), 2, Sdcch4(2), 1), // 96
    f(Sacch4(3), 3, Sdcch4(2), 2), f(Idle, 0, Sdcch4(2), 3), // 100
];

/// Combined CCCH + SDCCH/4, sub-slot 2 replaced by the CBCH
static FRAME_BCCH_SDCCH4_CBCH: [MfFrame; 102] = [
    f(Fcch, 0, Sdcch4(3), 0), f(Sch, 0, Sdcch4(3), 1), f(Bcch, 0, Sdcch4(3), 2), f(Bcch, 1, Sdcch4(3), 3), // 0
    f(Bcch, 2, Rach, 0), f(Bcch, 3, Rach, 0), f(Ccch, 0, Idle, 0), f(Ccch, 1, Idle, 0), // 4
    f(Ccch, 2, Idle, 0), f(Ccch, 3, Idle, 0), f(Fcch, 0, Sacch4(3), 0), f(Sch, 0, Sacch4(3), 1), // 8
    f(Ccch, 0, Sacch4(3), 2), f(Ccch, 1, Sacch4(3), 3), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 12
    f(Ccch, 0, Rach, 0), f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), // 16
    f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Sdcch4(0), 0, Rach, 0), f(Sdcch4(0), 1, Rach, 0), // 20
    f(Sdcch4(0), 2, Rach, 0), f(Sdcch4(0), 3, Rach, 0), f(Sdcch4(1), 0, Rach, 0), f(Sdcch4(1), 1, Rach, 0), // 24
    f(Sdcch4(1), 2, Rach, 0), f(Sdcch4(1), 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), // 28
    f(Cbch, 0, Rach, 0), f(Cbch, 1, Rach, 0), f(Cbch, 2, Rach, 0), f(Cbch, 3, Rach, 0), // 32
    f(Sdcch4(3), 0, Rach, 0), f(Sdcch4(3), 1, Sdcch4(0), 0), f(Sdcch4(3), 2, Sdcch4(0), 1), f(Sdcch4(3), 3, Sdcch4(0), 2), // 36
    f(Fcch, 0, Sdcch4(0), 3), f(Sch, 0, Sdcch4(1), 0), f(Sacch4(0), 0, Sdcch4(1), 1), f(Sacch4(0), 1, Sdcch4(1), 2), // 40
    f(Sacch4(0), 2, Sdcch4(1), 3), f(Sacch4(0), 3, Rach, 0), f(Sacch4(1), 0, Rach, 0), f(Sacch4(1), 1, Idle, 0), // 44
    f(Sacch4(1), 2, Idle, 0), f(Sacch4(1), 3, Idle, 0), f(Idle, 0, Idle, 0), f(Fcch, 0, Sdcch4(3), 0), // 48
    f(Sch, 0, Sdcch4(3), 1), f(Bcch, 0, Sdcch4(3), 2), f(Bcch, 1, Sdcch4(3), 3), f(Bcch, 2, Rach, 0), // 52
    f(Bcch, 3, Rach, 0), f(Ccch, 0, Sacch4(0), 0), f(Ccch, 1, Sacch4(0), 1), f(Ccch, 2, Sacch4(0), 2), // 56
    f(Ccch, 3, Sacch4(0), 3), f(Fcch, 0, Sacch4(1), 0), f(Sch, 0, Sacch4(1), 1), f(Ccch, 0, Sacch4(1), 2), // 60
    f(Ccch, 1, Sacch4(1), 3), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Ccch, 0, Rach, 0), // 64
    f(Ccch, 1, Rach, 0), f(Ccch, 2, Rach, 0), f(Ccch, 3, Rach, 0), f(Fcch, 0, Rach, 0), // 68
    f(Sch, 0, Rach, 0), f(Sdcch4(0), 0, Rach, 0), f(Sdcch4(0), 1, Rach, 0), f(Sdcch4(0), 2, Rach, 0), // 72
    f(Sdcch4(0), 3, Rach, 0), f(Sdcch4(1), 0, Rach, 0), f(Sdcch4(1), 1, Rach, 0), f(Sdcch4(1), 2, Rach, 0), // 76
    f(Sdcch4(1), 3, Rach, 0), f(Fcch, 0, Rach, 0), f(Sch, 0, Rach, 0), f(Cbch, 0, Rach, 0), // 80
    f(Cbch, 1, Rach, 0), f(Cbch, 2, Rach, 0), f(Cbch, 3, Rach, 0), f(Sdcch4(3), 0, Rach, 0), // 84
    f(Sdcch4(3), 1, Sdcch4(0), 0), f(Sdcch4(3), 2, Sdcch4(0), 1), f(Sdcch4(3), 3, Sdcch4(0), 2), f(Fcch, 0, Sdcch4(0), 3), // 88
    f(Sch, 0, Sdcch4(1), 0), f(Idle, 0, Sdcch4(1), 1), f(Idle, 0, Sdcch4(1), 2), f(Idle, 0, Sdcch4(1), 3), // 92
    f(Idle, 0, Rach, 0), f(Sacch4(3), 0, Rach, 0), f(Sacch4(3), 1, Idle, 0), f(Sacch4(3), 2, Idle, 0), // 96
    f(Sacch4(3), 3, Idle, 0), f(Idle, 0, Idle, 0), // 100
];

/// SDCCH/8, uplink delayed by 15 frames
static FRAME_SDCCH8: [MfFrame; 102] = [
    f(Sdcch8(0), 0, Sacch8(5), 0), f(Sdcch8(0), 1, Sacch8(5), 1), f(Sdcch8(0), 2, Sacch8(5), 2), f(Sdcch8(0), 3, Sacch8(5), 3), // 0
    f(Sdcch8(1), 0, Sacch8(6), 0), f(Sdcch8(1), 1, Sacch8(6), 1), f(Sdcch8(1), 2, Sacch8(6), 2), f(Sdcch8(1), 3, Sacch8(6), 3), // 4
    f(Sdcch8(2), 0, Sacch8(7), 0), f(Sdcch8(2), 1, Sacch8(7), 1), f(Sdcch8(2), 2, Sacch8(7), 2), f(Sdcch8(2), 3, Sacch8(7), 3), // 8
    f(Sdcch8(3), 0, Idle, 0), f(Sdcch8(3), 1, Idle, 0), f(Sdcch8(3), 2, Idle, 0), f(Sdcch8(3), 3, Sdcch8(0), 0), // 12
    f(Sdcch8(4), 0, Sdcch8(0), 1), f(Sdcch8(4), 1, Sdcch8(0), 2), f(Sdcch8(4), 2, Sdcch8(0), 3), f(Sdcch8(4), 3, Sdcch8(1), 0), // 16
    f(Sdcch8(5), 0, Sdcch8(1), 1), f(Sdcch8(5), 1, Sdcch8(1), 2), f(Sdcch8(5), 2, Sdcch8(1), 3), f(Sdcch8(5), 3, Sdcch8(2), 0), // 20
    f(Sdcch8(6), 0, Sdcch8(2), 1), f(Sdcch8(6), 1, Sdcch8(2), 2), f(Sdcch8(6), 2, Sdcch8(2), 3), f(Sdcch8(6), 3, Sdcch8(3), 0), // 24
    f(Sdcch8(7), 0, Sdcch8(3), 1), f(Sdcch8(7), 1, Sdcch8(3), 2), f(Sdcch8(7), 2, Sdcch8(3), 3), f(Sdcch8(7), 3, Sdcch8(4), 0), // 28
    f(Sacch8(0), 0, Sdcch8(4), 1), f(Sacch8(0), 1, Sdcch8(4), 2), f(Sacch8(0), 2, Sdcch8(4), 3), f(Sacch8(0), 3, Sdcch8(5), 0), // 32
    f(Sacch8(1), 0, Sdcch8(5), 1), f(Sacch8(1), 1, Sdcch8(5), 2), f(Sacch8(1), 2, Sdcch8(5), 3), f(Sacch8(1), 3, Sdcch8(6), 0), // 36
    f(Sacch8(2), 0, Sdcch8(6), 1), f(Sacch8(2), 1, Sdcch8(6), 2), f(Sacch8(2), 2, Sdcch8(6), 3), f(Sacch8(2), 3, Sdcch8(7), 0), // 40
    f(Sacch8(3), 0, Sdcch8(7), 1), f(Sacch8(3), 1, Sdcch8(7), 2), f(Sacch8(3), 2, Sdcch8(7), 3), f(Sacch8(3), 3, Sacch8(0), 0), // 44
    f(Idle, 0, Sacch8(0), 1), f(Idle, 0, Sacch8(0), 2), f(Idle, 0, Sacch8(0), 3), f(Sdcch8(0), 0, Sacch8(1), 0), // 48
    f(Sdcch8(0), 1, Sacch8(1), 1), f(Sdcch8(0), 2, Sacch8(1), 2), f(Sdcch8(0), 3, Sacch8(1), 3), f(Sdcch8(1), 0, Sacch8(2), 0), // 52
    f(Sdcch8(1), 1, Sacch8(2), 1), f(Sdcch8(1), 2, Sacch8(2), 2), f(Sdcch8(1), 3, Sacch8(2), 3), f(Sdcch8(2), 0, Sacch8(3), 0), // 56
    f(Sdcch8(2), 1, Sacch8(3), 1), f(Sdcch8(2), 2, Sacch8(3), 2), f(Sdcch8(2), 3, Sacch8(3), 3), f(Sdcch8(3), 0, Idle, 0), // 60
    f(Sdcch8(3), 1, Idle, 0), f(Sdcch8(3), 2, Idle, 0), f(Sdcch8(3), 3, Sdcch8(0), 0), f(Sdcch8(4), 0, Sdcch8(0), 1), // 64
    f(Sdcch8(4), 1, Sdcch8(0), 2), f(Sdcch8(4), 2, Sdcch8(0), 3), f(Sdcch8(4), 3, Sdcch8(1), 0), f(Sdcch8(5), 0, Sdcch8(1), 1), // 68
    f(Sdcch8(5), 1, Sdcch8(1), 2), f(Sdcch8(5), 2, Sdcch8(1), 3), f(Sdcch8(5), 3, Sdcch8(2), 0), f(Sdcch8(6), 0, Sdcch8(2), 1), // 72
    f(Sdcch8(6), 1, Sdcch8(2), 2), f(Sdcch8(6), 2, Sdcch8(2), 3), f(Sdcch8(6), 3, Sdcch8(3), 0), f(Sdcch8(7), 0, Sdcch8(3), 1), // 76
    f(Sdcch8(7), 1, Sdcch8(3), 2), f(Sdcch8(7), 2, Sdcch8(3), 3), f(Sdcch8(7), 3, Sdcch8(4), 0), f(Sacch8(4), 0, Sdcch8(4), 1), // 80
    f(Sacch8(4), 1, Sdcch8(4), 2), f(Sacch8(4), 2, Sdcch8(4), 3), f(Sacch8(4), 3, Sdcch8(5), 0), f(Sacch8(5), 0, Sdcch8(5), 1), // 84
    f(Sacch8(5), 1, Sdcch8(5), 2), f(Sacch8(5), 2, Sdcch8(5), 3), f(Sacch8(5), 3, Sdcch8(6), 0), f(Sacch8(6), 0, Sdcch8(6), 1), // 88
    f(Sacch8(6), 1, Sdcch8(6), 2), f(Sacch8(6), 2, Sdcch8(6), 3), f(Sacch8(6), 3, Sdcch8(7), 0), f(Sacch8(7), 0, Sdcch8(7), 1), // 92
    f(Sacch8(7), 1, Sdcch8(7), 2), f(Sacch8(7), 2, Sdcch8(7), 3), f(Sacch8(7), 3, Sacch8(4), 0), f(Idle, 0, Sacch8(4), 1), // 96
    f(Idle, 0, Sacch8(4), 2), f(Idle, 0, Sacch8(4), 3), // 100
];

/// SDCCH/8, sub-slot 2 replaced by the CBCH
static FRAME_SDCCH8_CBCH: [MfFrame; 102] = [
    f(Sdcch8(0), 0, Sacch8(5), 0), f(Sdcch8(0), 1, Sacch8(5), 1), f(Sdcch8(0), 2, Sacch8(5), 2), f(Sdcch8(0), 3, Sacch8(5), 3), // 0
    f(Sdcch8(1), 0, Sacch8(6), 0), f(Sdcch8(1), 1, Sacch8(6), 1), f(Sdcch8(1), 2, Sacch8(6), 2), f(Sdcch8(1), 3, Sacch8(6), 3), // 4
    f(Cbch, 0, Sacch8(7), 0), f(Cbch, 1, Sacch8(7), 1), f(Cbch, 2, Sacch8(7), 2), f(Cbch, 3, Sacch8(7), 3), // 8
    f(Sdcch8(3), 0, Idle, 0), f(Sdcch8(3), 1, Idle, 0), f(Sdcch8(3), 2, Idle, 0), f(Sdcch8(3), 3, Sdcch8(0), 0), // 12
    f(Sdcch8(4), 0, Sdcch8(0), 1), f(Sdcch8(4), 1, Sdcch8(0), 2), f(Sdcch8(4), 2, Sdcch8(0), 3), f(Sdcch8(4), 3, Sdcch8(1), 0), // 16
    f(Sdcch8(5), 0, Sdcch8(1), 1), f(Sdcch8(5), 1, Sdcch8(1), 2), f(Sdcch8(5), 2, Sdcch8(1), 3), f(Sdcch8(5), 3, Idle, 0), // 20
    f(Sdcch8(6), 0, Idle, 0), f(Sdcch8(6), 1, Idle, 0), f(Sdcch8(6), 2, Idle, 0), f(Sdcch8(6), 3, Sdcch8(3), 0), // 24
    f(Sdcch8(7), 0, Sdcch8(3), 1), f(Sdcch8(7), 1, Sdcch8(3), 2), f(Sdcch8(7), 2, Sdcch8(3), 3), f(Sdcch8(7), 3, Sdcch8(4), 0), // 28
    f(Sacch8(0), 0, Sdcch8(4), 1), f(Sacch8(0), 1, Sdcch8(4), 2), f(Sacch8(0), 2, Sdcch8(4), 3), f(Sacch8(0), 3, Sdcch8(5), 0), // 32
    f(Sacch8(1), 0, Sdcch8(5), 1), f(Sacch8(1), 1, Sdcch8(5), 2), f(Sacch8(1), 2, Sdcch8(5), 3), f(Sacch8(1), 3, Sdcch8(6), 0), // 36
    f(Idle, 0, Sdcch8(6), 1), f(Idle, 0, Sdcch8(6), 2), f(Idle, 0, Sdcch8(6), 3), f(Idle, 0, Sdcch8(7), 0), // 40
    f(Sacch8(3), 0, Sdcch8(7), 1), f(Sacch8(3), 1, Sdcch8(7), 2), f(Sacch8(3), 2, Sdcch8(7), 3), f(Sacch8(3), 3, Sacch8(0), 0), // 44
    f(Idle, 0, Sacch8(0), 1), f(Idle, 0, Sacch8(0), 2), f(Idle, 0, Sacch8(0), 3), f(Sdcch8(0), 0, Sacch8(1), 0), // 48
    f(Sdcch8(0), 1, Sacch8(1), 1), f(Sdcch8(0), 2, Sacch8(1), 2), f(Sdcch8(0), 3, Sacch8(1), 3), f(Sdcch8(1), 0, Idle, 0), // 52
    f(Sdcch8(1), 1, Idle, 0), f(Sdcch8(1), 2, Idle, 0), f(Sdcch8(1), 3, Idle, 0), f(Cbch, 0, Sacch8(3), 0), // 56
    f(Cbch, 1, Sacch8(3), 1), f(Cbch, 2, Sacch8(3), 2), f(Cbch, 3, Sacch8(3), 3), f(Sdcch8(3), 0, Idle, 0), // 60
    f(Sdcch8(3), 1, Idle, 0), f(Sdcch8(3), 2, Idle, 0), f(Sdcch8(3), 3, Sdcch8(0), 0), f(Sdcch8(4), 0, Sdcch8(0), 1), // 64
    f(Sdcch8(4), 1, Sdcch8(0), 2), f(Sdcch8(4), 2, Sdcch8(0), 3), f(Sdcch8(4), 3, Sdcch8(1), 0), f(Sdcch8(5), 0, Sdcch8(1), 1), // 68
    f(Sdcch8(5), 1, Sdcch8(1), 2), f(Sdcch8(5), 2, Sdcch8(1), 3), f(Sdcch8(5), 3, Idle, 0), f(Sdcch8(6), 0, Idle, 0), // 72
    f(Sdcch8(6), 1, Idle, 0), f(Sdcch8(6), 2, Idle, 0), f(Sdcch8(6), 3, Sdcch8(3), 0), f(Sdcch8(7), 0, Sdcch8(3), 1), // 76
    f(Sdcch8(7), 1, Sdcch8(3), 2), f(Sdcch8(7), 2, Sdcch8(3), 3), f(Sdcch8(7), 3, Sdcch8(4), 0), f(Sacch8(4), 0, Sdcch8(4), 1), // 80
    f(Sacch8(4), 1, Sdcch8(4), 2), f(Sacch8(4), 2, Sdcch8(4), 3), f(Sacch8(4), 3, Sdcch8(5), 0), f(Sacch8(5), 0, Sdcch8(5), 1), // 84
    f(Sacch8(5), 1, Sdcch8(5), 2), f(Sacch8(5), 2, Sdcch8(5), 3), f(Sacch8(5), 3, Sdcch8(6), 0), f(Sacch8(6), 0, Sdcch8(6), 1), // 88
    f(Sacch8(6), 1, Sdcch8(6), 2), f(Sacch8(6), 2, Sdcch8(6), 3), f(Sacch8(6), 3, Sdcch8(7), 0), f(Sacch8(7), 0, Sdcch8(7), 1), // 92
    f(Sacch8(7), 1, Sdcch8(7), 2), f(Sacch8(7), 2, Sdcch8(7), 3), f(Sacch8(7), 3, Sacch8(4), 0), f(Idle, 0, Sacch8(4), 1), // 96
    f(Idle, 0, Sacch8(4), 2), f(Idle, 0, Sacch8(4), 3), // 100
];

/// TCH/F on TN 0, SACCH/TF block B0 at fn % 104 = 12
static FRAME_TCHF_TS0: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 100
];

/// TCH/F on TN 1, SACCH/TF block B0 at fn % 104 = 25
static FRAME_TCHF_TS1: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), // 100
];

/// TCH/F on TN 2, SACCH/TF block B0 at fn % 104 = 38
static FRAME_TCHF_TS2: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 100
];

/// TCH/F on TN 3, SACCH/TF block B0 at fn % 104 = 51
static FRAME_TCHF_TS3: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), // 100
];

/// TCH/F on TN 4, SACCH/TF block B0 at fn % 104 = 64
static FRAME_TCHF_TS4: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 100
];

/// TCH/F on TN 5, SACCH/TF block B0 at fn % 104 = 77
static FRAME_TCHF_TS5: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), // 100
];

/// TCH/F on TN 6, SACCH/TF block B0 at fn % 104 = 90
static FRAME_TCHF_TS6: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), // 100
];

/// TCH/F on TN 7, SACCH/TF block B0 at fn % 104 = 103
static FRAME_TCHF_TS7: [MfFrame; 104] = [
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 0
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 4
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 8
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 12
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 16
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 20
    f(TchF, 3, TchF, 3), f(SacchTf, 1, SacchTf, 1), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 24
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 28
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 32
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 36
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 40
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 44
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 2, SacchTf, 2), // 48
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 52
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 56
    f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), // 60
    f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 64
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 68
    f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), // 72
    f(TchF, 3, TchF, 3), f(SacchTf, 3, SacchTf, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 76
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 80
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), f(TchF, 1, TchF, 1), // 84
    f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(Idle, 0, Idle, 0), f(TchF, 0, TchF, 0), // 88
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 92
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(TchF, 0, TchF, 0), // 96
    f(TchF, 1, TchF, 1), f(TchF, 2, TchF, 2), f(TchF, 3, TchF, 3), f(SacchTf, 0, SacchTf, 0), // 100
];

/// TCH/H on TN 0 and 1
static FRAME_TCHH_TS01: [MfFrame; 104] = [
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 0
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 4
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 8
    f(SacchTh(0), 0, SacchTh(0), 0), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 12
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 16
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 20
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 0, SacchTh(1), 0), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 24
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 28
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 32
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 1, SacchTh(0), 1), f(TchH(0), 0, TchH(0), 0), // 36
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 40
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 44
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 1, SacchTh(1), 1), // 48
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 52
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 56
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 60
    f(SacchTh(0), 2, SacchTh(0), 2), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 64
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 68
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 72
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 2, SacchTh(1), 2), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 76
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 80
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 84
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 3, SacchTh(0), 3), f(TchH(0), 0, TchH(0), 0), // 88
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 92
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 96
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 3, SacchTh(1), 3), // 100
];

/// TCH/H on TN 2 and 3
static FRAME_TCHH_TS23: [MfFrame; 104] = [
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 0
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 4
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 8
    f(SacchTh(0), 3, SacchTh(0), 3), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 12
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 16
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 20
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 3, SacchTh(1), 3), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 24
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 28
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 32
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 0, SacchTh(0), 0), f(TchH(0), 0, TchH(0), 0), // 36
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 40
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 44
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 0, SacchTh(1), 0), // 48
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 52
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 56
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 60
    f(SacchTh(0), 1, SacchTh(0), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 64
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 68
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 72
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 1, SacchTh(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 76
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 80
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 84
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 2, SacchTh(0), 2), f(TchH(0), 0, TchH(0), 0), // 88
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 92
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 96
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 2, SacchTh(1), 2), // 100
];

/// TCH/H on TN 4 and 5
static FRAME_TCHH_TS45: [MfFrame; 104] = [
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 0
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 4
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 8
    f(SacchTh(0), 2, SacchTh(0), 2), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 12
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 16
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 20
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 2, SacchTh(1), 2), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 24
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 28
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 32
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 3, SacchTh(0), 3), f(TchH(0), 0, TchH(0), 0), // 36
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 40
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 44
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 3, SacchTh(1), 3), // 48
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 52
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 56
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 60
    f(SacchTh(0), 0, SacchTh(0), 0), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 64
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 68
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 72
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 0, SacchTh(1), 0), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 76
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 80
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 84
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 1, SacchTh(0), 1), f(TchH(0), 0, TchH(0), 0), // 88
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 92
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 96
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 1, SacchTh(1), 1), // 100
];

/// TCH/H on TN 6 and 7
static FRAME_TCHH_TS67: [MfFrame; 104] = [
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 0
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 4
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 8
    f(SacchTh(0), 1, SacchTh(0), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 12
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 16
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 20
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 1, SacchTh(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 24
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 28
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 32
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 2, SacchTh(0), 2), f(TchH(0), 0, TchH(0), 0), // 36
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 40
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 44
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 2, SacchTh(1), 2), // 48
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 52
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 56
    f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), // 60
    f(SacchTh(0), 3, SacchTh(0), 3), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 64
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 68
    f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), // 72
    f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 3, SacchTh(1), 3), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 76
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 80
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), f(TchH(1), 0, TchH(1), 0), // 84
    f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(0), 0, SacchTh(0), 0), f(TchH(0), 0, TchH(0), 0), // 88
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 92
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(TchH(0), 0, TchH(0), 0), // 96
    f(TchH(1), 0, TchH(1), 0), f(TchH(0), 1, TchH(0), 1), f(TchH(1), 1, TchH(1), 1), f(SacchTh(1), 0, SacchTh(1), 0), // 100
];

/// PDCH, 52-multiframe with PTCCH, doubled for the PTCCH/D cycle
static FRAME_PDCH: [MfFrame; 104] = [
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 0
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 4
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 8
    f(Ptcch, 0, Ptcch, 0), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 12
    f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 16
    f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 20
    f(Pdtch, 3, Pdtch, 3), f(Idle, 0, Idle, 0), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 24
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 28
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 32
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Ptcch, 1, Ptcch, 1), f(Pdtch, 0, Pdtch, 0), // 36
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), // 40
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), // 44
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Idle, 0, Idle, 0), // 48
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 52
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 56
    f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), // 60
    f(Ptcch, 2, Ptcch, 2), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 64
    f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 68
    f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), // 72
    f(Pdtch, 3, Pdtch, 3), f(Idle, 0, Idle, 0), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 76
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 80
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), f(Pdtch, 1, Pdtch, 1), // 84
    f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Ptcch, 3, Ptcch, 3), f(Pdtch, 0, Pdtch, 0), // 88
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), // 92
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Pdtch, 0, Pdtch, 0), // 96
    f(Pdtch, 1, Pdtch, 1), f(Pdtch, 2, Pdtch, 2), f(Pdtch, 3, Pdtch, 3), f(Idle, 0, Idle, 0), // 100
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PCHAN: [PhysChanConfig; 8] = [
        PhysChanConfig::Ccch,
        PhysChanConfig::CcchSdcch4,
        PhysChanConfig::CcchSdcch4Cbch,
        PhysChanConfig::Sdcch8,
        PhysChanConfig::Sdcch8Cbch,
        PhysChanConfig::TchF,
        PhysChanConfig::TchH,
        PhysChanConfig::Pdch,
    ];

    /// Number of bursts per block for a channel
    fn block_len(chan: TrxChan) -> u8 {
        match chan {
            Idle | Fcch | Sch | Rach => 1,
            TchH(_) => 2,
            _ => 4,
        }
    }

    #[test]
    fn test_period_matches_layout() {
        for mf in MULTIFRAMES {
            assert_eq!(mf.period as usize, mf.frames.len(), "layout {}", mf.name);
        }
    }

    #[test]
    fn test_at_most_one_descriptor() {
        for pchan in ALL_PCHAN {
            for tn in 0..8u8 {
                let n = MULTIFRAMES.iter().filter(|mf| mf.pchan == pchan && mf.slotmask & (1 << tn) != 0).count();
                assert!(n <= 1, "{:?} on tn {} matches {} layouts", pchan, tn, n);
            }
        }
        assert!(find_mframe(PhysChanConfig::Ccch, 1).is_none());
        assert!(find_mframe(PhysChanConfig::None, 0).is_none());
        assert!(find_mframe(PhysChanConfig::TchF, 8).is_none());
    }

    #[test]
    fn test_resolve_is_periodic() {
        for pchan in ALL_PCHAN {
            for tn in 0..8u8 {
                let Some(mf) = find_mframe(pchan, tn) else { continue };
                for fn_num in (0..5000u32).step_by(7) {
                    assert_eq!(resolve(pchan, tn, fn_num), resolve(pchan, tn, fn_num + mf.period));
                }
            }
        }
    }

    #[test]
    fn test_only_standard_idle_frames() {
        for mf in MULTIFRAMES {
            let idle: Vec<usize> = mf.frames.iter().enumerate()
                .filter(|(_, fr)| fr.dl_chan == Idle && fr.ul_chan == Idle)
                .map(|(i, _)| i)
                .collect();
            let expected: Vec<usize> = match mf.pchan {
                PhysChanConfig::CcchSdcch4Cbch => vec![50, 101],
                PhysChanConfig::TchF if mf.slotmask & 0x55 != 0 => vec![25, 51, 77, 103],
                PhysChanConfig::TchF => vec![12, 38, 64, 90],
                PhysChanConfig::Pdch => vec![25, 51, 77, 103],
                _ => vec![],
            };
            assert_eq!(idle, expected, "layout {} mask {:02x}", mf.name, mf.slotmask);
        }
    }

    #[test]
    fn test_blocks_are_complete() {
        for mf in MULTIFRAMES {
            for dir in 0..2 {
                let mut next_bid = std::collections::HashMap::new();
                // Walk twice so blocks wrapping the period end are seen whole
                for i in 0..2 * mf.frames.len() {
                    let fr = &mf.frames[i % mf.frames.len()];
                    let (chan, bid) = if dir == 0 { (fr.dl_chan, fr.dl_bid) } else { (fr.ul_chan, fr.ul_bid) };
                    let len = block_len(chan);
                    if len == 1 {
                        assert_eq!(bid, 0);
                        continue;
                    }
                    if let Some(expected) = next_bid.get(&chan) {
                        assert_eq!(bid, *expected, "layout {} frame {} chan {:?}", mf.name, i, chan);
                    }
                    next_bid.insert(chan, (bid + 1) % len);
                }
            }
        }
    }

    #[test]
    fn test_combined_ccch_pattern() {
        let mf = find_mframe(PhysChanConfig::CcchSdcch4, 0).unwrap();
        let dl: Vec<TrxChan> = (0..51).map(|i| mf.frame(i).dl_chan).collect();
        for i in [0usize, 10, 20, 30, 40] {
            assert_eq!(dl[i], Fcch);
            assert_eq!(dl[i + 1], Sch);
        }
        assert_eq!(&dl[2..6], &[Bcch; 4]);
        assert_eq!(&dl[6..10], &[Ccch; 4]);
        assert_eq!(&dl[22..26], &[Sdcch4(0); 4]);
        assert_eq!(dl[50], Idle);
        assert_eq!(mf.frame(4).ul_chan, Rach);
        assert_eq!(mf.frame(37).ul_chan, Sdcch4(0));
    }
}
