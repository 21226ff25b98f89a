//! Logical channel types and their dispatch descriptors

use core::fmt;

use gsm_core::chan_nr::*;

/// Logical channel types scheduled on a timeslot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrxChan {
    Idle,
    Fcch,
    Sch,
    Bcch,
    Rach,
    Ccch,
    TchF,
    /// TCH/H subchannel 0 or 1
    TchH(u8),
    /// SDCCH/4 subchannel 0..=3
    Sdcch4(u8),
    /// SDCCH/8 subchannel 0..=7
    Sdcch8(u8),
    SacchTf,
    SacchTh(u8),
    Sacch4(u8),
    Sacch8(u8),
    Pdtch,
    Ptcch,
    Cbch,
}

/// Number of distinct logical channel types, the size of dense per-channel arrays
pub const NUM_TRX_CHAN: usize = 39;

impl TrxChan {
    /// Dense index, 0..NUM_TRX_CHAN
    pub const fn index(self) -> usize {
        match self {
            TrxChan::Idle => 0,
            TrxChan::Fcch => 1,
            TrxChan::Sch => 2,
            TrxChan::Bcch => 3,
            TrxChan::Rach => 4,
            TrxChan::Ccch => 5,
            TrxChan::TchF => 6,
            TrxChan::TchH(ss) => 7 + (ss as usize & 1),
            TrxChan::Sdcch4(ss) => 9 + (ss as usize & 3),
            TrxChan::Sdcch8(ss) => 13 + (ss as usize & 7),
            TrxChan::SacchTf => 21,
            TrxChan::SacchTh(ss) => 22 + (ss as usize & 1),
            TrxChan::Sacch4(ss) => 24 + (ss as usize & 3),
            TrxChan::Sacch8(ss) => 28 + (ss as usize & 7),
            TrxChan::Pdtch => 36,
            TrxChan::Ptcch => 37,
            TrxChan::Cbch => 38,
        }
    }

    pub const fn from_index(idx: usize) -> Option<TrxChan> {
        let chan = match idx {
            0 => TrxChan::Idle,
            1 => TrxChan::Fcch,
            2 => TrxChan::Sch,
            3 => TrxChan::Bcch,
            4 => TrxChan::Rach,
            5 => TrxChan::Ccch,
            6 => TrxChan::TchF,
            7..=8 => TrxChan::TchH((idx - 7) as u8),
            9..=12 => TrxChan::Sdcch4((idx - 9) as u8),
            13..=20 => TrxChan::Sdcch8((idx - 13) as u8),
            21 => TrxChan::SacchTf,
            22..=23 => TrxChan::SacchTh((idx - 22) as u8),
            24..=27 => TrxChan::Sacch4((idx - 24) as u8),
            28..=35 => TrxChan::Sacch8((idx - 28) as u8),
            36 => TrxChan::Pdtch,
            37 => TrxChan::Ptcch,
            38 => TrxChan::Cbch,
            _ => return None,
        };
        Some(chan)
    }

    pub fn all() -> impl Iterator<Item = TrxChan> {
        (0..NUM_TRX_CHAN).filter_map(TrxChan::from_index)
    }

    pub fn is_sacch(self) -> bool {
        matches!(self, TrxChan::SacchTf | TrxChan::SacchTh(_) | TrxChan::Sacch4(_) | TrxChan::Sacch8(_))
    }

    pub fn is_tch(self) -> bool {
        matches!(self, TrxChan::TchF | TrxChan::TchH(_))
    }

    pub fn desc(self) -> ChanDesc {
        chan_desc(self)
    }
}

impl fmt::Display for TrxChan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", chan_desc(*self).name)
    }
}

/// Ready-to-send behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtsKind {
    None,
    /// PH-RTS for a signalling or packet data block
    Data,
    /// PH-RTS for FACCH/F on every block, TCH-RTS in speech mode
    TchF,
    /// PH-RTS for FACCH/H on blocks where it may start, TCH-RTS in speech mode
    TchH,
}

/// Downlink burst production
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlKind {
    None,
    Idle,
    Fcch,
    Sch,
    /// xCCH, four bursts from one 23 byte block
    Data,
    Pdtch,
    TchF,
    TchH,
}

/// Uplink burst consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlKind {
    None,
    Rach,
    Data,
    Pdtch,
    TchF,
    TchH,
}

/// Dispatch descriptor of a logical channel
#[derive(Debug, Clone, Copy)]
pub struct ChanDesc {
    pub name: &'static str,
    /// RSL channel number with the timeslot bits cleared
    pub chan_nr: u8,
    pub link_id: u8,
    /// Only schedulable on a PDCH timeslot
    pub pdch: bool,
    /// Active without an explicit activation
    pub auto_active: bool,
    pub rts: RtsKind,
    pub dl: DlKind,
    pub ul: UlKind,
}

const SDCCH4_NAMES: [&str; 4] = ["SDCCH/4(0)", "SDCCH/4(1)", "SDCCH/4(2)", "SDCCH/4(3)"];
const SACCH4_NAMES: [&str; 4] = ["SACCH/4(0)", "SACCH/4(1)", "SACCH/4(2)", "SACCH/4(3)"];
const SDCCH8_NAMES: [&str; 8] = [
    "SDCCH/8(0)", "SDCCH/8(1)", "SDCCH/8(2)", "SDCCH/8(3)",
    "SDCCH/8(4)", "SDCCH/8(5)", "SDCCH/8(6)", "SDCCH/8(7)",
];
const SACCH8_NAMES: [&str; 8] = [
    "SACCH/8(0)", "SACCH/8(1)", "SACCH/8(2)", "SACCH/8(3)",
    "SACCH/8(4)", "SACCH/8(5)", "SACCH/8(6)", "SACCH/8(7)",
];

const fn desc(
    name: &'static str,
    chan_nr: u8,
    link_id: u8,
    auto_active: bool,
    rts: RtsKind,
    dl: DlKind,
    ul: UlKind,
) -> ChanDesc {
    ChanDesc { name, chan_nr, link_id, pdch: false, auto_active, rts, dl, ul }
}

/// Descriptor table lookup
pub fn chan_desc(chan: TrxChan) -> ChanDesc {
    use DlKind as D;
    use RtsKind as R;
    use UlKind as U;
    match chan {
        TrxChan::Idle => desc("IDLE", 0, LID_DEDIC, true, R::None, D::Idle, U::None),
        TrxChan::Fcch => desc("FCCH", 0, LID_DEDIC, true, R::None, D::Fcch, U::None),
        TrxChan::Sch => desc("SCH", 0, LID_DEDIC, true, R::None, D::Sch, U::None),
        TrxChan::Bcch => desc("BCCH", RSL_CHAN_BCCH, LID_DEDIC, true, R::Data, D::Data, U::None),
        TrxChan::Rach => desc("RACH", RSL_CHAN_RACH, LID_DEDIC, true, R::None, D::None, U::Rach),
        TrxChan::Ccch => desc("CCCH", RSL_CHAN_PCH_AGCH, LID_DEDIC, true, R::Data, D::Data, U::None),
        TrxChan::TchF => desc("TCH/F", RSL_CHAN_BM_ACCHS, LID_DEDIC, false, R::TchF, D::TchF, U::TchF),
        TrxChan::TchH(ss) => desc(
            if ss & 1 == 0 { "TCH/H(0)" } else { "TCH/H(1)" },
            RSL_CHAN_LM_ACCHS | (ss & 1) << 3, LID_DEDIC, false, R::TchH, D::TchH, U::TchH,
        ),
        TrxChan::Sdcch4(ss) => desc(
            SDCCH4_NAMES[(ss & 3) as usize],
            RSL_CHAN_SDCCH4_ACCH | (ss & 3) << 3, LID_DEDIC, false, R::Data, D::Data, U::Data,
        ),
        TrxChan::Sdcch8(ss) => desc(
            SDCCH8_NAMES[(ss & 7) as usize],
            RSL_CHAN_SDCCH8_ACCH | (ss & 7) << 3, LID_DEDIC, false, R::Data, D::Data, U::Data,
        ),
        TrxChan::SacchTf => desc("SACCH/TF", RSL_CHAN_BM_ACCHS, LID_SACCH, false, R::Data, D::Data, U::Data),
        TrxChan::SacchTh(ss) => desc(
            if ss & 1 == 0 { "SACCH/TH(0)" } else { "SACCH/TH(1)" },
            RSL_CHAN_LM_ACCHS | (ss & 1) << 3, LID_SACCH, false, R::Data, D::Data, U::Data,
        ),
        TrxChan::Sacch4(ss) => desc(
            SACCH4_NAMES[(ss & 3) as usize],
            RSL_CHAN_SDCCH4_ACCH | (ss & 3) << 3, LID_SACCH, false, R::Data, D::Data, U::Data,
        ),
        TrxChan::Sacch8(ss) => desc(
            SACCH8_NAMES[(ss & 7) as usize],
            RSL_CHAN_SDCCH8_ACCH | (ss & 7) << 3, LID_SACCH, false, R::Data, D::Data, U::Data,
        ),
        TrxChan::Pdtch => ChanDesc {
            pdch: true,
            ..desc("PDTCH", RSL_CHAN_OSMO_PDCH, LID_DEDIC, false, R::Data, D::Pdtch, U::Pdtch)
        },
        TrxChan::Ptcch => ChanDesc {
            pdch: true,
            ..desc("PTCCH", RSL_CHAN_OSMO_PDCH, LID_DEDIC, false, R::Data, D::Data, U::Data)
        },
        TrxChan::Cbch => desc("CBCH", RSL_CHAN_OSMO_CBCH4, LID_DEDIC, true, R::Data, D::Data, U::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let mut seen = [false; NUM_TRX_CHAN];
        for chan in TrxChan::all() {
            assert_eq!(TrxChan::from_index(chan.index()), Some(chan));
            assert!(!seen[chan.index()]);
            seen[chan.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(TrxChan::from_index(NUM_TRX_CHAN), None);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(TrxChan::Sdcch8(5).desc().chan_nr, 0x68);
        assert_eq!(TrxChan::Sacch4(2).desc().link_id, LID_SACCH);
        assert_eq!(TrxChan::Sacch4(2).desc().chan_nr, 0x30);
        assert_eq!(TrxChan::TchH(1).desc().chan_nr, 0x18);
        assert_eq!(TrxChan::TchH(1).to_string(), "TCH/H(1)");
        assert!(TrxChan::Cbch.desc().auto_active);
        assert!(!TrxChan::TchF.desc().auto_active);
        assert!(TrxChan::Ptcch.desc().pdch);
        assert_eq!(TrxChan::Ccch.desc().ul, UlKind::None);
    }
}
