//! RSL channel number and link identifier helpers (TS 08.58 clause 9.3.1 and 9.3.2)
//!
//! The channel number carries the C-bits in bits 7..3 and the timeslot in bits 2..0.

/// Bm + ACCHs (TCH/F)
pub const RSL_CHAN_BM_ACCHS: u8 = 0x08;
/// Lm + ACCHs (TCH/H), subchannel in bit 3
pub const RSL_CHAN_LM_ACCHS: u8 = 0x10;
/// SDCCH/4 + ACCH, subchannel in bits 4..3
pub const RSL_CHAN_SDCCH4_ACCH: u8 = 0x20;
/// SDCCH/8 + ACCH, subchannel in bits 5..3
pub const RSL_CHAN_SDCCH8_ACCH: u8 = 0x40;
pub const RSL_CHAN_BCCH: u8 = 0x80;
pub const RSL_CHAN_RACH: u8 = 0x88;
pub const RSL_CHAN_PCH_AGCH: u8 = 0x90;
/// Packet data, non-standard value as used towards the PCU
pub const RSL_CHAN_OSMO_PDCH: u8 = 0xc0;
/// Cell broadcast, non-standard value
pub const RSL_CHAN_OSMO_CBCH4: u8 = 0xc8;

/// Main signalling link (SDCCH or FACCH)
pub const LID_DEDIC: u8 = 0x00;
/// SACCH
pub const LID_SACCH: u8 = 0x40;

#[inline]
pub fn chan_nr_tn(chan_nr: u8) -> u8 {
    chan_nr & 0x07
}

/// Channel number with the timeslot bits cleared
#[inline]
pub fn chan_nr_cbits(chan_nr: u8) -> u8 {
    chan_nr & 0xf8
}

#[inline]
pub fn link_is_sacch(link_id: u8) -> bool {
    link_id & 0xc0 == LID_SACCH
}

#[inline]
pub fn chan_is_tchf(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_BM_ACCHS
}

#[inline]
pub fn chan_is_tchh(chan_nr: u8) -> bool {
    chan_nr & 0xf0 == RSL_CHAN_LM_ACCHS
}

#[inline]
pub fn chan_is_sdcch4(chan_nr: u8) -> bool {
    chan_nr & 0xe0 == RSL_CHAN_SDCCH4_ACCH
}

#[inline]
pub fn chan_is_sdcch8(chan_nr: u8) -> bool {
    chan_nr & 0xc0 == RSL_CHAN_SDCCH8_ACCH
}

#[inline]
pub fn chan_is_rach(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_RACH
}

#[inline]
pub fn chan_is_bcch(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_BCCH
}

#[inline]
pub fn chan_is_pch_agch(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_PCH_AGCH
}

#[inline]
pub fn chan_is_cbch(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_OSMO_CBCH4
}

#[inline]
pub fn chan_is_pdch(chan_nr: u8) -> bool {
    chan_nr_cbits(chan_nr) == RSL_CHAN_OSMO_PDCH
}

/// True for dedicated channels that can carry a handover access burst
#[inline]
pub fn chan_is_dedicated(chan_nr: u8) -> bool {
    chan_is_tchf(chan_nr) || chan_is_tchh(chan_nr) || chan_is_sdcch4(chan_nr) || chan_is_sdcch8(chan_nr)
}

/// Subchannel (lchan index) within the timeslot
pub fn chan_nr_ss(chan_nr: u8) -> u8 {
    if chan_is_tchh(chan_nr) {
        (chan_nr >> 3) & 0x01
    } else if chan_is_sdcch4(chan_nr) {
        (chan_nr >> 3) & 0x03
    } else if chan_is_sdcch8(chan_nr) {
        (chan_nr >> 3) & 0x07
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chan_nr_classification() {
        assert!(chan_is_tchf(0x0b));
        assert!(chan_is_tchh(0x18 | 2));
        assert_eq!(chan_nr_ss(0x18 | 2), 1);
        assert!(chan_is_sdcch4(0x38));
        assert_eq!(chan_nr_ss(0x38), 3);
        assert!(chan_is_sdcch8(0x7f));
        assert_eq!(chan_nr_ss(0x7f), 7);
        assert_eq!(chan_nr_tn(0x7f), 7);
        assert!(chan_is_rach(0x88));
        assert!(!chan_is_dedicated(0x88));
        assert!(link_is_sacch(0x40));
        assert!(!link_is_sacch(0x00));
    }
}
