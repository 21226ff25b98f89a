//! Fixed burst patterns and burst assembly
//!
//! Normal burst layout (148 bits): 3 tail, 57 data, 1 stealing flag, 26 training,
//! 1 stealing flag, 57 data, 3 tail. The 116 coded bits of one burst therefore
//! map to bits 3..61 and 87..145.

use gsm_core::{Sbit, Ubit, EGPRS_BURST_LEN, GSM_BURST_LEN};

/// Coded bits carried by one GMSK normal burst
pub const BURST_CODED_BITS: usize = 116;
/// Coded bits carried by one 8PSK normal burst
pub const EGPRS_BURST_CODED_BITS: usize = 348;
/// Coded bits of the synchronisation burst
pub const SCH_CODED_BITS: usize = 78;
/// Coded bits of an access burst
pub const RACH_CODED_BITS: usize = 36;
/// Offset of the encrypted bits within an access burst (8 tail + 41 sync)
pub const RACH_DATA_OFFSET: usize = 49;

/// Dummy burst (TS 05.02 clause 5.2.6)
pub static DUMMY_BURST: [Ubit; GSM_BURST_LEN] = [
    0, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1,
    1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1,
    1, 0, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 0, 1,
    0, 1, 0, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0,
    0, 0, 1, 0, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 0, 0, 0,
];

/// Normal burst training sequences (TS 05.02 clause 5.2.3)
pub static TSC: [[Ubit; 26]; 8] = [
    [0, 0, 1, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1],
    [0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1],
    [0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 1, 1, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 1, 0],
    [0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 1],
    [0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0],
    [1, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 0, 0, 1, 0, 1, 0, 0, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0, 0],
];

/// 8PSK training sequences, one bit triple per symbol (TS 05.02 clause 5.2.3)
pub static EGPRS_TSC: [[Ubit; 78]; 8] = [
    [
        1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0,
        1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
        1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1,
    ],
    [
        1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0,
        1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
        1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1,
    ],
    [
        1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0,
        1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0,
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1,
    ],
    [
        1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0,
        1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0,
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1,
    ],
    [
        1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0,
        1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1,
    ],
    [
        1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0,
        1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0,
        0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1,
    ],
    [
        0, 0, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0,
        1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1,
        1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1,
    ],
    [
        0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1,
        1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0,
        0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 1, 1,
    ],
];

/// Extended training sequence of the synchronisation burst (TS 05.02 clause 5.2.5)
pub static SCH_TRAIN: [Ubit; 64] = [
    1, 0, 1, 1, 1, 0, 0, 1, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1,
    0, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1,
];

/// Frequency correction burst: all zeros
pub fn fcch_burst() -> Vec<Ubit> {
    vec![0; GSM_BURST_LEN]
}

pub fn dummy_burst() -> Vec<Ubit> {
    DUMMY_BURST.to_vec()
}

/// Builds a GMSK normal burst from 116 coded bits
pub fn normal_burst(coded: &[Ubit], tsc: u8) -> Vec<Ubit> {
    debug_assert_eq!(coded.len(), BURST_CODED_BITS);
    let mut bits = vec![0; GSM_BURST_LEN];
    bits[3..61].copy_from_slice(&coded[0..58]);
    bits[61..87].copy_from_slice(&TSC[(tsc & 7) as usize]);
    bits[87..145].copy_from_slice(&coded[58..116]);
    bits
}

/// Builds an 8PSK normal burst from 348 coded bits
pub fn egprs_burst(coded: &[Ubit], tsc: u8) -> Vec<Ubit> {
    debug_assert_eq!(coded.len(), EGPRS_BURST_CODED_BITS);
    let mut bits = vec![1; EGPRS_BURST_LEN];
    bits[9..183].copy_from_slice(&coded[0..174]);
    bits[183..261].copy_from_slice(&EGPRS_TSC[(tsc & 7) as usize]);
    bits[261..435].copy_from_slice(&coded[174..348]);
    bits
}

/// Builds the synchronisation burst from 78 coded bits
pub fn sch_burst(coded: &[Ubit]) -> Vec<Ubit> {
    debug_assert_eq!(coded.len(), SCH_CODED_BITS);
    let mut bits = vec![0; GSM_BURST_LEN];
    bits[3..42].copy_from_slice(&coded[0..39]);
    bits[42..106].copy_from_slice(&SCH_TRAIN);
    bits[106..145].copy_from_slice(&coded[39..78]);
    bits
}

/// Extracts the 116 coded soft bits of a received GMSK normal burst
pub fn normal_burst_coded(bits: &[Sbit], out: &mut [Sbit]) {
    out[0..58].copy_from_slice(&bits[3..61]);
    out[58..116].copy_from_slice(&bits[87..145]);
}

/// Extracts the 348 coded soft bits of a received 8PSK normal burst
pub fn egprs_burst_coded(bits: &[Sbit], out: &mut [Sbit]) {
    out[0..174].copy_from_slice(&bits[9..183]);
    out[174..348].copy_from_slice(&bits[261..435]);
}

/// Applies a 114 bit keystream to the data bits of a downlink burst
pub fn encrypt_burst(bits: &mut [Ubit], ks: &[Ubit; 114]) {
    for i in 0..57 {
        bits[i + 3] ^= ks[i];
        bits[i + 88] ^= ks[i + 57];
    }
}

/// Removes a 114 bit keystream from the soft data bits of an uplink burst
pub fn decrypt_burst(bits: &mut [Sbit], ks: &[Ubit; 114]) {
    for i in 0..57 {
        if ks[i] != 0 {
            bits[i + 3] = bits[i + 3].saturating_neg();
        }
        if ks[i + 57] != 0 {
            bits[i + 88] = bits[i + 88].saturating_neg();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_burst_layout() {
        let coded: Vec<Ubit> = (0..116).map(|i| (i % 2) as Ubit).collect();
        let b = normal_burst(&coded, 3);
        assert_eq!(b.len(), GSM_BURST_LEN);
        assert_eq!(&b[0..3], &[0, 0, 0]);
        assert_eq!(&b[145..148], &[0, 0, 0]);
        assert_eq!(&b[61..87], &TSC[3]);
        let soft: Vec<Sbit> = b.iter().map(|&x| if x == 1 { -127 } else { 127 }).collect();
        let mut out = [0 as Sbit; 116];
        normal_burst_coded(&soft, &mut out);
        for (i, s) in out.iter().enumerate() {
            assert_eq!(*s < 0, coded[i] == 1);
        }
    }

    #[test]
    fn test_cipher_roundtrip() {
        let coded = vec![0; 116];
        let mut b = normal_burst(&coded, 0);
        let mut ks = [0u8; 114];
        ks[0] = 1;
        ks[60] = 1;
        encrypt_burst(&mut b, &ks);
        assert_eq!(b[3], 1);
        assert_eq!(b[91], 1);
        // Training sequence and stealing flags untouched
        assert_eq!(&b[61..87], &TSC[0]);

        let mut soft: Vec<Sbit> = b.iter().map(|&x| if x == 1 { -127 } else { 127 }).collect();
        decrypt_burst(&mut soft, &ks);
        assert!(soft[3] > 0);
        assert!(soft[91] > 0);
    }
}
