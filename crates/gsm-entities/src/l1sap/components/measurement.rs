//! Uplink measurement aggregation per reporting period (TS 45.008 clauses 8.2 to 8.4)

use gsm_core::{PhysChanConfig, Tn};
use gsm_saps::control::enums::chan_mode::TchMode;
use gsm_saps::rsl::UlMeasResult;

use crate::l1sched::mframe::resolve;

/// Frames counted into the SUB values on TCH/F with DTX (fn % 104)
const SUB_TCH_F: [u32; 8] = [52, 53, 54, 55, 56, 57, 58, 59];
const SUB_TCH_H0: [u32; 8] = [0, 2, 4, 6, 52, 54, 56, 58];
const SUB_TCH_H1: [u32; 8] = [14, 16, 18, 29, 66, 68, 70, 72];

/// SACCH block (fn % 104) that closes the reporting period, per timeslot
const TCHF_PERIOD_END: [u32; 8] = [12, 25, 38, 51, 64, 77, 90, 103];
const TCHH0_PERIOD_END: [u32; 8] = [12, 12, 38, 38, 64, 64, 90, 90];
const TCHH1_PERIOD_END: [u32; 8] = [25, 25, 51, 51, 77, 77, 103, 103];

/// First frame (fn % 102) of the last block in the reporting period, per subchannel
const SDCCH8_PERIOD_END: [u32; 8] = [66, 70, 74, 78, 98, 0, 4, 8];
const SDCCH4_PERIOD_END: [u32; 4] = [88, 92, 6, 10];

/// Samples expected in one period
pub const TCH_EXPECTED_SAMPLES: usize = 25;
pub const SDCCH_EXPECTED_SAMPLES: usize = 3;

/// Values substituted for samples that never arrived
const MISSING_BER10K: u16 = 10000;
const MISSING_INV_RSSI: u8 = 109;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasSample {
    pub ber10k: u16,
    /// dBm below zero
    pub inv_rssi: u8,
    pub toa256: i16,
    /// Counted into the SUB values
    pub is_sub: bool,
}

impl MeasSample {
    fn missing(is_sub: bool) -> Self {
        Self { ber10k: MISSING_BER10K, inv_rssi: MISSING_INV_RSSI, toa256: 0, is_sub }
    }
}

/// RXQUAL from the bit error rate in 1/10000
pub fn ber10k_to_rxqual(ber10k: u32) -> u8 {
    const LIMITS: [u32; 7] = [20, 40, 80, 160, 320, 640, 1280];
    LIMITS.iter().position(|l| ber10k < *l).unwrap_or(LIMITS.len()) as u8
}

/// RXLEV from a level in dBm, 0 (-110 dBm and less) to 63 (-48 dBm and more)
pub fn dbm_to_rxlev(dbm: i32) -> u8 {
    (dbm + 110).clamp(0, 63) as u8
}

pub fn expected_samples(pchan: PhysChanConfig) -> usize {
    match pchan {
        PhysChanConfig::TchF | PhysChanConfig::TchH => TCH_EXPECTED_SAMPLES,
        _ => SDCCH_EXPECTED_SAMPLES,
    }
}

fn is_sacch_fn(pchan: PhysChanConfig, tn: Tn, fn_num: u32) -> bool {
    resolve(pchan, tn, fn_num).is_some_and(|(_, (ul, _))| ul.is_sacch())
}

/// Whether a measurement at `fn_num` belongs to the SUB set. Speech only, CSD is not covered.
pub fn is_sub(pchan: PhysChanConfig, tn: Tn, ss: u8, tch_mode: TchMode, fn_num: u32) -> bool {
    let fn104 = fn_num % 104;
    match pchan {
        PhysChanConfig::TchF => match tch_mode {
            TchMode::Sign | TchMode::SpeechV1 | TchMode::SpeechEfr => {
                is_sacch_fn(pchan, tn, fn_num) || SUB_TCH_F.contains(&fn104)
            }
            TchMode::SpeechAmr => is_sacch_fn(pchan, tn, fn_num),
            TchMode::Data => false,
        },
        PhysChanConfig::TchH => match tch_mode {
            TchMode::SpeechV1 => {
                let table = if ss == 0 { &SUB_TCH_H0 } else { &SUB_TCH_H1 };
                is_sacch_fn(pchan, tn, fn_num) || table.contains(&fn104)
            }
            TchMode::SpeechAmr => is_sacch_fn(pchan, tn, fn_num),
            // No DTX in signalling mode, every frame is SUB
            TchMode::Sign => true,
            _ => false,
        },
        PhysChanConfig::CcchSdcch4
        | PhysChanConfig::CcchSdcch4Cbch
        | PhysChanConfig::Sdcch8
        | PhysChanConfig::Sdcch8Cbch => true,
        _ => false,
    }
}

/// True if the measurement reported at `fn_num` closes the reporting period of the lchan
pub fn is_period_end(pchan: PhysChanConfig, tn: Tn, ss: u8, fn_num: u32) -> bool {
    let tn = (tn & 7) as usize;
    match pchan {
        PhysChanConfig::TchF => fn_num % 104 == TCHF_PERIOD_END[tn],
        PhysChanConfig::TchH => {
            let table = if ss == 0 { &TCHH0_PERIOD_END } else { &TCHH1_PERIOD_END };
            fn_num % 104 == table[tn]
        }
        PhysChanConfig::Sdcch8 | PhysChanConfig::Sdcch8Cbch => fn_num % 102 == SDCCH8_PERIOD_END[ss as usize & 7],
        PhysChanConfig::CcchSdcch4 | PhysChanConfig::CcchSdcch4Cbch => {
            fn_num % 102 == SDCCH4_PERIOD_END[ss as usize & 3]
        }
        _ => false,
    }
}

/// Samples of the running reporting period
#[derive(Debug, Clone, Default)]
pub struct MeasCollector {
    samples: Vec<MeasSample>,
}

impl MeasCollector {
    pub fn add(&mut self, sample: MeasSample) {
        // A period never holds more than one sample per frame
        if self.samples.len() >= 104 {
            tracing::info!("no space for uplink measurement, {} collected", self.samples.len());
            return;
        }
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Closes the period. Missing samples count as lost at the lowest level.
    /// Returns None if nothing at all was received.
    pub fn compute(&mut self, expected: usize) -> Option<UlMeasResult> {
        if self.samples.is_empty() {
            return None;
        }
        let received = self.samples.len();
        let mut samples = std::mem::take(&mut self.samples);
        if received < expected {
            tracing::debug!("{} of {} uplink measurements missing", expected - received, expected);
            samples.extend((received..expected).map(|_| MeasSample::missing(false)));
        }

        let n = samples.len() as u32;
        let ber_full = samples.iter().map(|s| s.ber10k as u32).sum::<u32>() / n;
        let irssi_full = samples.iter().map(|s| s.inv_rssi as u32).sum::<u32>() / n;
        let toa256 = samples.iter().map(|s| s.toa256 as i32).sum::<i32>() / n as i32;

        let sub: Vec<&MeasSample> = samples.iter().filter(|s| s.is_sub).collect();
        let (ber_sub, irssi_sub) = if sub.is_empty() {
            // Only happens if the SUB blocks themselves were lost
            (MISSING_BER10K as u32, MISSING_INV_RSSI as u32)
        } else {
            let k = sub.len() as u32;
            (
                sub.iter().map(|s| s.ber10k as u32).sum::<u32>() / k,
                sub.iter().map(|s| s.inv_rssi as u32).sum::<u32>() / k,
            )
        };

        Some(UlMeasResult {
            rxlev_full: dbm_to_rxlev(-(irssi_full as i32)),
            rxlev_sub: dbm_to_rxlev(-(irssi_sub as i32)),
            rxqual_full: ber10k_to_rxqual(ber_full),
            rxqual_sub: ber10k_to_rxqual(ber_sub),
            toa256_avg: toa256 as i16,
            num_ul_meas: received.min(u8::MAX as usize) as u8,
            ms_power: 0,
            ta: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rxqual_thresholds() {
        assert_eq!(ber10k_to_rxqual(0), 0);
        assert_eq!(ber10k_to_rxqual(19), 0);
        assert_eq!(ber10k_to_rxqual(20), 1);
        assert_eq!(ber10k_to_rxqual(100), 3);
        assert_eq!(ber10k_to_rxqual(1279), 6);
        assert_eq!(ber10k_to_rxqual(1280), 7);
        assert_eq!(ber10k_to_rxqual(10000), 7);
    }

    #[test]
    fn test_rxlev() {
        assert_eq!(dbm_to_rxlev(-120), 0);
        assert_eq!(dbm_to_rxlev(-110), 0);
        assert_eq!(dbm_to_rxlev(-60), 50);
        assert_eq!(dbm_to_rxlev(-20), 63);
    }

    #[test]
    fn test_period_end_tables() {
        // TS 0 TCH/F closes on its SACCH block at 12
        assert!(is_period_end(PhysChanConfig::TchF, 0, 0, 104 * 3 + 12));
        assert!(!is_period_end(PhysChanConfig::TchF, 0, 0, 104 * 3 + 38));
        assert!(is_period_end(PhysChanConfig::TchF, 1, 0, 25));
        assert!(is_period_end(PhysChanConfig::TchH, 2, 1, 51));
        assert!(is_period_end(PhysChanConfig::CcchSdcch4, 0, 0, 102 + 88));
        assert!(is_period_end(PhysChanConfig::Sdcch8, 3, 5, 204));
        assert!(!is_period_end(PhysChanConfig::Pdch, 3, 0, 0));
    }

    #[test]
    fn test_sub_classification() {
        // SACCH frame of TS 0 is always SUB
        assert!(is_sub(PhysChanConfig::TchF, 0, 0, TchMode::SpeechAmr, 12));
        assert!(!is_sub(PhysChanConfig::TchF, 0, 0, TchMode::SpeechAmr, 52));
        assert!(is_sub(PhysChanConfig::TchF, 0, 0, TchMode::SpeechV1, 52));
        assert!(!is_sub(PhysChanConfig::TchF, 0, 0, TchMode::SpeechV1, 0));
        assert!(is_sub(PhysChanConfig::TchH, 0, 1, TchMode::Sign, 1));
        assert!(is_sub(PhysChanConfig::TchH, 0, 1, TchMode::SpeechV1, 66));
        assert!(is_sub(PhysChanConfig::Sdcch8, 1, 0, TchMode::Sign, 5));
    }

    #[test]
    fn test_compute_fills_missing() {
        let mut meas = MeasCollector::default();
        assert!(meas.compute(3).is_none());

        meas.add(MeasSample { ber10k: 0, inv_rssi: 60, toa256: 300, is_sub: true });
        meas.add(MeasSample { ber10k: 0, inv_rssi: 60, toa256: 0, is_sub: true });
        let res = meas.compute(SDCCH_EXPECTED_SAMPLES).unwrap();
        // Third sample missing: (60 + 60 + 109) / 3
        assert_eq!(res.rxlev_full, dbm_to_rxlev(-76));
        assert_eq!(res.rxlev_sub, 50);
        assert_eq!(res.rxqual_full, ber10k_to_rxqual(3333));
        assert_eq!(res.rxqual_sub, 0);
        assert_eq!(res.toa256_avg, 100);
        assert_eq!(res.num_ul_meas, 2);
        assert!(meas.is_empty());
    }

    #[test]
    fn test_compute_without_sub() {
        let mut meas = MeasCollector::default();
        for _ in 0..TCH_EXPECTED_SAMPLES {
            meas.add(MeasSample { ber10k: 10, inv_rssi: 70, toa256: 0, is_sub: false });
        }
        let res = meas.compute(TCH_EXPECTED_SAMPLES).unwrap();
        assert_eq!(res.rxlev_full, 40);
        assert_eq!(res.rxqual_full, 0);
        assert_eq!(res.rxlev_sub, 1);
        assert_eq!(res.rxqual_sub, 7);
    }
}
