use core::fmt;

use gsm_core::{Sbit, Ubit};
use gsm_saps::trxd::{TrxdDlBurst, TrxdUlBurst};
use rand::Rng;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RxTxDevError {
    RxEndOfData,
    TxRejected,
}

impl fmt::Display for RxTxDevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RxTxDevError::RxEndOfData => write!(f, "no more uplink data"),
            RxTxDevError::TxRejected => write!(f, "transmitter rejected the frame"),
        }
    }
}

impl std::error::Error for RxTxDevError {}

/// Devices that transmit and receive one TDMA frame at a time
pub trait RxTxDev {
    /// Transmits the downlink bursts of one frame and returns whatever was received in it
    fn rxtx_frame(&mut self, fn_num: u32, tx: &[TrxdDlBurst]) -> Result<Vec<TrxdUlBurst>, RxTxDevError>;
}

/// Drops all downlink bursts, never receives
#[derive(Debug, Default)]
pub struct NoneDev;

impl RxTxDev for NoneDev {
    fn rxtx_frame(&mut self, _fn_num: u32, _tx: &[TrxdDlBurst]) -> Result<Vec<TrxdUlBurst>, RxTxDevError> {
        Ok(Vec::new())
    }
}

/// RSSI reported for looped back bursts, in dBm
pub const LOOPBACK_RSSI: i8 = -60;

pub fn hard_to_soft(bit: Ubit) -> Sbit {
    if bit != 0 { -127 } else { 127 }
}

/// Returns every downlink burst as an uplink burst on the same timeslot and frame
#[derive(Debug, Default)]
pub struct LoopbackDev {
    /// Probability of flipping each soft bit, for exercising the decoders
    pub bit_error_rate: f64,
}

impl LoopbackDev {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bit_errors(bit_error_rate: f64) -> Self {
        Self { bit_error_rate: bit_error_rate.clamp(0.0, 1.0) }
    }
}

impl RxTxDev for LoopbackDev {
    fn rxtx_frame(&mut self, _fn_num: u32, tx: &[TrxdDlBurst]) -> Result<Vec<TrxdUlBurst>, RxTxDevError> {
        let mut rng = rand::rng();
        let ul = tx
            .iter()
            .map(|burst| {
                let bits = burst
                    .bits
                    .iter()
                    .map(|&b| {
                        let soft = hard_to_soft(b);
                        if self.bit_error_rate > 0.0 && rng.random_bool(self.bit_error_rate) {
                            -soft
                        } else {
                            soft
                        }
                    })
                    .collect();
                TrxdUlBurst {
                    tn: burst.tn,
                    fn_num: burst.fn_num,
                    rssi: LOOPBACK_RSSI,
                    toa256: 0,
                    bits,
                }
            })
            .collect();
        Ok(ul)
    }
}
