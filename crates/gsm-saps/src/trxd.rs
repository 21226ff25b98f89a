use gsm_core::{BurstType, Sbit, Tn, Ubit};

/// Clock indication from the transceiver, the frame number currently on air
#[derive(Debug, Clone, Copy)]
pub struct TrxdClockInd {
    pub fn_num: u32,
}

/// A downlink burst ready for transmission
#[derive(Debug, Clone)]
pub struct TrxdDlBurst {
    pub tn: Tn,
    pub fn_num: u32,
    pub burst_type: BurstType,
    /// One hard bit per element, 148 (GMSK) or 444 (8PSK) long
    pub bits: Vec<Ubit>,
}

/// A received uplink burst
#[derive(Debug, Clone)]
pub struct TrxdUlBurst {
    pub tn: Tn,
    pub fn_num: u32,
    /// Received signal strength in dBm
    pub rssi: i8,
    /// Time of arrival in 1/256 symbol periods
    pub toa256: i16,
    /// Soft bits, 148 (GMSK) or 444 (8PSK) long
    pub bits: Vec<Sbit>,
}
