//! Per logical channel state within a timeslot

use gsm_core::{BurstType, Sbit, Ubit};
use gsm_saps::control::amr_conf::AmrMultirateConf;
use gsm_saps::control::enums::chan_mode::{RslCmode, TchMode};

use super::chan_desc::NUM_TRX_CHAN;
use super::cipher::CipherState;
use super::loops::SacchLoop;

/// AMR codec state of a traffic channel
#[derive(Debug, Clone, Default)]
pub struct AmrState {
    /// Number of modes in the active codec set
    pub codecs: u8,
    /// Codec mode of each index of the active set
    pub codec: [u8; 4],
    /// Thresholds and hysteresis of the active set
    pub conf: AmrMultirateConf,
    /// Indices into the active set
    pub ul_ft: u8,
    pub dl_ft: u8,
    pub ul_cmr: u8,
    pub dl_cmr: u8,
    pub ber_sum: f32,
    pub ber_num: u32,
    pub loop_enabled: bool,
}

/// Accumulated reception measurements of the unit being reassembled
#[derive(Debug, Clone, Copy, Default)]
pub struct UlMeas {
    pub rssi_sum: i32,
    pub rssi_num: u8,
    pub toa256_sum: i32,
    pub toa_num: u8,
}

impl UlMeas {
    pub fn add(&mut self, rssi: i8, toa256: i16) {
        self.rssi_sum += rssi as i32;
        self.rssi_num = self.rssi_num.saturating_add(1);
        self.toa256_sum += toa256 as i32;
        self.toa_num = self.toa_num.saturating_add(1);
    }

    pub fn rssi_avg(&self) -> i8 {
        if self.rssi_num == 0 {
            return i8::MIN;
        }
        (self.rssi_sum / self.rssi_num as i32).clamp(i8::MIN as i32, i8::MAX as i32) as i8
    }

    pub fn toa256_avg(&self) -> i16 {
        if self.toa_num == 0 {
            return 0;
        }
        (self.toa256_sum / self.toa_num as i32).clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChanState {
    pub active: bool,

    /// Coded bits of the downlink unit(s) in transmission, empty until the first block
    pub dl_bursts: Vec<Ubit>,
    pub dl_burst_type: BurstType,

    /// Coded soft bits of the uplink unit(s) being received, empty until the first burst
    pub ul_bursts: Vec<Sbit>,
    pub ul_burst_type: BurstType,
    /// Bit n set if burst n of the current unit was received
    pub ul_mask: u8,
    pub ul_first_fn: u32,
    pub ul_meas: UlMeas,

    /// Consecutive traffic frames without a downlink frame from upper layers
    pub lost_frames: u32,

    pub rsl_cmode: RslCmode,
    pub tch_mode: TchMode,
    pub amr: AmrState,

    /// FACCH/H spans two half rate frames, set while the second is pending
    pub dl_ongoing_facch: bool,
    pub ul_ongoing_facch: bool,

    pub dl_cipher: CipherState,
    pub ul_cipher: CipherState,

    pub sacch_loop: SacchLoop,

    /// Decode uplink bursts as handover access bursts
    pub ho_rach_detect: bool,
}

impl ChanState {
    /// Clears all state for a fresh activation
    pub fn activate(&mut self) {
        *self = ChanState { active: true, ..Default::default() };
    }

    /// Drops burst buffers and any partially reassembled unit
    pub fn deactivate(&mut self) {
        self.active = false;
        self.ho_rach_detect = false;
        self.release_buffers();
    }

    pub fn release_buffers(&mut self) {
        self.dl_bursts = Vec::new();
        self.ul_bursts = Vec::new();
        self.ul_mask = 0;
        self.dl_ongoing_facch = false;
        self.ul_ongoing_facch = false;
    }

    pub fn is_speech(&self) -> bool {
        self.rsl_cmode == RslCmode::Speech
    }

    /// Ensures the uplink buffer holds `len` soft bits of the given modulation.
    /// A change of modulation restarts the buffer.
    pub fn ul_buffer(&mut self, len: usize, burst_type: BurstType) -> &mut [Sbit] {
        if self.ul_bursts.len() != len || self.ul_burst_type != burst_type {
            self.ul_bursts = vec![0; len];
            self.ul_burst_type = burst_type;
        }
        &mut self.ul_bursts
    }
}

/// Dense channel state array of a timeslot
pub type ChanStates = [ChanState; NUM_TRX_CHAN];

pub fn new_chan_states() -> ChanStates {
    core::array::from_fn(|_| ChanState::default())
}
