//! Closed loops driven by uplink reception: MS power and timing advance on the
//! SACCH, codec mode adaptation on AMR traffic channels.

use super::chan_state::AmrState;

/// Samples per MS power / timing advance decision
pub const SACCH_LOOP_WINDOW: usize = 8;
/// RSSI inserted for a SACCH period without any received burst
pub const RSSI_NO_BURST: i8 = -110;
/// Minimum deviation from the target before the MS power level is stepped
const POWER_HYSTERESIS_DB: i32 = 2;
/// Timing offset in 1/256 symbol that triggers a timing advance step
const TOA256_THRESHOLD: i32 = 128;
/// BER samples per AMR decision
pub const AMR_LOOP_SAMPLES: u32 = 48;

/// Parameters of the SACCH loops, taken from the BTS configuration
#[derive(Debug, Clone, Copy)]
pub struct LoopParams {
    pub rssi_target: i8,
    pub power_ctrl: bool,
    pub ta_ctrl: bool,
}

/// Step request produced when the window fills up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStep {
    /// +1 lowers the MS power, -1 raises it
    pub power: i8,
    pub ta: i8,
}

impl LoopStep {
    pub fn is_zero(&self) -> bool {
        self.power == 0 && self.ta == 0
    }
}

/// Measurement window of one SACCH
#[derive(Debug, Clone, Default)]
pub struct SacchLoop {
    rssi: [i8; SACCH_LOOP_WINDOW],
    toa256: [i16; SACCH_LOOP_WINDOW],
    count: usize,
    got_burst: bool,
}

impl SacchLoop {
    /// Feeds one received SACCH burst
    pub fn input(&mut self, rssi: i8, toa256: i16, params: &LoopParams) -> Option<LoopStep> {
        // Substituted bursts carry no measurement
        if rssi <= i8::MIN {
            return None;
        }
        self.got_burst = true;
        self.push(rssi, toa256, params)
    }

    /// Called once per SACCH block on the downlink
    pub fn clock(&mut self, params: &LoopParams) -> Option<LoopStep> {
        if self.got_burst {
            self.got_burst = false;
            return None;
        }
        self.push(RSSI_NO_BURST, 0, params)
    }

    fn push(&mut self, rssi: i8, toa256: i16, params: &LoopParams) -> Option<LoopStep> {
        self.rssi[self.count] = rssi;
        self.toa256[self.count] = toa256;
        self.count += 1;
        if self.count < SACCH_LOOP_WINDOW {
            return None;
        }
        self.count = 0;

        let n = SACCH_LOOP_WINDOW as i32;
        let rssi_avg = self.rssi.iter().map(|r| *r as i32).sum::<i32>() / n;
        let toa_avg = self.toa256.iter().map(|t| *t as i32).sum::<i32>() / n;

        let mut step = LoopStep::default();
        if params.power_ctrl {
            let diff = params.rssi_target as i32 - rssi_avg;
            if diff >= POWER_HYSTERESIS_DB {
                step.power = -1;
            } else if diff <= -POWER_HYSTERESIS_DB {
                step.power = 1;
            }
        }
        if params.ta_ctrl {
            if toa_avg > TOA256_THRESHOLD {
                step.ta = 1;
            } else if toa_avg < -TOA256_THRESHOLD {
                step.ta = -1;
            }
        }
        tracing::trace!("sacch loop: rssi_avg {} toa_avg {} -> {:?}", rssi_avg, toa_avg, step);
        Some(step)
    }
}

impl AmrState {
    /// Enables or disables the AMR loop, clearing the BER accumulator
    pub fn set_loop(&mut self, enabled: bool) {
        if self.loop_enabled != enabled {
            self.loop_enabled = enabled;
            self.ber_sum = 0.0;
            self.ber_num = 0;
        }
    }

    /// Feeds the bit error ratio of one decoded AMR frame. Returns the new
    /// downlink codec mode request if it changed.
    pub fn loop_input(&mut self, ber: f32, half_rate: bool) -> Option<u8> {
        if !self.loop_enabled {
            return None;
        }
        // Wait for the MS to use the requested codec
        if self.ul_ft != self.dl_cmr {
            return None;
        }

        if half_rate {
            self.ber_num += 2;
            self.ber_sum += ber + ber;
        } else {
            self.ber_num += 1;
            self.ber_sum += ber;
        }
        if self.ber_num < AMR_LOOP_SAMPLES {
            return None;
        }

        // Thresholds are in 0.1% BER
        let ber_permille = self.ber_sum / self.ber_num as f32 * 1000.0;
        self.ber_sum = 0.0;
        self.ber_num = 0;

        let cmr = self.dl_cmr as usize;
        let modes = &self.conf.modes;
        if cmr > 0 && ber_permille > modes[cmr - 1].threshold as f32 {
            self.dl_cmr -= 1;
            tracing::debug!("amr loop: ber {:.1} permille, degrading to mode index {}", ber_permille, self.dl_cmr);
            return Some(self.dl_cmr);
        }
        if cmr + 1 < self.codecs as usize
            && ber_permille < modes[cmr].threshold as f32 - modes[cmr].hysteresis as f32
        {
            self.dl_cmr += 1;
            tracing::debug!("amr loop: ber {:.1} permille, upgrading to mode index {}", ber_permille, self.dl_cmr);
            return Some(self.dl_cmr);
        }
        None
    }
}
