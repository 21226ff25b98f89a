//! Asynchronous handover detection on the target channel (TS 04.08 clause 3.4.4.2)

use gsm_core::{GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING};

/// RR protocol discriminator
const PDISC_RR: u8 = 0x06;
/// RR PHYSICAL INFORMATION
const MT_RR_PHYS_INFO: u8 = 0x2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoState {
    #[default]
    None,
    /// Waiting for a handover access burst with the expected reference
    Enabled,
    /// Access burst seen, PHYS INFO repeated until the first valid frame
    WaitFrame,
}

/// What to do when T3105 expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoTimeout {
    /// Send PHYS INFO again and restart the timer
    Repeat,
    /// NY1 reached, report the handover failure
    Fail,
}

#[derive(Debug, Clone, Default)]
pub struct Handover {
    pub state: HoState,
    pub ho_ref: u8,
    /// Number of PHYS INFO messages sent so far
    pub phys_info_count: u32,
}

impl Handover {
    pub fn enable(&mut self, ho_ref: u8) {
        self.state = HoState::Enabled;
        self.ho_ref = ho_ref;
        self.phys_info_count = 0;
    }

    /// Handles a handover access burst. Returns true if it starts the PHYS INFO phase
    pub fn on_rach(&mut self, ra: u16) -> bool {
        if self.state != HoState::Enabled {
            tracing::debug!("handover access burst ignored in state {:?}", self.state);
            return false;
        }
        if ra != self.ho_ref as u16 {
            tracing::info!("handover access burst with ref {} ignored, expecting {}", ra, self.ho_ref);
            return false;
        }
        self.state = HoState::WaitFrame;
        self.phys_info_count = 1;
        true
    }

    /// `ny1` bounds the total number of PHYS INFO transmissions, the first one
    /// included, so at most `ny1 - 1` repetitions follow the initial message.
    pub fn on_t3105(&mut self, ny1: u32) -> HoTimeout {
        if self.phys_info_count >= ny1 {
            self.reset();
            return HoTimeout::Fail;
        }
        self.phys_info_count += 1;
        HoTimeout::Repeat
    }

    /// Handles a valid uplink frame. Returns true if it completes the handover
    pub fn on_frame(&mut self) -> bool {
        if self.state != HoState::WaitFrame {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        self.state = HoState::None;
        self.phys_info_count = 0;
    }
}

/// RR PHYSICAL INFORMATION in a LAPDm UI frame on the main signalling channel
pub fn phys_info_block(ta: u8) -> [u8; GSM_MACBLOCK_LEN] {
    let mut out = [GSM_MACBLOCK_PADDING; GSM_MACBLOCK_LEN];
    // SAPI 0 command, UI, length 3 with EL set
    out[0] = 0x03;
    out[1] = 0x03;
    out[2] = (3 << 2) | 0x01;
    out[3] = PDISC_RR;
    out[4] = MT_RR_PHYS_INFO;
    out[5] = ta;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_ref_ignored() {
        let mut ho = Handover::default();
        assert!(!ho.on_rach(5));
        ho.enable(5);
        assert!(!ho.on_rach(6));
        assert_eq!(ho.state, HoState::Enabled);
        assert!(ho.on_rach(5));
        assert_eq!(ho.state, HoState::WaitFrame);
        // Further access bursts do not restart the procedure
        assert!(!ho.on_rach(5));
        assert_eq!(ho.phys_info_count, 1);
    }

    #[test]
    fn test_ny1_counts_transmissions() {
        let mut ho = Handover::default();
        ho.enable(1);
        ho.on_rach(1);
        assert_eq!(ho.on_t3105(3), HoTimeout::Repeat);
        assert_eq!(ho.on_t3105(3), HoTimeout::Repeat);
        assert_eq!(ho.phys_info_count, 3);
        assert_eq!(ho.on_t3105(3), HoTimeout::Fail);
        assert_eq!(ho.state, HoState::None);
    }

    #[test]
    fn test_frame_completes() {
        let mut ho = Handover::default();
        assert!(!ho.on_frame());
        ho.enable(9);
        assert!(!ho.on_frame());
        ho.on_rach(9);
        assert!(ho.on_frame());
        assert_eq!(ho.state, HoState::None);
    }

    #[test]
    fn test_phys_info_block() {
        let blk = phys_info_block(7);
        assert_eq!(&blk[..6], &[0x03, 0x03, 0x0d, 0x06, 0x2d, 7]);
        assert!(blk[6..].iter().all(|b| *b == 0x2b));
    }
}
