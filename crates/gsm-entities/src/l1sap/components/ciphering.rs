//! Ciphering start on a dedicated channel (TS 04.08 clause 3.4.7).
//!
//! Uplink deciphering is switched on when the CIPHERING MODE COMMAND goes out,
//! downlink enciphering once the first ciphered I frame acknowledging it arrives.

/// RR protocol discriminator
const PDISC_RR: u8 = 0x06;
const MT_RR_CIPH_M_CMD: u8 = 0x35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CiphState {
    #[default]
    None,
    /// Uplink deciphering requested from the scheduler
    RxReq,
    /// Uplink deciphering active, waiting for the first ciphered frame
    RxConf,
    /// Both directions requested
    RxTxReq,
    RxTxConf,
}

#[derive(Debug, Clone, Default)]
pub struct Ciphering {
    pub state: CiphState,
    pub algo: u8,
    pub key: Vec<u8>,
    /// N(R) expected in the first ciphered uplink I frame
    ns: u8,
}

impl Ciphering {
    pub fn set_key(&mut self, algo: u8, key: Vec<u8>) {
        self.algo = algo;
        self.key = key;
    }

    /// Checks a downlink DCCH block for a CIPHERING MODE COMMAND.
    /// Returns true if uplink deciphering must be switched on now.
    pub fn check_dl(&mut self, block: &[u8]) -> bool {
        if self.algo == 0 || !matches!(self.state, CiphState::None | CiphState::RxReq) {
            return false;
        }
        if block.len() < 5 || block[0] != 0x03 {
            return false;
        }
        if block[3] & 0x0f != PDISC_RR || block[4] & 0x3f != MT_RR_CIPH_M_CMD {
            return false;
        }
        let n_s = (block[1] >> 1) & 0x07;
        self.ns = (n_s + 1) % 8;
        self.state = CiphState::RxReq;
        true
    }

    /// Checks an uplink DCCH block. Returns true if downlink enciphering must be switched on now.
    pub fn check_ul(&mut self, block: &[u8]) -> bool {
        if self.state != CiphState::RxConf || block.len() < 2 {
            return false;
        }
        // I frames only, UI frames may still be in flight unciphered
        if block[0] != 0x01 || block[1] & 0x01 != 0 {
            return false;
        }
        if block[1] >> 5 != self.ns {
            return false;
        }
        self.state = CiphState::RxTxReq;
        true
    }

    /// Scheduler confirmed a cipher setting
    pub fn confirm(&mut self, downlink: bool) {
        self.state = match (self.state, downlink) {
            (CiphState::RxReq, false) => CiphState::RxConf,
            (CiphState::RxTxReq, true) => CiphState::RxTxConf,
            (state, _) => state,
        };
    }
}
