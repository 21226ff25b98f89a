use std::sync::{Arc, RwLock};

use gsm_core::{PhysChanConfig, NUM_TIMESLOTS};
use serde::Deserialize;

use crate::stack_config_sysinfo::CfgSysinfo;

/// The PHY layer backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PhyBackend {
    Undefined,
    /// Bursts are produced and dropped, no uplink
    None,
    /// Every downlink burst is returned as an uplink burst on the same timeslot
    Loopback,
}

/// PHY layer I/O configuration
#[derive(Debug, Clone)]
pub struct CfgPhyIo {
    /// Backend type: None or Loopback
    pub backend: PhyBackend,

    /// Frames the scheduler runs ahead of the clock indicated by the PHY
    pub clock_advance: u32,
    /// Frames a ready-to-send indication is issued ahead of the burst
    pub rts_advance: u32,
    /// Pace the clock to real TDMA frame time. Otherwise run as fast as possible
    pub realtime: bool,

    /// Optional file receiving every produced downlink burst
    pub dl_tx_file: Option<String>,
}

impl Default for CfgPhyIo {
    fn default() -> Self {
        Self {
            backend: PhyBackend::Undefined,
            clock_advance: 20,
            rts_advance: 5,
            realtime: false,
            dl_tx_file: None,
        }
    }
}

/// Cell and radio link parameters
#[derive(Debug, Clone)]
pub struct CfgBts {
    /// Base station identity code, 6 bits (NCC << 3 | BCC)
    pub bsic: u8,
    /// Training sequence code. Defaults to the BCC
    pub tsc: Option<u8>,
    /// True if this transceiver carries the BCCH carrier
    pub c0: bool,

    /// Maximum accepted timing advance, in symbols
    pub max_ta: u8,
    /// Maximum bit error rate of an accepted access burst, in 1/10000
    pub max_ber10k_rach: u32,
    /// RSSI at or above which a RACH slot counts as busy, in dBm
    pub rach_busy_threshold: i8,

    /// Radio link timeout in SACCH blocks. -1 disables the supervision
    pub radio_link_timeout: i32,

    /// Maximum number of PHYS INFO transmissions
    pub ny1: u32,
    /// PHYS INFO repetition period
    pub t3105_ms: u32,

    /// MS power control target, in dBm
    pub ms_power_target: i8,
    pub ms_power_ctrl: bool,
    pub ta_ctrl: bool,
}

impl CfgBts {
    /// Effective training sequence code
    pub fn tsc(&self) -> u8 {
        self.tsc.unwrap_or(self.bsic & 7)
    }
}

impl Default for CfgBts {
    fn default() -> Self {
        Self {
            bsic: 63,
            tsc: None,
            c0: true,
            max_ta: 63,
            max_ber10k_rach: 1707,
            rach_busy_threshold: -90,
            radio_link_timeout: 32,
            ny1: 4,
            t3105_ms: 300,
            ms_power_target: -75,
            ms_power_ctrl: true,
            ta_ctrl: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StackConfig {
    pub debug_log: Option<String>,

    pub phy_io: CfgPhyIo,

    pub bts: CfgBts,

    /// Physical channel configuration per timeslot
    pub timeslots: [PhysChanConfig; NUM_TIMESLOTS],

    pub sysinfo: CfgSysinfo,
}

impl StackConfig {
    pub fn new(bsic: u8) -> Self {
        let mut timeslots = [PhysChanConfig::None; NUM_TIMESLOTS];
        timeslots[0] = PhysChanConfig::CcchSdcch4;
        StackConfig {
            debug_log: None,
            phy_io: CfgPhyIo::default(),
            bts: CfgBts { bsic, ..CfgBts::default() },
            timeslots,
            sysinfo: CfgSysinfo::default(),
        }
    }

    /// Validate that all required configuration fields are properly set.
    pub fn validate(&self) -> Result<(), &str> {
        if self.phy_io.backend == PhyBackend::Undefined {
            return Err("phy_io backend must be defined");
        }
        if self.phy_io.rts_advance == 0 || self.phy_io.rts_advance > 50 {
            return Err("phy_io rts_advance must be between 1 and 50 frames");
        }
        if self.phy_io.clock_advance > 100 {
            return Err("phy_io clock_advance must not exceed 100 frames");
        }

        if self.bts.bsic > 63 {
            return Err("bts bsic must fit in 6 bits");
        }
        if self.bts.tsc.is_some_and(|tsc| tsc > 7) {
            return Err("bts tsc must be between 0 and 7");
        }
        if self.bts.ny1 == 0 {
            return Err("bts ny1 must be at least 1");
        }
        if self.bts.t3105_ms == 0 {
            return Err("bts t3105_ms must be non-zero");
        }
        if self.bts.radio_link_timeout == 0 || self.bts.radio_link_timeout < -1 {
            return Err("bts radio_link_timeout must be positive, or -1 to disable");
        }

        // BCCH is only allowed on timeslot 0 of the C0 carrier
        for (tn, pchan) in self.timeslots.iter().enumerate() {
            let is_bcch = matches!(
                pchan,
                PhysChanConfig::Ccch | PhysChanConfig::CcchSdcch4 | PhysChanConfig::CcchSdcch4Cbch
            );
            if is_bcch && (tn != 0 || !self.bts.c0) {
                return Err("BCCH configurations are only allowed on timeslot 0 of C0");
            }
        }
        if self.bts.c0 && self.timeslots[0] == PhysChanConfig::None {
            return Err("timeslot 0 of C0 must carry a BCCH configuration");
        }

        self.sysinfo.validate()
    }
}

/// Mutable, stack-editable state (lock-protected).
#[derive(Debug, Clone, Default)]
pub struct StackState {
    /// RACH slots that passed by
    pub rach_total: u32,
    /// RACH slots with an RSSI above the busy threshold
    pub rach_busy: u32,
    /// RACH slots with a valid, non-handover access burst
    pub rach_access: u32,
    /// Frames clocked by the PHY
    pub frames: u64,
    /// Downlink bursts handed to the PHY backend
    pub dl_bursts: u64,
}

/// Global shared configuration: immutable config + mutable state.
#[derive(Clone)]
pub struct SharedConfig {
    /// Read-only configuration (immutable after construction).
    cfg: Arc<StackConfig>,
    /// Mutable state guarded with RwLock (write by the stack, read by others).
    state: Arc<RwLock<StackState>>,
}

impl SharedConfig {
    pub fn new(bsic: u8) -> Self {
        let mut cfg = StackConfig::new(bsic);
        cfg.phy_io.backend = PhyBackend::None;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: StackConfig) -> Self {
        Self::from_parts(cfg, StackState::default())
    }

    pub fn from_parts(cfg: StackConfig, state: StackState) -> Self {
        // Check config for validity before returning the SharedConfig object
        match cfg.validate() {
            Ok(_) => {}
            Err(e) => panic!("Invalid stack configuration: {}", e),
        }

        Self {
            cfg: Arc::new(cfg),
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<StackConfig> {
        Arc::clone(&self.cfg)
    }

    /// Read guard for mutable state.
    pub fn state_read(&self) -> std::sync::RwLockReadGuard<'_, StackState> {
        self.state.read().expect("StackState RwLock blocked")
    }

    /// Write guard for mutable state.
    pub fn state_write(&self) -> std::sync::RwLockWriteGuard<'_, StackState> {
        self.state.write().expect("StackState RwLock blocked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = SharedConfig::new(7);
        assert_eq!(cfg.config().bts.tsc(), 7);
        assert_eq!(cfg.config().phy_io.rts_advance, 5);
    }

    #[test]
    fn test_bcch_outside_ts0_rejected() {
        let mut cfg = StackConfig::new(1);
        cfg.phy_io.backend = PhyBackend::None;
        cfg.timeslots[3] = PhysChanConfig::Ccch;
        assert!(cfg.validate().is_err());
    }
}
