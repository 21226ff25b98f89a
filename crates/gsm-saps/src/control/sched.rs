use core::fmt;

use gsm_core::{PhysChanConfig, Tn};

use crate::control::amr_conf::AmrMultirateConf;
use crate::control::enums::chan_mode::{RslCmode, TchMode};

/// Configuration errors reported by the scheduler to the configuring caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// No multiframe layout for this physical channel and timeslot
    NotSupported,
    /// Channel does not exist in the current multiframe configuration
    InvalidChannel,
    /// Timeslot still has dedicated channels active
    ChannelsActive,
    /// Timeslot has no multiframe configured
    NotConfigured,
    /// Cipher key length other than 8
    InvalidKey,
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::NotSupported => write!(f, "physical channel configuration not supported on this timeslot"),
            SchedError::InvalidChannel => write!(f, "channel not schedulable in the current multiframe"),
            SchedError::ChannelsActive => write!(f, "timeslot has active channels"),
            SchedError::NotConfigured => write!(f, "timeslot not configured"),
            SchedError::InvalidKey => write!(f, "cipher key length must be 8"),
        }
    }
}

impl std::error::Error for SchedError {}

/// AMR parameters applied with a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmrModeSet {
    pub conf: AmrMultirateConf,
    /// Index within the active set to start with
    pub initial_id: u8,
}

/// Commands to the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCmd {
    SetPchan { tn: Tn, pchan: PhysChanConfig },
    /// Activate or deactivate all channels matching chan_nr and link_id
    SetLchan { chan_nr: u8, link_id: u8, active: bool },
    SetMode {
        chan_nr: u8,
        rsl_cmode: RslCmode,
        tch_mode: TchMode,
        amr: Option<AmrModeSet>,
        /// Arm handover access burst detection
        handover: bool,
    },
    SetCipher {
        chan_nr: u8,
        downlink: bool,
        /// A5 algorithm number, 0 for none
        algo: u8,
        key: Vec<u8>,
    },
    SetRachDetect { chan_nr: u8, on: bool },
    Reset,
}

/// Result of a SchedCmd, returned to the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedCmdConf {
    pub cmd: SchedCmd,
    pub result: Result<(), SchedError>,
}
