/// One AMR codec mode of the active set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmrModeConf {
    /// Codec mode, 0 (4.75k) to 7 (12.2k)
    pub mode: u8,
    /// Threshold for switching to the next higher mode. Unused for the highest mode
    pub threshold: u8,
    pub hysteresis: u8,
}

/// Parsed MultiRate configuration (TS 04.08 clause 10.5.2.21aa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmrMultirateConf {
    /// Number of modes in the active codec set, 1 to 4
    pub num_modes: u8,
    /// Active set, ordered from most to least robust
    pub modes: [AmrModeConf; 4],
    /// Initial codec mode indicator flag
    pub icmi: bool,
    /// Start mode, index into the active set, used when icmi is set
    pub start_mode: u8,
}

impl AmrMultirateConf {
    pub fn active_modes(&self) -> &[AmrModeConf] {
        &self.modes[..self.num_modes as usize]
    }

    /// Index of the initial codec mode (TS 05.09 clause 3.4.2)
    pub fn initial_index(&self) -> u8 {
        if self.icmi {
            return self.start_mode.min(self.num_modes.saturating_sub(1));
        }
        // Implicit rule: the most robust mode, or the second one out of four
        match self.num_modes {
            4 => 1,
            _ => 0,
        }
    }
}

/// Reasons a MultiRate configuration IE is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmrParseErr {
    /// IE shorter than the number of modes requires
    TooShort { needed: usize, found: usize },
    /// Multirate speech version other than 1
    Version(u8),
    /// Empty codec mode bitmap
    NoModes,
    /// More than four codec modes set
    TooManyModes(u8),
}

impl core::fmt::Display for AmrParseErr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AmrParseErr::TooShort { needed, found } => write!(f, "mr_conf too short, need {} bytes, got {}", needed, found),
            AmrParseErr::Version(v) => write!(f, "unsupported multirate speech version {}", v),
            AmrParseErr::NoModes => write!(f, "no codec mode set"),
            AmrParseErr::TooManyModes(n) => write!(f, "{} codec modes set, at most 4 allowed", n),
        }
    }
}

impl std::error::Error for AmrParseErr {}
