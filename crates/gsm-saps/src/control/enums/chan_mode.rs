/// Channel mode as signalled in RSL CHANNEL MODE (speech/data indicator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RslCmode {
    #[default]
    Signalling,
    Speech,
    Data,
}

/// Traffic channel codec mode (TS 04.08 channel mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TchMode {
    #[default]
    Sign,
    /// Full rate or half rate speech version 1
    SpeechV1,
    /// Enhanced full rate, TCH/F only
    SpeechEfr,
    SpeechAmr,
    Data,
}

impl TchMode {
    pub fn is_speech(self) -> bool {
        matches!(self, TchMode::SpeechV1 | TchMode::SpeechEfr | TchMode::SpeechAmr)
    }
}

/// Cause values for connection failure indications (TS 08.58 clause 9.3.26)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnFailCause {
    RadioIfFail = 0x00,
    RadioLinkFail = 0x01,
    HandoverAccFail = 0x02,
}
