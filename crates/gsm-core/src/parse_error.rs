/// Errors raised while parsing fixed-format records such as the AMR MultiRate
/// configuration or hex encoded system information.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseErr {
    BufferEnded { field: Option<&'static str> },
    InvalidValue { field: &'static str, value: u64 },
    InconsistentLength { expected: usize, found: usize },
    Inconsistency { field: &'static str, reason: &'static str },
}

impl core::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseErr::BufferEnded { field } => write!(f, "buffer ended while reading {}", field.unwrap_or("field")),
            ParseErr::InvalidValue { field, value } => write!(f, "invalid value {} for {}", value, field),
            ParseErr::InconsistentLength { expected, found } => write!(f, "inconsistent length, expected {} found {}", expected, found),
            ParseErr::Inconsistency { field, reason } => write!(f, "inconsistent {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ParseErr {}
