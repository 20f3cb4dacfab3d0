// Digital readout (EVM display) domain model
use std::fmt;

use super::speed::SpeedReading;

/// Text shown on the three-character digital display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadoutText(String);

impl ReadoutText {
    pub const ERROR: &'static str = "ERR";
    pub const MAX: &'static str = "MAX";
    pub const ZERO: &'static str = " o ";

    /// Format a reading for the display.
    ///
    /// Speeds below 100 get one leading space so the digits stay
    /// right-aligned with three-digit speeds.
    pub fn format(reading: SpeedReading) -> Self {
        let text = match reading {
            SpeedReading::Unavailable => Self::ERROR.to_string(),
            r if r.is_unrestricted() => Self::MAX.to_string(),
            SpeedReading::Speed(0) => Self::ZERO.to_string(),
            SpeedReading::Speed(v) if v >= 100 => v.to_string(),
            SpeedReading::Speed(v) => format!(" {}", v),
        };
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_error(&self) -> bool {
        self.0 == Self::ERROR
    }
}

impl fmt::Display for ReadoutText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
