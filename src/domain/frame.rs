// Signal frame - What the sinks receive on each tick
use chrono::{DateTime, Utc};

use super::aspect::SignalAspect;
use super::readout::ReadoutText;
use super::speed::SpeedReading;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalFrame {
    pub reading: SpeedReading,
    pub aspect: SignalAspect,
    pub readout: ReadoutText,
    pub observed_at: DateTime<Utc>,
}

impl SignalFrame {
    pub fn derive(reading: SpeedReading, observed_at: DateTime<Utc>) -> Self {
        Self {
            reading,
            aspect: SignalAspect::resolve(reading),
            readout: ReadoutText::format(reading),
            observed_at,
        }
    }

    /// Frame shown before the first tick completes.
    pub fn blank() -> Self {
        Self::derive(SpeedReading::Unavailable, Utc::now())
    }

    /// True when both frames would draw the same picture.
    pub fn same_picture(&self, other: &SignalFrame) -> bool {
        self.aspect == other.aspect && self.readout == other.readout
    }
}
