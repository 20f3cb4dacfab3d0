// Speed reading domain model

/// Value SimRail reports when the signal ahead imposes no restriction.
pub const MAX_SPEED_SENTINEL: i64 = 32767;

/// Permitted speed past the next signal, as seen on one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedReading {
    /// Telemetry failed, or the selected train is not on the server.
    Unavailable,
    Speed(i64),
}

impl SpeedReading {
    pub fn value(self) -> Option<i64> {
        match self {
            SpeedReading::Unavailable => None,
            SpeedReading::Speed(v) => Some(v),
        }
    }

    pub fn is_unrestricted(self) -> bool {
        self == SpeedReading::Speed(MAX_SPEED_SENTINEL)
    }
}
