// Signal aspect domain model and the speed-to-lamps table
use super::speed::SpeedReading;

/// Lamp positions on the signal head, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lamp {
    Clear,
    UpperCaution,
    Stop,
    LowerCaution,
    CallOn,
}

impl Lamp {
    pub const ALL: [Lamp; 5] = [
        Lamp::Clear,
        Lamp::UpperCaution,
        Lamp::Stop,
        Lamp::LowerCaution,
        Lamp::CallOn,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn colour(self) -> &'static str {
        match self {
            Lamp::Clear => "green",
            Lamp::UpperCaution | Lamp::LowerCaution => "orange",
            Lamp::Stop => "red",
            Lamp::CallOn => "white",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lamp::Clear => "clear",
            Lamp::UpperCaution => "upper_caution",
            Lamp::Stop => "stop",
            Lamp::LowerCaution => "lower_caution",
            Lamp::CallOn => "call_on",
        }
    }
}

/// Set of lit lamps, one bit per [`Lamp`] index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignalAspect(u8);

impl SignalAspect {
    /// All lamps off. Shown whenever the reading is unknown or unmapped.
    pub const DARK: SignalAspect = SignalAspect(0);

    pub fn lit(lamps: &[Lamp]) -> Self {
        Self(lamps.iter().fold(0, |bits, lamp| bits | 1 << lamp.index()))
    }

    /// Derive the aspect for a reading.
    ///
    /// Depends on the current reading only. Anything the table does not
    /// name (negative speeds, 99, ...) falls through to [`SignalAspect::DARK`].
    pub fn resolve(reading: SpeedReading) -> Self {
        let Some(speed) = reading.value() else {
            return Self::DARK;
        };

        match speed {
            0 => Self::lit(&[Lamp::Stop]),
            40 | 60 => Self::lit(&[Lamp::UpperCaution, Lamp::LowerCaution]),
            80 | 100 => Self::lit(&[Lamp::Clear, Lamp::LowerCaution]),
            s if s > 100 => Self::lit(&[Lamp::Clear]),
            _ => Self::DARK,
        }
    }

    pub fn is_lit(self, lamp: Lamp) -> bool {
        self.0 & (1 << lamp.index()) != 0
    }

    pub fn is_dark(self) -> bool {
        self == Self::DARK
    }

    /// Lit lamps in palette order.
    pub fn lamps(self) -> impl Iterator<Item = Lamp> {
        Lamp::ALL.into_iter().filter(move |lamp| self.is_lit(*lamp))
    }
}
