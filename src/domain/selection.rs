// Server/train selection domain model
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Train run-number as listed by the server.
///
/// Upstream sends it as a string or a plain integer depending on the
/// endpoint, so it is kept as text and compared exactly, whitespace and
/// leading zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunNumber(String);

impl RunNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RunNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Numeric run-numbers sort by value and come before anything else.
impl Ord for RunNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for RunNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'de> Deserialize<'de> for RunNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RunNumber::new(s),
            Raw::Number(n) => RunNumber::new(n.to_string()),
        })
    }
}

/// The server and train being followed. Fixed for the life of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub server_code: String,
    pub train: RunNumber,
}

impl Selection {
    pub fn new(server_code: impl Into<String>, train: RunNumber) -> Self {
        Self {
            server_code: server_code.into(),
            train,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

/// Which parts of the signal the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Both,
    SignalLight,
    Dvj,
}

impl DisplayMode {
    pub fn shows_lamps(self) -> bool {
        matches!(self, DisplayMode::Both | DisplayMode::SignalLight)
    }

    pub fn shows_readout(self) -> bool {
        matches!(self, DisplayMode::Both | DisplayMode::Dvj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_number_from_string_or_integer() {
        let from_text: RunNumber = serde_json::from_str("\"14021\"").unwrap();
        let from_int: RunNumber = serde_json::from_str("14021").unwrap();
        assert_eq!(from_text, from_int);
        assert_eq!(from_text.as_str(), "14021");
    }

    #[test]
    fn test_run_number_is_exact_key() {
        assert_ne!(RunNumber::new("14021 "), RunNumber::new("14021"));
        assert_ne!(RunNumber::new("014021"), RunNumber::new("14021"));
        assert_eq!(RunNumber::new("014021").as_str(), "014021");
    }

    #[test]
    fn test_run_number_ordering() {
        let mut numbers = vec![
            RunNumber::new("94100"),
            RunNumber::new("EC 41"),
            RunNumber::new("3521"),
            RunNumber::new("14021"),
        ];
        numbers.sort();

        let sorted: Vec<&str> = numbers.iter().map(|n| n.as_str()).collect();
        assert_eq!(sorted, vec!["3521", "14021", "94100", "EC 41"]);
    }

    #[test]
    fn test_display_mode() {
        let mode: DisplayMode = serde_json::from_str("\"signal_light\"").unwrap();
        assert_eq!(mode, DisplayMode::SignalLight);
        assert!(mode.shows_lamps());
        assert!(!mode.shows_readout());

        assert!(DisplayMode::default().shows_lamps());
        assert!(DisplayMode::default().shows_readout());
        assert!(!DisplayMode::Dvj.shows_lamps());
    }
}
