// Error taxonomy for the telemetry boundary
use thiserror::Error;

/// Why a telemetry fetch produced no reading.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("train {train} not found on server {server}")]
    LookupMiss { server: String, train: String },
}

impl TelemetryError {
    pub fn category(&self) -> &'static str {
        match self {
            TelemetryError::Network(_) => "network",
            TelemetryError::Protocol(_) => "protocol",
            TelemetryError::LookupMiss { .. } => "lookup_miss",
        }
    }
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TelemetryError::Protocol(format!("malformed response body: {}", err))
        } else if let Some(status) = err.status() {
            TelemetryError::Protocol(format!("unexpected status {}", status))
        } else {
            TelemetryError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let miss = TelemetryError::LookupMiss {
            server: "en1".to_string(),
            train: "14021".to_string(),
        };
        assert_eq!(miss.category(), "lookup_miss");
        assert_eq!(miss.to_string(), "train 14021 not found on server en1");

        let protocol = TelemetryError::Protocol("unexpected status 503".to_string());
        assert_eq!(protocol.category(), "protocol");
    }
}
