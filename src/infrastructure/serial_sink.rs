// Serial sink - Mirrors the readout to a microcontroller
use crate::application::sinks::{ExternalSink, SinkError};
use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;

pub const DEFAULT_BAUD_RATE: u32 = 57_600;
const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens the port per message, writes one line and closes it again.
/// Nothing is read back.
#[derive(Debug, Clone)]
pub struct SerialSink {
    port: String,
    baud_rate: u32,
}

impl SerialSink {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
        }
    }

    /// Send "OK" once so the device can show that the link is up.
    pub async fn link_check(&self) {
        match self.send("OK").await {
            Ok(()) => tracing::info!("Serial link on {} is up", self.port),
            Err(e) => tracing::warn!("Serial link check on {} failed: {}", self.port, e),
        }
    }

    fn frame(payload: &str) -> Vec<u8> {
        format!(" {}\n", payload).into_bytes()
    }

    fn write_line(port: &str, baud_rate: u32, line: &[u8]) -> serialport::Result<()> {
        let mut link = serialport::new(port, baud_rate)
            .timeout(WRITE_TIMEOUT)
            .open()?;
        link.clear(serialport::ClearBuffer::Input)?;
        link.write_all(line)?;
        link.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ExternalSink for SerialSink {
    async fn send(&self, payload: &str) -> Result<(), SinkError> {
        let port = self.port.clone();
        let baud_rate = self.baud_rate;
        let line = Self::frame(payload);

        tracing::debug!("Serial: {:?} -> {}", payload, port);
        let written = tokio::task::spawn_blocking({
            let port = port.clone();
            move || Self::write_line(&port, baud_rate, &line)
        })
        .await
        .map_err(|e| SinkError::Unavailable(format!("serial write task failed: {}", e)))?;

        written.map_err(|e| SinkError::Device {
            port,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame() {
        assert_eq!(SerialSink::frame(" 60"), b"  60\n".to_vec());
        assert_eq!(SerialSink::frame("ERR"), b" ERR\n".to_vec());
    }

    #[tokio::test]
    async fn test_missing_device_is_an_error() {
        let sink = SerialSink::new("/dev/evm120-does-not-exist", DEFAULT_BAUD_RATE);
        let err = sink.send("MAX").await.unwrap_err();
        assert!(matches!(err, SinkError::Device { ref port, .. } if port == "/dev/evm120-does-not-exist"));

        // Only logs.
        sink.link_check().await;
    }
}
