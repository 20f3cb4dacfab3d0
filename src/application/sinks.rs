// Sink traits - Where derived frames are pushed
use crate::domain::frame::SignalFrame;
use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure on an external sink. Logged and dropped by callers.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("device {port}: {message}")]
    Device { port: String, message: String },

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Renders the current frame.
///
/// Called once per tick with a fresh frame. Implementations may skip the
/// redraw when the picture has not changed.
pub trait DisplaySink: Send + Sync {
    fn show(&self, frame: &SignalFrame);
}

/// Best-effort mirror of the readout to an external device.
///
/// Errors are reported to the caller only so they can be logged; callers
/// discard them and carry on.
#[async_trait]
pub trait ExternalSink: Send + Sync {
    async fn send(&self, payload: &str) -> Result<(), SinkError>;
}
