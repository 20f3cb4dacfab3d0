// Source traits for SimRail data access
use crate::domain::selection::{RunNumber, Selection, ServerInfo};
use crate::domain::speed::SpeedReading;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Signal-in-front speed for the selected train.
    ///
    /// Never fails: network errors, bad responses and a missing train all
    /// come back as [`SpeedReading::Unavailable`].
    async fn fetch(&self, selection: &Selection) -> SpeedReading;
}

#[async_trait]
pub trait ServerCatalog: Send + Sync {
    /// List every server the API knows about, active or not
    async fn list_servers(&self) -> anyhow::Result<Vec<ServerInfo>>;

    /// List run-numbers of the trains currently on a server, unsorted
    async fn list_trains(&self, server_code: &str) -> anyhow::Result<Vec<RunNumber>>;
}
