// Catalog service - Use case for listing servers and trains to choose from
use crate::application::telemetry_source::ServerCatalog;
use crate::domain::selection::{RunNumber, ServerInfo};
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn ServerCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn ServerCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn active_servers(&self) -> anyhow::Result<Vec<ServerInfo>> {
        let servers = self.catalog.list_servers().await?;
        Ok(servers.into_iter().filter(|s| s.is_active).collect())
    }

    pub async fn train_numbers(&self, server_code: &str) -> anyhow::Result<Vec<RunNumber>> {
        let mut trains = self.catalog.list_trains(server_code).await?;
        trains.sort();
        trains.dedup();
        tracing::debug!("Found {} trains on server {}", trains.len(), server_code);
        Ok(trains)
    }
}
