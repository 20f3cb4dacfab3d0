// SimRail public API client
use crate::application::telemetry_source::{ServerCatalog, TelemetrySource};
use crate::domain::selection::{RunNumber, Selection, ServerInfo};
use crate::domain::speed::SpeedReading;
use crate::infrastructure::error::TelemetryError;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SimRailClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ServersResponse {
    #[serde(default)]
    data: Vec<ServerRecord>,
}

#[derive(Debug, Deserialize)]
struct ServerRecord {
    #[serde(rename = "ServerName")]
    server_name: String,
    #[serde(rename = "ServerCode")]
    server_code: String,
    #[serde(rename = "IsActive", default)]
    is_active: bool,
}

// Entries stay raw so one odd neighbour cannot spoil the whole list.
#[derive(Debug, Deserialize)]
struct TrainsResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TrainRecord {
    #[serde(rename = "TrainData", default)]
    train_data: Option<TrainData>,
}

#[derive(Debug, Deserialize)]
struct TrainData {
    #[serde(rename = "SignalInFrontSpeed", default)]
    signal_in_front_speed: Option<f64>,
}

fn run_number(entry: &serde_json::Value) -> Option<RunNumber> {
    let raw = entry.get("TrainNoLocal")?;
    serde_json::from_value(raw.clone()).ok()
}

impl TrainRecord {
    fn decode(entry: &serde_json::Value) -> Result<Self, TelemetryError> {
        serde_json::from_value(entry.clone())
            .map_err(|e| TelemetryError::Protocol(format!("malformed train record: {}", e)))
    }

    // A record without the field reads as 0, same as the live app.
    fn signal_speed(&self) -> i64 {
        self.train_data
            .as_ref()
            .and_then(|d| d.signal_in_front_speed)
            .map(|v| v.round() as i64)
            .unwrap_or(0)
    }
}

impl SimRailClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn servers_url(&self) -> String {
        format!("{}/servers-open", self.base_url)
    }

    fn trains_url(&self, server_code: &str) -> String {
        format!(
            "{}/trains-open?serverCode={}",
            self.base_url,
            urlencoding::encode(server_code)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TelemetryError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelemetryError::Protocol(format!(
                "GET {} returned status {}",
                url,
                response.status()
            )));
        }

        Ok(response.json::<T>().await?)
    }

    async fn fetch_trains(
        &self,
        server_code: &str,
    ) -> Result<Vec<serde_json::Value>, TelemetryError> {
        let response: TrainsResponse = self.get_json(&self.trains_url(server_code)).await?;
        Ok(response.data)
    }

    /// Signal-in-front speed of the selected train, or why there is none.
    pub async fn signal_speed(&self, selection: &Selection) -> Result<i64, TelemetryError> {
        let trains = self.fetch_trains(&selection.server_code).await?;

        let entry = trains
            .iter()
            .find(|entry| run_number(entry).as_ref() == Some(&selection.train))
            .ok_or_else(|| TelemetryError::LookupMiss {
                server: selection.server_code.clone(),
                train: selection.train.to_string(),
            })?;

        Ok(TrainRecord::decode(entry)?.signal_speed())
    }
}

#[async_trait]
impl TelemetrySource for SimRailClient {
    async fn fetch(&self, selection: &Selection) -> SpeedReading {
        match self.signal_speed(selection).await {
            Ok(speed) => SpeedReading::Speed(speed),
            Err(e) => {
                tracing::warn!(category = e.category(), "Telemetry unavailable: {}", e);
                SpeedReading::Unavailable
            }
        }
    }
}

#[async_trait]
impl ServerCatalog for SimRailClient {
    async fn list_servers(&self) -> anyhow::Result<Vec<ServerInfo>> {
        let response: ServersResponse = self
            .get_json(&self.servers_url())
            .await
            .context("Failed to fetch servers")?;

        Ok(response
            .data
            .into_iter()
            .map(|s| ServerInfo {
                name: s.server_name,
                code: s.server_code,
                is_active: s.is_active,
            })
            .collect())
    }

    async fn list_trains(&self, server_code: &str) -> anyhow::Result<Vec<RunNumber>> {
        let trains = self
            .fetch_trains(server_code)
            .await
            .with_context(|| format!("Failed to fetch trains for server {}", server_code))?;

        Ok(trains.iter().filter_map(run_number).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn trains(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        match params.get("serverCode").map(String::as_str) {
            Some("en1") => Json(json!({
                "result": true,
                "data": [
                    { "TrainNoLocal": "14021", "TrainData": { "SignalInFrontSpeed": 60 } },
                    { "TrainNoLocal": "40150", "TrainData": { "SignalInFrontSpeed": 32767 } },
                    { "TrainNoLocal": "3521", "TrainData": { "VDDelayedTimetableIndex": 4 } },
                    { "TrainNoLocal": 1411, "TrainData": { "SignalInFrontSpeed": 100.0 } }
                ]
            }))
            .into_response(),
            Some("mixed") => Json(json!({
                "data": [
                    { "TrainNoLocal": "999", "TrainData": { "SignalInFrontSpeed": "n/a" } },
                    { "TrainNoLocal": true, "TrainData": { "SignalInFrontSpeed": 40 } },
                    { "TrainNoLocal": 12.5 },
                    "garbage",
                    { "TrainNoLocal": "14021", "TrainData": { "SignalInFrontSpeed": 60 } }
                ]
            }))
            .into_response(),
            Some("broken") => (StatusCode::OK, "not json").into_response(),
            Some("slow") => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "data": [] })).into_response()
            }
            _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        }
    }

    async fn servers() -> Json<serde_json::Value> {
        Json(json!({
            "result": true,
            "data": [
                { "ServerName": "EN1 (English)", "ServerCode": "en1", "IsActive": true },
                { "ServerName": "PL2 (Polish)", "ServerCode": "pl2", "IsActive": false }
            ]
        }))
    }

    async fn spawn_api() -> String {
        let router = Router::new()
            .route("/trains-open", get(trains))
            .route("/servers-open", get(servers));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn client(base_url: &str) -> SimRailClient {
        SimRailClient::new(base_url, Duration::from_millis(500)).unwrap()
    }

    fn selection(server: &str, train: &str) -> Selection {
        Selection::new(server, RunNumber::new(train))
    }

    #[tokio::test]
    async fn test_fetch_matching_train() {
        let client = client(&spawn_api().await);

        assert_eq!(client.fetch(&selection("en1", "14021")).await, SpeedReading::Speed(60));
        assert_eq!(client.fetch(&selection("en1", "40150")).await, SpeedReading::Speed(32767));
        assert_eq!(client.fetch(&selection("en1", "1411")).await, SpeedReading::Speed(100));
    }

    #[tokio::test]
    async fn test_missing_speed_field_reads_zero() {
        let client = client(&spawn_api().await);
        assert_eq!(client.fetch(&selection("en1", "3521")).await, SpeedReading::Speed(0));
    }

    #[tokio::test]
    async fn test_train_not_found() {
        let client = client(&spawn_api().await);
        let err = client.signal_speed(&selection("en1", "99999")).await.unwrap_err();
        assert_eq!(err.category(), "lookup_miss");
        assert_eq!(client.fetch(&selection("en1", "99999")).await, SpeedReading::Unavailable);
    }

    #[tokio::test]
    async fn test_malformed_neighbour_does_not_hide_selected_train() {
        let client = client(&spawn_api().await);
        assert_eq!(client.fetch(&selection("mixed", "14021")).await, SpeedReading::Speed(60));

        let trains = client.list_trains("mixed").await.unwrap();
        assert_eq!(trains, vec![RunNumber::new("999"), RunNumber::new("14021")]);
    }

    #[tokio::test]
    async fn test_malformed_selected_record_is_protocol_error() {
        let client = client(&spawn_api().await);
        let err = client.signal_speed(&selection("mixed", "999")).await.unwrap_err();
        assert_eq!(err.category(), "protocol");
        assert_eq!(client.fetch(&selection("mixed", "999")).await, SpeedReading::Unavailable);
    }

    #[tokio::test]
    async fn test_error_status_is_protocol_error() {
        let client = client(&spawn_api().await);
        let err = client.signal_speed(&selection("down", "14021")).await.unwrap_err();
        assert_eq!(err.category(), "protocol");
        assert_eq!(client.fetch(&selection("down", "14021")).await, SpeedReading::Unavailable);
    }

    #[tokio::test]
    async fn test_malformed_body_is_protocol_error() {
        let client = client(&spawn_api().await);
        let err = client.signal_speed(&selection("broken", "14021")).await.unwrap_err();
        assert_eq!(err.category(), "protocol");
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let client = client(&spawn_api().await);
        let err = client.signal_speed(&selection("slow", "14021")).await.unwrap_err();
        assert_eq!(err.category(), "network");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{}", addr));
        assert_eq!(client.fetch(&selection("en1", "14021")).await, SpeedReading::Unavailable);
    }

    #[tokio::test]
    async fn test_catalog() {
        let client = client(&spawn_api().await);

        let servers = client.list_servers().await.unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "EN1 (English)");
        assert!(servers[0].is_active);
        assert!(!servers[1].is_active);

        let trains = client.list_trains("en1").await.unwrap();
        assert_eq!(trains.len(), 4);
        assert!(trains.contains(&RunNumber::new("1411")));
    }

    #[test]
    fn test_trains_url_encodes_server_code() {
        let client = client("https://panel.simrail.eu:8084/");
        assert_eq!(
            client.trains_url("en 1"),
            "https://panel.simrail.eu:8084/trains-open?serverCode=en%201"
        );
    }
}
