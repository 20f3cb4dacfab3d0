use crate::application::poll_loop::PollSettings;
use crate::domain::selection::{DisplayMode, RunNumber, Selection};
use crate::infrastructure::serial_sink::DEFAULT_BAUD_RATE;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://panel.simrail.eu:8084";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub poll: PollConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub serial: Option<SerialConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    pub period_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SelectionConfig {
    pub server_code: Option<String>,
    pub train: Option<RunNumber>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind: SocketAddr,
}

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

impl AppConfig {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            period: Duration::from_secs(self.poll.period_secs.max(1)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    /// The configured selection, if both server and train are set.
    pub fn selection(&self) -> Option<Selection> {
        let server_code = self.selection.server_code.as_ref()?;
        let train = self.selection.train.clone()?;
        Some(Selection::new(server_code.clone(), train))
    }
}

/// Defaults, then `config/evm120.*` if present, then `EVM120__SECTION__KEY` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_from(
        config::File::with_name("config/evm120").required(false),
        environment(),
    )
}

// Values stay strings here and are typed on deserialize, so a run-number
// like `014021` keeps its leading zero.
fn environment() -> config::Environment {
    config::Environment::with_prefix("EVM120").separator("__")
}

fn load_from<S>(source: S, env: config::Environment) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_secs", 3)?
        .set_default("poll.period_secs", 5)?
        .add_source(source)
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
