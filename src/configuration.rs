use serde_aux::field_attributes::deserialize_number_from_string;
use std::{num::NonZeroU64, time::Duration};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub dashboard: DashboardSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    /// Host of the mempool instance, without scheme (e.g. `mempool.space`).
    pub mempool_url: String,
    pub network: String,
    pub log_file: String,
    /// Zero is rejected; a ping timer needs a period.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub ping_interval_secs: NonZeroU64,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DashboardSettings {
    /// How many confirmed blocks are kept and drawn.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub blocks_to_display: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub tick_rate_ms: u64,
}

impl ApplicationSettings {
    fn network_prefix(&self) -> String {
        if self.network == "mainnet" {
            String::new()
        } else {
            format!("/{}", self.network)
        }
    }

    pub fn websocket_url(&self) -> String {
        format!("wss://{}{}/api/v1/ws", self.mempool_url, self.network_prefix())
    }

    pub fn api_base_url(&self) -> String {
        format!("https://{}{}", self.mempool_url, self.network_prefix())
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs.get())
    }
}

impl DashboardSettings {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__MEMPOOL_URL=mempool.space` would set `Settings.application.mempool_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
