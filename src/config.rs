use chrono::{DateTime, Utc};
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};
use std::time;

use crate::domain::countdown::AfterLaunch;

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
    pub database: DatabaseSettings,
    pub launch: LaunchSettings,
    pub subscription: SubscriptionSettings,
    pub landing: LandingSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Rest,
    Postgres,
}

#[derive(serde::Deserialize, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub base_url: String,
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub api_key: Secret<String>,
    pub table: String,
    // No timeout unless one is configured, the transport defaults apply.
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub name: String,
    pub require_ssl: bool,
}

#[derive(serde::Deserialize, Clone)]
pub struct LaunchSettings {
    pub target: DateTime<Utc>,
    pub registration_url: String,
    #[serde(default)]
    pub after_launch: AfterLaunch,
}

#[derive(serde::Deserialize, Clone)]
pub struct SubscriptionSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub confirmation_visible_seconds: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct LandingSettings {
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn get_db_options(&self) -> PgConnectOptions {
        self.database.get_db_options()
    }

    pub fn get_store_base_url(&self) -> String {
        self.store.get_base_url()
    }

    pub fn get_store_api_key(&self) -> Secret<String> {
        self.store.get_api_key()
    }

    pub fn set_store_base_url(&mut self, new_base_url: String) {
        self.store.set_base_url(new_base_url)
    }

    pub fn get_confirmation_visible_for(&self) -> time::Duration {
        self.subscription.get_visible_for()
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn set_launch_target(&mut self, target: DateTime<Utc>) {
        self.launch.target = target;
    }
}

impl DatabaseSettings {
    pub fn get_db_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        let mut db_options = PgConnectOptions::new()
            .host(&self.host)
            .password(self.password.expose_secret())
            .username(&self.username)
            .port(self.port)
            .database(&self.name)
            .ssl_mode(ssl_mode);

        db_options.log_statements(tracing::log::LevelFilter::Trace);

        db_options
    }

    pub fn set_name(&mut self, new_db_name: String) {
        self.name = new_db_name
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }
}

impl StoreSettings {
    pub fn get_base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn get_api_key(&self) -> Secret<String> {
        self.api_key.clone()
    }

    pub fn get_timeout(&self) -> Option<time::Duration> {
        self.timeout_milliseconds.map(time::Duration::from_millis)
    }

    pub fn set_base_url(&mut self, new_base_url: String) {
        self.base_url = new_base_url
    }
}

impl SubscriptionSettings {
    pub fn get_visible_for(&self) -> time::Duration {
        time::Duration::from_secs(self.confirmation_visible_seconds)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().map_err(|err| {
        ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            err
        ))
    })?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let enviroment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(enviroment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_STORE__API_KEY would set Settings.store.api_key
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
