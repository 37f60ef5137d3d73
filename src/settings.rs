use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug, PartialEq)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // `APP_ENV` picks the runtime, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // NOTE: Should be used for any prod secrets.
            // Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    host: String,
    name: String,
    username: String,
    password: Secret<String>,
    require_ssl: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    max_connections: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    acquire_timeout_seconds: u64,
}

impl DatabaseSettings {
    /// The database connection options, without specifying the database name
    pub fn without_db(&self) -> PgConnectOptions {
        use secrecy::ExposeSecret;

        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .port(self.port)
            .host(&self.host)
            .ssl_mode(ssl_mode)
            .username(&self.username)
            .password(self.password.expose_secret())
    }
    /// The database connection options, with the database name
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }
    /// Pool sizing; connections are checked out per query and returned right after
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_seconds))
    }
}
