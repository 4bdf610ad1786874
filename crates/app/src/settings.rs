//! Handles settings for the application. Configuration is written in
//! `settings.toml`, with `HOMESTASH_`-prefixed environment variables taking
//! precedence.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    /// Database URL, e.g. `sqlite:./homestash.db?mode=rwc`.
    pub database: String,
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Assistant {
    pub api_url: Option<String>,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    pub assistant: Option<Assistant>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .add_source(Environment::with_prefix("HOMESTASH").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
