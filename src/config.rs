use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::DEFAULT_SEARCH_RADIUS_METERS;
use crate::models::TravelMode;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub google: GoogleSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub platform: PlatformSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    pub api_key: String,
    /// Key embedded in URLs handed to browsers; falls back to `api_key`
    pub public_api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GoogleSettings {
    pub fn browser_key(&self) -> &str {
        self.public_api_key.as_deref().unwrap_or(&self.api_key)
    }
}

fn default_base_url() -> String { "https://maps.googleapis.com".to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_max_photos")]
    pub max_photos: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
            travel_mode: TravelMode::default(),
            default_category: default_category(),
            max_photos: default_max_photos(),
        }
    }
}

fn default_radius_meters() -> u32 { DEFAULT_SEARCH_RADIUS_METERS }
fn default_category() -> String { "restaurant".to_string() }
fn default_max_photos() -> usize { 5 }

/// Capabilities of the environment the responses are rendered in
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformSettings {
    /// Clients can run the Maps JavaScript API, so responses carry the loader URL
    #[serde(default)]
    pub interactive_maps: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with MEET__)
    /// 4. GOOGLE_MAPS_API_KEY / GOOGLE_MAPS_PUBLIC_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // e.g., MEET__GOOGLE__API_KEY -> google.api_key
            .add_source(
                Environment::with_prefix("MEET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_api_keys(settings)?
            .try_deserialize::<Settings>()?
            .validate()
    }

    /// Reject settings the service cannot run with
    fn validate(self) -> Result<Self, ConfigError> {
        if self.google.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "google.api_key is empty; set GOOGLE_MAPS_API_KEY or MEET__GOOGLE__API_KEY".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Let the conventional Google Maps key variables override the config file
fn substitute_api_keys(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(key) = env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("google.api_key", key)?;
    }
    if let Ok(key) = env::var("GOOGLE_MAPS_PUBLIC_API_KEY") {
        builder = builder.set_override("google.public_api_key", key)?;
    }

    builder.build()
}
