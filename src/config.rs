use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::GeoPoint;
use crate::view::ViewOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_providers_csv")]
    pub providers_csv: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            providers_csv: default_providers_csv(),
        }
    }
}

fn default_providers_csv() -> String { "data/providers.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            api_key: String::new(),
            region: default_region(),
            timeout_secs: default_timeout_secs(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_geocoding_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}
fn default_region() -> String { "Rhode Island, USA".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_cache_size() -> u64 { 1000 }
fn default_cache_ttl_secs() -> u64 { 86_400 }

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
    #[serde(default = "default_search_zoom")]
    pub search_zoom: u8,
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
    #[serde(default = "default_region_code")]
    pub region_code: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            default_zoom: default_zoom(),
            search_zoom: default_search_zoom(),
            focus_zoom: default_focus_zoom(),
            region_code: default_region_code(),
        }
    }
}

fn default_center_lat() -> f64 { 41.7 }
fn default_center_lng() -> f64 { -71.5 }
fn default_zoom() -> u8 { 9 }
fn default_search_zoom() -> u8 { 11 }
fn default_focus_zoom() -> u8 { 15 }
fn default_region_code() -> String { "RI".to_string() }

impl MapSettings {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            default_center: GeoPoint::new(self.center_lat, self.center_lng),
            default_zoom: self.default_zoom,
            search_zoom: self.search_zoom,
            focus_zoom: self.focus_zoom,
            region_code: self.region_code.clone(),
        }
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DIRECTORY__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DIRECTORY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DIRECTORY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_key_override(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DIRECTORY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Accept the conventional GOOGLE_MAPS_API_KEY variable for the geocoder key
fn apply_key_override(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("geocoding.api_key", key)?
            .build(),
        _ => Ok(settings),
    }
}
