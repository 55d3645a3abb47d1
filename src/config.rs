//! Service Configuration
//!
//! All configuration is environment-provided, with a `.env` file loaded in
//! development. Every field has a default so the server can boot with no
//! environment at all.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Runtime mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" => RunMode::Production,
            _ => RunMode::Development,
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Runtime mode (default: development)
    #[serde(default = "default_mode")]
    pub mode: RunMode,

    /// Path of the JSON snapshot the store persists to; None keeps the
    /// store purely in-memory
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Geocoding provider name (default: "mapquest")
    #[serde(default = "default_geocoder_provider")]
    pub geocoder_provider: String,

    /// Geocoding provider API key
    #[serde(default)]
    pub geocoder_api_key: String,

    /// Geocoding provider base URL
    #[serde(default = "default_geocoder_base_url")]
    pub geocoder_base_url: String,

    /// Maximum accepted upload size in bytes (default: 1 MB)
    #[serde(default = "default_max_file_upload")]
    pub max_file_upload: u64,

    /// Directory uploaded photos are written to
    #[serde(default = "default_file_upload_path")]
    pub file_upload_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_mode() -> RunMode {
    RunMode::Development
}

fn default_geocoder_provider() -> String {
    "mapquest".to_string()
}

fn default_geocoder_base_url() -> String {
    "https://www.mapquestapi.com/geocoding/v1/address".to_string()
}

fn default_max_file_upload() -> u64 {
    1_000_000
}

fn default_file_upload_path() -> PathBuf {
    PathBuf::from("public/uploads")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mode: default_mode(),
            data_file: None,
            geocoder_provider: default_geocoder_provider(),
            geocoder_api_key: String::new(),
            geocoder_base_url: default_geocoder_base_url(),
            max_file_upload: default_max_file_upload(),
            file_upload_path: default_file_upload_path(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment. A `.env` file in
    /// the working directory is honored when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = env_parse::<u16>("PORT") {
            config.port = port;
        }
        if let Ok(mode) = std::env::var("RUN_MODE") {
            config.mode = RunMode::parse(&mode);
        }
        if let Ok(path) = std::env::var("DATA_FILE") {
            config.data_file = Some(PathBuf::from(path));
        }
        if let Ok(provider) = std::env::var("GEOCODER_PROVIDER") {
            config.geocoder_provider = provider;
        }
        if let Ok(key) = std::env::var("GEOCODER_API_KEY") {
            config.geocoder_api_key = key;
        }
        if let Ok(url) = std::env::var("GEOCODER_BASE_URL") {
            config.geocoder_base_url = url;
        }
        if let Some(max) = env_parse::<u64>("MAX_FILE_UPLOAD") {
            config.max_file_upload = max;
        }
        if let Ok(path) = std::env::var("FILE_UPLOAD_PATH") {
            config.file_upload_path = PathBuf::from(path);
        }

        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
