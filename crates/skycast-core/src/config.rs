use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Environment variable holding the OpenWeather API key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "SKYCAST_CONFIG";
pub const BIND_ADDR_ENV: &str = "SKYCAST_BIND_ADDR";
pub const HISTORY_PATH_ENV: &str = "SKYCAST_HISTORY_PATH";
pub const HISTORY_BACKEND_ENV: &str = "SKYCAST_HISTORY_BACKEND";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Search history storage
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to, e.g. "127.0.0.1:3001"
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key. Usually supplied through `OPENWEATHER_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Direct geocoding endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// 5 day / 3 hour forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Timeout for each upstream request in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_geocode_url() -> String {
    "http://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_forecast_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_url: default_geocode_url(),
            forecast_url: default_forecast_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Which storage implementation backs the search history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackendKind {
    #[default]
    Json,
    Sqlite,
    Memory,
}

impl FromStr for HistoryBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown history backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub backend: HistoryBackendKind,

    /// File holding the history (JSON array or SQLite database)
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("db").join("db.json")
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackendKind::default(),
            path: default_history_path(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations and the process environment.
    ///
    /// A missing config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(p) if !p.trim().is_empty() => Some(PathBuf::from(p)),
            _ => Self::config_path(),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => Self::load_from(p)?,
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file without applying environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.weather.api_key = Some(key);
        }
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.server.bind_addr = addr;
        }
        if let Some(path) = lookup(HISTORY_PATH_ENV) {
            self.history.path = PathBuf::from(path);
        }
        if let Some(backend) = lookup(HISTORY_BACKEND_ENV) {
            match backend.parse() {
                Ok(kind) => self.history.backend = kind,
                Err(e) => tracing::warn!("Ignoring {}: {}", HISTORY_BACKEND_ENV, e),
            }
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            result.add_error(
                "server.bind_addr",
                format!("Invalid socket address: {}", self.server.bind_addr),
            );
        }

        self.validate_url(&self.weather.geocode_url, "weather.geocode_url", &mut result);
        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        // Requests fail individually without a key, the server can still serve history
        if self.weather.api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured - set {} to enable forecasts", API_KEY_ENV),
            );
        }

        if self.history.path.as_os_str().is_empty()
            && self.history.backend != HistoryBackendKind::Memory
        {
            result.add_error("history.path", "History path cannot be empty");
        }

        if self.history.backend == HistoryBackendKind::Memory {
            result.add_warning("history.backend", "History is kept in memory only");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Default config file location
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("skycast").join("config.toml"))
    }
}
