//! Configuration management for the Meteo Prediction service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with METEO_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::GeoLocation;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Historical weather archive configuration
    pub weather: WeatherConfig,

    /// Trained model artifacts
    pub models: ModelsConfig,

    /// Project metadata shown on the overview endpoint
    pub project: ProjectConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Archive API endpoint
    pub archive_url: String,

    pub latitude: f64,

    pub longitude: f64,

    /// IANA timezone the daily aggregates are computed in
    pub timezone: String,

    /// Upper bound on a single archive request, in seconds
    pub timeout_secs: u64,
}

impl WeatherConfig {
    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelsConfig {
    /// Path to the rain classifier artifact
    pub rain_path: String,

    /// Path to the precipitation regressor artifact
    pub precipitation_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    /// File holding the repository link
    pub github_link_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("METEO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.archive_url", WeatherConfig::default().archive_url)?
            .set_default("weather.latitude", WeatherConfig::default().latitude)?
            .set_default("weather.longitude", WeatherConfig::default().longitude)?
            .set_default("weather.timezone", WeatherConfig::default().timezone)?
            .set_default("weather.timeout_secs", WeatherConfig::default().timeout_secs)?
            .set_default(
                "models.rain_path",
                "models/rain_or_not/rain_classifier.json",
            )?
            .set_default(
                "models.precipitation_path",
                "models/precipitation_fall/precipitation_regressor.json",
            )?
            .set_default("project.github_link_file", "github.txt")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (METEO_ prefix)
            .add_source(
                Environment::with_prefix("METEO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://archive-api.open-meteo.com/v1/archive".to_string(),
            latitude: -33.8678,
            longitude: 151.2073,
            timezone: "Australia/Sydney".to_string(),
            timeout_secs: 30,
        }
    }
}
