//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::pricing::{rates::DEFAULT_USD_RATE, ConversionTable, PricingError, WeightUnit};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_history_file")]
    pub history_file: String,

    #[serde(default = "default_purchases_file")]
    pub purchases_file: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_history_file() -> String {
    "historical_silver_price.csv".to_string()
}

fn default_purchases_file() -> String {
    "state_wise_silver_purchased_kg.csv".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_file: default_history_file(),
            purchases_file: default_purchases_file(),
        }
    }
}

impl DataConfig {
    /// Absolute file names are used as-is
    pub fn history_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.history_file)
    }

    pub fn purchases_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.purchases_file)
    }
}

/// Calculator defaults and the currency conversion table
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    #[serde(default = "default_base_symbol")]
    pub base_symbol: String,

    #[serde(default = "default_weight")]
    pub default_weight: f64,

    #[serde(default)]
    pub default_unit: WeightUnit,

    #[serde(default = "default_price_per_gram")]
    pub default_price_per_gram: f64,

    /// How many states the sales ranking shows
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Multipliers from the base currency, keyed by currency code
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, f64>,
}

fn default_base_currency() -> String {
    "INR".to_string()
}

fn default_base_symbol() -> String {
    "₹".to_string()
}

fn default_weight() -> f64 {
    100.0
}

fn default_price_per_gram() -> f64 {
    80.0
}

fn default_top_n() -> usize {
    5
}

fn default_rates() -> BTreeMap<String, f64> {
    BTreeMap::from([("USD".to_string(), DEFAULT_USD_RATE)])
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            base_symbol: default_base_symbol(),
            default_weight: default_weight(),
            default_unit: WeightUnit::default(),
            default_price_per_gram: default_price_per_gram(),
            top_n: default_top_n(),
            rates: default_rates(),
        }
    }
}

impl PricingConfig {
    /// Build the conversion table from the configured rates
    pub fn conversion_table(&self) -> Result<ConversionTable, ConfigError> {
        Ok(ConversionTable::new(
            self.rates.iter().map(|(code, rate)| (code.as_str(), *rate)),
        )?)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        // Reject bad rates at load time rather than on the first conversion
        config.pricing.conversion_table()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here: this usually runs before the subscriber is
    /// installed, so call [`ConfigLoad::log`] once logging is up.
    pub fn load_default() -> ConfigLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("silverdash").join("config.toml")),
            Some(PathBuf::from("/etc/silverdash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists and parses, recording every
    /// file that exists but fails. Falls back to defaults with environment
    /// overrides.
    pub fn load_first(paths: &[PathBuf]) -> ConfigLoad {
        let mut failures = Vec::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load_with_env(path) {
                Ok(config) => {
                    return ConfigLoad {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push((path.clone(), e)),
            }
        }

        ConfigLoad {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Data overrides
        if let Ok(data_dir) = std::env::var("SILVERDASH_DATA_DIR") {
            self.data.data_dir = data_dir;
        }
        if let Ok(file) = std::env::var("SILVERDASH_HISTORY_FILE") {
            self.data.history_file = file;
        }
        if let Ok(file) = std::env::var("SILVERDASH_PURCHASES_FILE") {
            self.data.purchases_file = file;
        }

        // Pricing overrides
        if let Ok(rate) = std::env::var("SILVERDASH_USD_RATE") {
            match rate.parse::<f64>() {
                Ok(r) if r.is_finite() && r > 0.0 => {
                    self.pricing.rates.insert("USD".to_string(), r);
                }
                _ => tracing::warn!("Ignoring invalid SILVERDASH_USD_RATE: {}", rate),
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("SILVERDASH_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SILVERDASH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("SILVERDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SILVERDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching the default config locations
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub failures: Vec<(PathBuf, ConfigError)>,
}

impl ConfigLoad {
    /// Report where the config came from and which files were rejected
    pub fn log(&self) {
        for (path, error) in &self.failures {
            tracing::warn!("Failed to load config from {:?}: {}", path, error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] PricingError),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Silverdash Configuration
#
# Environment variables override these settings:
# - SILVERDASH_DATA_DIR
# - SILVERDASH_HISTORY_FILE
# - SILVERDASH_PURCHASES_FILE
# - SILVERDASH_USD_RATE
# - SILVERDASH_API_HOST
# - SILVERDASH_API_PORT
# - SILVERDASH_LOG_LEVEL
# - SILVERDASH_LOG_FORMAT

[data]
# Directory holding the input CSV files
data_dir = "."

# Historical price file (needs a date column and a price column)
history_file = "historical_silver_price.csv"

# State purchases file (columns: State, Silver_Purchased_kg)
purchases_file = "state_wise_silver_purchased_kg.csv"

[pricing]
# Currency the calculator computes in
base_currency = "INR"
base_symbol = "₹"

# Calculator defaults
default_weight = 100.0
default_unit = "grams"
default_price_per_gram = 80.0

# Number of states in the sales ranking
top_n = 5

[pricing.rates]
# Multiplier applied to a base-currency amount
USD = 0.012

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8501

# Allowed CORS origins (empty = allow any)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pricing.default_weight, 100.0);
        assert_eq!(config.pricing.default_unit, WeightUnit::Grams);
        assert_eq!(config.pricing.default_price_per_gram, 80.0);
        assert_eq!(config.pricing.top_n, 5);
        assert_eq!(config.pricing.rates.len(), 1);
        assert_eq!(config.pricing.rates["USD"], 0.012);
        assert_eq!(
            config.data.purchases_path(),
            Path::new(".").join("state_wise_silver_purchased_kg.csv")
        );
    }

    #[test]
    fn test_generated_config_round_trips() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.pricing.base_currency, "INR");
        assert_eq!(config.pricing.base_symbol, "₹");
        assert_eq!(config.api.port, 8501);
        assert_eq!(config.pricing.conversion_table().unwrap().rate("USD").unwrap(), 0.012);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
[pricing]
default_unit = "kilograms"

[pricing.rates]
USD = 0.0121
EUR = 0.011
"#,
        )
        .unwrap();

        assert_eq!(config.pricing.default_unit, WeightUnit::Kilograms);
        assert_eq!(config.pricing.default_weight, 100.0);
        assert_eq!(config.pricing.conversion_table().unwrap().len(), 2);
        assert_eq!(config.data.history_file, "historical_silver_price.csv");
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let err = Config::parse("[pricing.rates]\nUSD = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Pricing(PricingError::InvalidRate { .. })));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nport = \"not a port\"\n").unwrap();

        match Config::load(&path).unwrap_err() {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_first_records_rejected_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[pricing.rates]\nUSD = 0.0\n").unwrap();
        std::fs::write(&good, "[pricing]\ntop_n = 3\n").unwrap();

        let loaded = Config::load_first(&[
            dir.path().join("absent.toml"),
            broken.clone(),
            good.clone(),
        ]);

        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.config.pricing.top_n, 3);
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].0, broken);
        assert!(matches!(loaded.failures[0].1, ConfigError::Pricing(_)));
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "not = [valid").unwrap();

        let loaded = Config::load_first(&[broken]);
        assert!(loaded.source.is_none());
        assert_eq!(loaded.failures.len(), 1);
        assert!(matches!(loaded.failures[0].1, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_absolute_data_file() {
        let data = DataConfig {
            data_dir: "/srv/silver".to_string(),
            history_file: "/tmp/prices.csv".to_string(),
            ..DataConfig::default()
        };
        assert_eq!(data.history_path(), PathBuf::from("/tmp/prices.csv"));
        assert_eq!(
            data.purchases_path(),
            PathBuf::from("/srv/silver/state_wise_silver_purchased_kg.csv")
        );
    }
}
