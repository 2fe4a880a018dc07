use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::priorities::{
    GatedCategory, PriorityClassifier, PriorityCounters, PriorityThresholds,
    DEFAULT_MV_URGENCY_DAYS,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub priorities: PrioritySettings,
    pub distribution: DistributionSettings,
    pub ledger: LedgerSettings,
    /// Directory the CSV sheet writer fills, one file per sheet.
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut thresholds = PriorityThresholds::default();
        for category in GatedCategory::ordered() {
            let limit = number_var(threshold_key(category), category.default_threshold())?;
            thresholds.set(category, limit);
        }
        let priorities = PrioritySettings {
            mv_urgency_days: number_var("PRIORITY_MV_URGENCY_DAYS", DEFAULT_MV_URGENCY_DAYS)?,
            thresholds,
            initial_counters: PriorityCounters::new(),
        };

        let distribution = DistributionSettings {
            quota_destinations: destination_count(
                "QUOTA_DESTINATIONS",
                DistributionSettings::DEFAULT_QUOTA_DESTINATIONS,
            )?,
            replacement_destinations: destination_count(
                "REPLACEMENT_DESTINATIONS",
                DistributionSettings::DEFAULT_REPLACEMENT_DESTINATIONS,
            )?,
        };

        let ledger = LedgerSettings {
            max_rows: number_var("LEDGER_MAX_ROWS", LedgerSettings::DEFAULT_MAX_ROWS)?,
        };

        let output_dir = env::var("APP_OUTPUT_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output"));

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            priorities,
            distribution,
            ledger,
            output_dir,
        })
    }
}

fn threshold_key(category: GatedCategory) -> &'static str {
    match category {
        GatedCategory::FilipinaLiveIn => "PRIORITY_THRESHOLD_FILIPINA_LIVE_IN",
        GatedCategory::AfricanLiveIn => "PRIORITY_THRESHOLD_AFRICAN_LIVE_IN",
        GatedCategory::EthiopianLiveIn => "PRIORITY_THRESHOLD_ETHIOPIAN_LIVE_IN",
        GatedCategory::FilipinaLiveOut => "PRIORITY_THRESHOLD_FILIPINA_LIVE_OUT",
        GatedCategory::AfricanLiveOut => "PRIORITY_THRESHOLD_AFRICAN_LIVE_OUT",
    }
}

fn number_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key,
                    value: value.clone(),
                })
        }
        _ => Ok(default),
    }
}

fn destination_count(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    let count = number_var(key, default)?;
    if count == 0 {
        return Err(ConfigError::InvalidConfiguration(format!(
            "{key} must be at least 1"
        )));
    }
    Ok(count)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Classifier inputs shared by every report and distribution run.
#[derive(Debug, Clone)]
pub struct PrioritySettings {
    pub mv_urgency_days: u32,
    pub thresholds: PriorityThresholds,
    pub initial_counters: PriorityCounters,
}

impl Default for PrioritySettings {
    fn default() -> Self {
        Self {
            mv_urgency_days: DEFAULT_MV_URGENCY_DAYS,
            thresholds: PriorityThresholds::default(),
            initial_counters: PriorityCounters::new(),
        }
    }
}

impl PrioritySettings {
    pub fn classifier(&self) -> PriorityClassifier {
        PriorityClassifier::new(self.thresholds.clone(), self.mv_urgency_days)
            .with_initial_counters(self.initial_counters.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionSettings {
    pub quota_destinations: usize,
    pub replacement_destinations: usize,
}

impl DistributionSettings {
    pub const DEFAULT_QUOTA_DESTINATIONS: usize = 2;
    pub const DEFAULT_REPLACEMENT_DESTINATIONS: usize = 7;
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            quota_destinations: Self::DEFAULT_QUOTA_DESTINATIONS,
            replacement_destinations: Self::DEFAULT_REPLACEMENT_DESTINATIONS,
        }
    }
}

/// Row cap applied to both ledgers after a merge; zero disables truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    pub max_rows: usize,
}

impl LedgerSettings {
    pub const DEFAULT_MAX_ROWS: usize = 100;
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            max_rows: Self::DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    InvalidConfiguration(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidConfiguration(message) => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidConfiguration(_) => None,
        }
    }
}
