//! Configuration types

use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Responder configuration
    #[serde(default)]
    pub order: OrderConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Tick responder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
    /// Buy once price drops strictly below this value
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    /// Only ticks for this code reach the responder (all codes when unset)
    #[serde(default)]
    pub code: Option<String>,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            code: None,
        }
    }
}

fn default_threshold() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Number of concurrent tasks replaying ticks
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            workers: default_workers(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_workers() -> usize {
    4
}
