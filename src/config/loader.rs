//! Configuration loader

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::types::{AppConfig, AppSettings, OrderConfig};
use crate::common::errors::{Result, TradeError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_, `__` between sections)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| TradeError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| TradeError::Configuration(e.to_string()))
}

/// Load configuration from `TRADE_CAPTURE_*` environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let defaults = AppConfig::default();

    let threshold = match std::env::var("TRADE_CAPTURE_THRESHOLD") {
        Ok(raw) => Decimal::from_str(raw.trim()).map_err(|e| {
            TradeError::Configuration(format!("TRADE_CAPTURE_THRESHOLD={}: {}", raw, e))
        })?,
        Err(_) => defaults.order.threshold,
    };

    let workers = match std::env::var("TRADE_CAPTURE_WORKERS") {
        Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
            TradeError::Configuration(format!("TRADE_CAPTURE_WORKERS={}: {}", raw, e))
        })?,
        Err(_) => defaults.settings.workers,
    };

    Ok(AppConfig {
        order: OrderConfig {
            threshold,
            code: std::env::var("TRADE_CAPTURE_CODE")
                .ok()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        },
        settings: AppSettings {
            log_level: std::env::var("TRADE_CAPTURE_LOG_LEVEL")
                .unwrap_or(defaults.settings.log_level),
            workers,
        },
    })
}
