//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "portfolio-agents".to_string(),
            environment: "development".to_string(),
            log_filter: "warn,agent_portfolio=info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Build a config from defaults overridden by environment variables
    ///
    /// Reads `APP_ENV` and `LOG_FORMAT`. Production environments log JSON
    /// unless `LOG_FORMAT` says otherwise; an unparseable `LOG_FORMAT` keeps
    /// that default. `RUST_LOG` is left to the tracing setup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(env) = lookup("APP_ENV") {
            config.environment = env;
        }
        if config.is_production() {
            config.log_format = LogFormat::Json;
        }
        if let Some(format) = lookup("LOG_FORMAT").and_then(|f| f.parse().ok()) {
            config.log_format = format;
        }
        config
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production") || self.environment == "prod"
    }
}
